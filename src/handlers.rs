use crate::errors::AppError;
use crate::journal::{add_entry, edit_entry, newest_first, now, parse_entry_id, to_wire};
use crate::models::{EditEntryForm, JournalEntry, NewEntryForm};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::{render_detail, render_home, JOURNAL_JS};
use axum::{
    extract::{Path, State},
    http::header::CONTENT_TYPE,
    response::{Html, IntoResponse},
    Form, Json,
};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    let entries: Vec<JournalEntry> = newest_first(&data).map(to_wire).collect();
    Html(render_home(&entries))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let id = parse_entry_id(&id)?;
    let data = state.data.lock().await;
    let entry = data
        .entries
        .get(&id)
        .ok_or_else(|| AppError::not_found(format!("no entry with id {id}")))?;
    Ok(Html(render_detail(&to_wire(entry), &entry.text)))
}

pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<NewEntryForm>,
) -> Result<Json<JournalEntry>, AppError> {
    let mut data = state.data.lock().await;
    let entry = add_entry(&mut data, form.title, form.text, now())?;
    persist_data(&state.data_path, &data).await?;

    info!(id = entry.id, "added entry");
    Ok(Json(to_wire(&entry)))
}

pub async fn edit(
    State(state): State<AppState>,
    Form(form): Form<EditEntryForm>,
) -> Result<Json<JournalEntry>, AppError> {
    let id = parse_entry_id(&form.id)?;
    let mut data = state.data.lock().await;
    let entry = edit_entry(&mut data, id, form.title, form.text)?;
    persist_data(&state.data_path, &data).await?;

    info!(id = entry.id, "edited entry");
    Ok(Json(to_wire(&entry)))
}

pub async fn script() -> impl IntoResponse {
    ([(CONTENT_TYPE, "application/javascript; charset=utf-8")], JOURNAL_JS)
}
