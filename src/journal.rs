use crate::errors::AppError;
use crate::markdown::render_markdown;
use crate::models::{EntryId, JournalData, JournalEntry, MAX_TITLE_CHARS, StoredEntry};
use chrono::{Local, NaiveDateTime};

const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn add_entry(
    data: &mut JournalData,
    title: String,
    text: String,
    created: NaiveDateTime,
) -> Result<StoredEntry, AppError> {
    check_title(&title)?;

    let id = data.next_id;
    data.next_id = data.next_id.saturating_add(1);
    let entry = StoredEntry {
        id,
        title,
        text,
        created,
    };
    data.entries.insert(id, entry.clone());
    Ok(entry)
}

/// Replaces title and text of an existing entry. `created` is left alone.
pub fn edit_entry(
    data: &mut JournalData,
    id: EntryId,
    title: String,
    text: String,
) -> Result<StoredEntry, AppError> {
    check_title(&title)?;

    let entry = data
        .entries
        .get_mut(&id)
        .ok_or_else(|| AppError::not_found(format!("no entry with id {id}")))?;
    entry.title = title;
    entry.text = text;
    Ok(entry.clone())
}

pub fn newest_first(data: &JournalData) -> impl Iterator<Item = &StoredEntry> {
    data.entries.values().rev()
}

pub fn parse_entry_id(raw: &str) -> Result<EntryId, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::bad_request("id is required"));
    }
    raw.parse::<EntryId>()
        .map_err(|_| AppError::bad_request(format!("id must be a positive integer, got {raw:?}")))
}

pub fn to_wire(entry: &StoredEntry) -> JournalEntry {
    JournalEntry {
        id: Some(entry.id),
        title: entry.title.clone(),
        text: render_markdown(&entry.text),
        created: format_created(&entry.created),
    }
}

pub fn format_created(created: &NaiveDateTime) -> String {
    created.format(CREATED_FORMAT).to_string()
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn check_title(title: &str) -> Result<(), AppError> {
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::bad_request(format!(
            "title must be at most {MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(())
}
