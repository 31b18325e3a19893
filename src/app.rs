use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/detail/:id", get(handlers::detail))
        .route("/add", post(handlers::add))
        .route("/edit", post(handlers::edit))
        .route("/static/journal.js", get(handlers::script))
        .with_state(state)
}
