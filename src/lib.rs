pub mod app;
pub mod config;
pub mod controller;
pub mod errors;
pub mod fragments;
pub mod handlers;
pub mod journal;
pub mod markdown;
pub mod models;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use controller::{Controller, HttpJournalClient, JournalClient, MemoryPage, Page};
pub use state::AppState;
pub use storage::load_data;
