use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type EntryId = u64;

/// Longest title the journal accepts, in characters.
pub const MAX_TITLE_CHARS: usize = 127;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredEntry {
    pub id: EntryId,
    pub title: String,
    /// Markdown source as typed by the author.
    pub text: String,
    pub created: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalData {
    pub next_id: EntryId,
    pub entries: BTreeMap<EntryId, StoredEntry>,
}

impl Default for JournalData {
    fn default() -> Self {
        Self {
            next_id: 1,
            entries: BTreeMap::new(),
        }
    }
}

/// The entry record exchanged with the browser.
///
/// `text` is already rendered HTML. Every field is optional on the way in so a
/// short response still renders, with empty placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalEntry {
    pub id: Option<EntryId>,
    pub title: String,
    pub text: String,
    pub created: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntryForm {
    pub title: String,
    pub text: String,
}

/// Payload of `POST /edit`.
///
/// `id` stays a string on the wire: a form without a known target still sends
/// the field, empty, and the server answers 400.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditEntryForm {
    pub id: String,
    pub title: String,
    pub text: String,
}

impl EditEntryForm {
    pub fn new(target: Option<EntryId>, title: String, text: String) -> Self {
        Self {
            id: target.map(|id| id.to_string()).unwrap_or_default(),
            title,
            text,
        }
    }
}
