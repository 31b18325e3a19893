use crate::errors::AppError;
use crate::models::JournalData;
use std::path::Path;
use tokio::fs;
use tracing::{error, warn};

/// Loads the journal file, starting empty when it is missing or unreadable.
pub async fn load_data(path: &Path) -> JournalData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<JournalData>(&bytes) {
            Ok(mut data) => {
                let next = data.entries.keys().max().map_or(1, |id| id + 1);
                if data.next_id < next {
                    warn!("journal next_id {} behind stored entries, using {next}", data.next_id);
                    data.next_id = next;
                }
                data
            }
            Err(err) => {
                error!("failed to parse journal file: {err}");
                JournalData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => JournalData::default(),
        Err(err) => {
            error!("failed to read journal file: {err}");
            JournalData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &JournalData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data)?;
    fs::write(path, payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StoredEntry;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("journal_{name}_{}_{nanos}.json", std::process::id()))
    }

    fn entry(id: u64) -> StoredEntry {
        StoredEntry {
            id,
            title: format!("entry {id}"),
            text: "body".to_string(),
            created: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        }
    }

    #[tokio::test]
    async fn missing_file_loads_empty_journal() {
        let data = load_data(&scratch_path("missing")).await;
        assert!(data.entries.is_empty());
        assert_eq!(data.next_id, 1);
    }

    #[tokio::test]
    async fn persisted_journal_loads_back() {
        let path = scratch_path("persist");
        let mut data = JournalData::default();
        data.entries.insert(1, entry(1));
        data.next_id = 2;

        persist_data(&path, &data).await.unwrap();
        let loaded = load_data(&path).await;
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.next_id, 2);
        assert_eq!(loaded.entries.get(&1), Some(&entry(1)));
    }

    #[tokio::test]
    async fn stale_next_id_is_repaired() {
        let path = scratch_path("stale");
        let mut data = JournalData::default();
        data.entries.insert(4, entry(4));
        data.next_id = 2;

        persist_data(&path, &data).await.unwrap();
        let loaded = load_data(&path).await;
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.next_id, 5);
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty_journal() {
        let path = scratch_path("corrupt");
        std::fs::write(&path, b"{not json").unwrap();
        let loaded = load_data(&path).await;
        let _ = std::fs::remove_file(&path);

        assert!(loaded.entries.is_empty());
    }
}
