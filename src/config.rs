use std::{env, io, path::PathBuf};
use thiserror::Error;
use tokio::net::TcpListener;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_DATA_PATH: &str = "data/journal.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {reason}")]
    InvalidPort { value: String, reason: String },

    #[error("invalid HOST value {value:?}")]
    InvalidHost { value: String },
}

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    /// Where [`crate::HttpJournalClient`] sends requests.
    pub base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|err| ConfigError::InvalidPort {
                    reason: err.to_string(),
                    value,
                })?,
            None => DEFAULT_PORT,
        };
        if port == 0 {
            return Err(ConfigError::InvalidPort {
                value: "0".to_string(),
                reason: "port must be between 1 and 65535".to_string(),
            });
        }

        let host = match lookup("HOST") {
            Some(value) if value.trim().is_empty() || value.contains(char::is_whitespace) => {
                return Err(ConfigError::InvalidHost { value });
            }
            Some(value) => value,
            None => DEFAULT_HOST.to_string(),
        };
        let data_path = lookup("JOURNAL_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let base_url = lookup("JOURNAL_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://127.0.0.1:{port}"));

        Ok(Self {
            host,
            port,
            data_path,
            base_url,
        })
    }

    /// Binds the listener. `host` may be an IP literal or a name such as
    /// `localhost`; names are resolved and the first address that binds wins.
    pub async fn bind(&self) -> io::Result<TcpListener> {
        TcpListener::bind((self.host.as_str(), self.port)).await
    }
}
