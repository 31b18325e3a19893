use crate::config::Config;
use crate::models::{EditEntryForm, JournalEntry, NewEntryForm};
use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response was not an entry record: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Network side of the controller.
#[async_trait]
pub trait JournalClient: Send + Sync {
    /// `POST /add`
    async fn create(&self, form: &NewEntryForm) -> Result<JournalEntry, ClientError>;

    /// `POST /edit`
    async fn update(&self, form: &EditEntryForm) -> Result<JournalEntry, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpJournalClient {
    http: Client,
    base_url: String,
}

impl HttpJournalClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_form<T: Serialize + Sync>(
        &self,
        path: &str,
        form: &T,
    ) -> Result<JournalEntry, ClientError> {
        let url = format!("{}{path}", self.base_url);
        debug!("POST {url}");
        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(ClientError::Decode)
    }
}

#[async_trait]
impl JournalClient for HttpJournalClient {
    async fn create(&self, form: &NewEntryForm) -> Result<JournalEntry, ClientError> {
        self.post_form("/add", form).await
    }

    async fn update(&self, form: &EditEntryForm) -> Result<JournalEntry, ClientError> {
        self.post_form("/edit", form).await
    }
}
