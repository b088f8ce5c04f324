//! HTTP client for the journal backend
//!
//! `JournalApi` is the seam the request worker talks through; `HttpJournalApi`
//! implements it over reqwest against `POST /chat` and `GET /derived/{category}`.

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::data::{ChatBody, ChatReply, DerivedLog, LogCategory};
use crate::error::{ApiError, ApiResult};

/// Backend serving chat turns and derived log summaries.
///
/// The request worker holds this behind an `Arc`, so implementations must be
/// shareable across tasks. Tests swap in scripted implementations.
#[async_trait::async_trait]
pub trait JournalApi: Send + Sync {
    /// Send one chat turn.
    ///
    /// # Arguments
    /// * `text` - Outbound text, already marker-prefixed if history is enabled
    async fn chat(&self, text: &str) -> ApiResult<ChatReply>;

    /// Fetch the derived summary for one log category.
    async fn derived_log(&self, category: LogCategory) -> ApiResult<DerivedLog>;
}

/// HTTP implementation talking to `{base}/chat` and `{base}/derived/{category}`
#[derive(Debug, Clone)]
pub struct HttpJournalApi {
    config: ClientConfig,
    client: HttpClient,
}

impl HttpJournalApi {
    pub fn new(config: &ClientConfig) -> Self {
        let builder = HttpClient::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent("Diarist Studio/0.1");
        let builder = if config.proxy {
            builder
        } else {
            builder.no_proxy()
        };

        let client = builder.build().unwrap_or_else(|e| {
            warn!("Failed to build HTTP client ({}), using defaults", e);
            HttpClient::new()
        });

        Self {
            config: config.clone(),
            client,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check the status and decode the JSON body
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Status {
                code: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            debug!("Undecodable body: {}", body);
            ApiError::Decode(e.to_string())
        })
    }
}

#[async_trait::async_trait]
impl JournalApi for HttpJournalApi {
    async fn chat(&self, text: &str) -> ApiResult<ChatReply> {
        let response = self
            .client
            .post(self.config.chat_url())
            .json(&ChatBody {
                text: text.to_string(),
            })
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn derived_log(&self, category: LogCategory) -> ApiResult<DerivedLog> {
        let response = self
            .client
            .get(self.config.derived_url(category))
            .send()
            .await?;

        Self::decode(response).await
    }
}
