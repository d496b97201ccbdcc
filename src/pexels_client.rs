// src/pexels_client.rs
use crate::config::DEFAULT_PEXELS_API_URL;
use crate::error::PickerError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Hard ceiling for a single search call. There is no retry on expiry.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Pexels sends `null` for absent values. Treat it like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PexelsVideoResponse {
    #[serde(default)]
    pub page: Option<i32>,
    #[serde(default)]
    pub per_page: Option<i32>,
    #[serde(default)]
    pub total_results: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: Vec<PexelsVideo>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PexelsVideo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub photographer: String,
    #[serde(default)]
    pub user: Option<PexelsUser>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub video_files: Vec<PexelsVideoFile>,
}

impl PexelsVideo {
    /// The API nests the author under `user`; older payloads carry a flat `photographer`.
    pub fn photographer_name(&self) -> &str {
        if !self.photographer.is_empty() {
            return &self.photographer;
        }
        self.user.as_ref().map(|u| u.name.as_str()).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PexelsVideoFile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default, alias = "type")]
    pub file_type: Option<String>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct PexelsUser {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// Parameters of one `/videos/search` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: &'static str,
    pub per_page: u32,
    pub page: u32,
}

/// Raw provider answer. Status and body are interpreted by the caller.
#[derive(Debug, Clone)]
pub struct SearchReply {
    pub status: u16,
    pub body: String,
}

impl SearchReply {
    /// Only a plain 200 carries a search result; any other code is reported as-is.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchReply, PickerError>;
}

#[derive(Debug, Clone)]
pub struct PexelsClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl PexelsClient {
    pub fn new(api_key: Option<String>) -> Result<Self, reqwest::Error> {
        Self::with_base_url(api_key, DEFAULT_PEXELS_API_URL)
    }

    pub fn with_base_url(
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        Self::with_timeout(api_key, base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        api_key: Option<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl VideoSearch for PexelsClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchReply, PickerError> {
        debug!(
            "Searching Pexels for videos: '{}' (page {}, {} per page)",
            query.term, query.page, query.per_page
        );

        let mut request = self
            .client
            .get(format!("{}/videos/search", self.base_url))
            .query(&[
                ("query", query.term.to_string()),
                ("per_page", query.per_page.to_string()),
                ("page", query.page.to_string()),
            ]);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", key);
        }

        let response = request.send().await?;
        let status = response.status();

        let body = if status == StatusCode::OK {
            response.text().await?
        } else {
            // Error bodies are diagnostic only
            response.text().await.unwrap_or_else(|e| {
                warn!("Failed to read Pexels error body: {}", e);
                String::new()
            })
        };

        Ok(SearchReply {
            status: status.as_u16(),
            body,
        })
    }
}
