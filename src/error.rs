// src/error.rs
use thiserror::Error;

/// Failures talking to the stock video provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("error fetching from Pexels: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Pexels API error: status {status}, body: {body}")]
    Status { status: u16, body: String },
    #[error("error parsing Pexels response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum PickerError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("no videos found for search term: {term}")]
    EmptyResult { term: String },
    #[error("no valid video file found")]
    NoPlayableFile,
}

impl PickerError {
    /// HTTP status reported by the provider, if the failure came from one.
    pub fn provider_status(&self) -> Option<u16> {
        match self {
            PickerError::Provider(ProviderError::Status { status, .. }) => Some(*status),
            PickerError::Provider(ProviderError::Transport(e)) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PickerError {
    fn from(err: reqwest::Error) -> Self {
        PickerError::Provider(ProviderError::Transport(err))
    }
}

impl From<serde_json::Error> for PickerError {
    fn from(err: serde_json::Error) -> Self {
        PickerError::Provider(ProviderError::Decode(err))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid BIND_ADDR '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("PEXELS_API_URL must be an http(s) URL, got '{0}'")]
    InvalidApiUrl(String),
}
