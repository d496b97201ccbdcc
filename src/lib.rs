// lib.rs - Random stock video backend
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pexels_client;
pub mod picker;

use axum::{Extension, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use config::Config;
pub use error::{ConfigError, PickerError, ProviderError};
pub use models::Video;
pub use pexels_client::{PexelsClient, SearchQuery, SearchReply, VideoSearch};
pub use picker::{resolve_video_link, VideoPicker, SEARCH_TERMS};

// Shared by every request handler
pub struct AppState {
    pub picker: VideoPicker,
    pub provider_base_url: String,
    pub api_key_configured: bool,
}

/// API routes first, everything else falls through to the static directory.
pub fn build_router(state: Arc<AppState>, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .merge(handlers::random::random_routes())
        .merge(handlers::status::status_routes())
        .fallback_service(handlers::ui::static_files(static_dir))
        .layer(axum::middleware::from_fn(middleware::logging::request_logging_middleware))
        .layer(CorsLayer::permissive())
        .layer(Extension(state))
}
