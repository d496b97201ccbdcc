// src/handlers/random.rs
use crate::AppState;
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

pub fn random_routes() -> Router {
    Router::new().route("/api/random", get(random_video))
}

/// Pick a random stock video. Any picker failure becomes a plain-text 500.
async fn random_video(Extension(state): Extension<Arc<AppState>>) -> Response {
    match state.picker.fetch_random_video().await {
        Ok(video) => {
            tracing::debug!(title = %video.title, video_url = %video.video_url, "picked random video");
            Json(video).into_response()
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                provider_status = ?e.provider_status(),
                "failed to fetch random video"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error fetching video: {}", e),
            )
                .into_response()
        }
    }
}
