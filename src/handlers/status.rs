// src/handlers/status.rs
use crate::AppState;
use axum::{extract::Extension, response::Json, routing::get, Router};
use serde_json::{json, Value};
use std::sync::Arc;

pub fn status_routes() -> Router {
    Router::new().route("/api/status", get(api_status))
}

async fn api_status(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": {
            "base_url": state.provider_base_url,
            "api_key_configured": state.api_key_configured
        },
        "endpoints": {
            "random": "/api/random",
            "status": "/api/status"
        }
    }))
}
