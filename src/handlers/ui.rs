// src/handlers/ui.rs
use std::path::Path;
use tower_http::services::ServeDir;

/// Serves the player page and its assets. `/` maps to `index.html`.
pub fn static_files(dir: impl AsRef<Path>) -> ServeDir {
    ServeDir::new(dir.as_ref()).append_index_html_on_directories(true)
}
