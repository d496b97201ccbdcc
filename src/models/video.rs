use serde::{Deserialize, Serialize};

/// Video metadata returned by `/api/random`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub title: String,
    pub photographer: String,
    pub duration: i32,
    pub video_url: String,
    pub thumbnail: String,
    pub width: i32,
    pub height: i32,
}
