// src/picker.rs
use crate::error::{PickerError, ProviderError};
use crate::models::Video;
use crate::pexels_client::{PexelsVideoFile, PexelsVideoResponse, SearchQuery, VideoSearch};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};

/// Topics the random search draws from.
pub const SEARCH_TERMS: [&str; 30] = [
    "nature", "city", "animals", "technology", "people",
    "weather", "water", "mountains", "space", "abstract",
    "food", "travel", "sports", "music", "sunset",
    "ocean", "forest", "sky", "urban", "garden",
    "birds", "flowers", "landscape", "sunrise", "traffic",
    "beach", "snow", "rain", "wind", "clouds",
];

pub const RESULTS_PER_PAGE: u32 = 80;
pub const MAX_PAGE: u32 = 5;

/// Picks one random stock video per call.
///
/// The generator is shared by every call and is only locked while drawing,
/// never across the provider request.
pub struct VideoPicker<R = StdRng> {
    search: Arc<dyn VideoSearch>,
    rng: Mutex<R>,
}

impl VideoPicker<StdRng> {
    /// Seeds the generator once from OS entropy.
    pub fn new(search: Arc<dyn VideoSearch>) -> Self {
        Self::with_rng(search, StdRng::from_entropy())
    }
}

impl<R: Rng + Send> VideoPicker<R> {
    pub fn with_rng(search: Arc<dyn VideoSearch>, rng: R) -> Self {
        Self {
            search,
            rng: Mutex::new(rng),
        }
    }

    pub async fn fetch_random_video(&self) -> Result<Video, PickerError> {
        let query = self.draw_query();
        let reply = self.search.search(&query).await?;

        if !reply.is_success() {
            return Err(ProviderError::Status {
                status: reply.status,
                body: reply.body,
            }
            .into());
        }

        let mut response: PexelsVideoResponse = serde_json::from_str(&reply.body)?;
        if response.videos.is_empty() {
            return Err(PickerError::EmptyResult {
                term: query.term.to_string(),
            });
        }

        let index = self.draw(|rng| rng.gen_range(0..response.videos.len()));
        let chosen = response.videos.swap_remove(index);

        let video_url = resolve_video_link(&chosen.video_files)
            .ok_or(PickerError::NoPlayableFile)?
            .to_string();

        Ok(Video {
            title: format!("{} Video", query.term),
            photographer: chosen.photographer_name().to_string(),
            duration: chosen.duration,
            video_url,
            thumbnail: chosen.image,
            width: chosen.width,
            height: chosen.height,
        })
    }

    fn draw_query(&self) -> SearchQuery {
        self.draw(|rng| SearchQuery {
            term: SEARCH_TERMS[rng.gen_range(0..SEARCH_TERMS.len())],
            per_page: RESULTS_PER_PAGE,
            page: rng.gen_range(1..=MAX_PAGE),
        })
    }

    fn draw<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        // A panic mid-draw leaves the generator usable
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut *rng)
    }
}

/// First file tagged "hd" or "sd" in list order, else the first file.
///
/// "hd" is not ranked above "sd": whichever comes first wins. Empty links
/// count as unresolved.
pub fn resolve_video_link(files: &[PexelsVideoFile]) -> Option<&str> {
    files
        .iter()
        .find(|f| matches!(f.quality.as_deref(), Some("hd") | Some("sd")))
        .map(|f| f.link.as_str())
        .filter(|l| !l.is_empty())
        .or_else(|| files.first().map(|f| f.link.as_str()).filter(|l| !l.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pexels_client::SearchReply;
    use async_trait::async_trait;

    fn file(quality: &str, link: &str) -> PexelsVideoFile {
        PexelsVideoFile {
            quality: Some(quality.to_string()),
            link: link.to_string(),
            ..Default::default()
        }
    }

    struct CannedSearch {
        status: u16,
        body: String,
        queries: Mutex<Vec<SearchQuery>>,
    }

    impl CannedSearch {
        fn new(status: u16, body: impl Into<String>) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.into(),
                queries: Mutex::new(Vec::new()),
            })
        }

        fn queries(&self) -> Vec<SearchQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VideoSearch for CannedSearch {
        async fn search(&self, query: &SearchQuery) -> Result<SearchReply, PickerError> {
            self.queries.lock().unwrap().push(*query);
            Ok(SearchReply {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    fn picker(search: Arc<CannedSearch>) -> VideoPicker<StdRng> {
        VideoPicker::with_rng(search, StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_first_hd_or_sd_wins() {
        let files = vec![file("4k", "K"), file("sd", "A"), file("hd", "B")];
        assert_eq!(resolve_video_link(&files), Some("A"));
    }

    #[test]
    fn test_falls_back_to_first_file() {
        let files = vec![file("4k", "Z"), file("uhd", "Y")];
        assert_eq!(resolve_video_link(&files), Some("Z"));
    }

    #[test]
    fn test_empty_preferred_link_falls_back() {
        let files = vec![file("uhd", "first"), file("hd", "")];
        assert_eq!(resolve_video_link(&files), Some("first"));

        let files = vec![file("hd", "")];
        assert_eq!(resolve_video_link(&files), None);
    }

    #[test]
    fn test_missing_quality_is_not_preferred() {
        let files = vec![
            PexelsVideoFile {
                link: "hls".to_string(),
                ..Default::default()
            },
            file("hd", "B"),
        ];
        assert_eq!(resolve_video_link(&files), Some("B"));
    }

    #[test]
    fn test_no_files_resolves_nothing() {
        assert_eq!(resolve_video_link(&[]), None);
    }

    #[tokio::test]
    async fn test_empty_file_list_fails() {
        let body = r#"{"videos": [{"id": 1, "width": 1, "height": 1, "duration": 1, "image": "t", "photographer": "p", "video_files": []}]}"#;
        let result = picker(CannedSearch::new(200, body)).fetch_random_video().await;
        assert!(matches!(result, Err(PickerError::NoPlayableFile)));
    }

    #[tokio::test]
    async fn test_empty_results_name_the_term() {
        let search = CannedSearch::new(200, r#"{"videos": []}"#);
        let err = picker(search.clone()).fetch_random_video().await.unwrap_err();

        let term = search.queries()[0].term;
        match &err {
            PickerError::EmptyResult { term: reported } => assert_eq!(reported, term),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains(term));
    }

    #[tokio::test]
    async fn test_missing_or_null_videos_are_empty_results() {
        for body in [r#"{"videos": null}"#, "{}"] {
            let search = CannedSearch::new(200, body);
            let err = picker(search.clone()).fetch_random_video().await.unwrap_err();

            let term = search.queries()[0].term;
            match &err {
                PickerError::EmptyResult { term: reported } => assert_eq!(reported, term),
                other => panic!("unexpected error for {body}: {other:?}"),
            }
            assert_eq!(err.to_string(), format!("no videos found for search term: {term}"));
        }
    }

    #[tokio::test]
    async fn test_non_200_success_code_is_status_error() {
        let err = picker(CannedSearch::new(204, "")).fetch_random_video().await.unwrap_err();
        assert_eq!(err.provider_status(), Some(204));
        assert!(matches!(
            err,
            PickerError::Provider(ProviderError::Status { status: 204, .. })
        ));
    }

    #[tokio::test]
    async fn test_null_dimensions_pass_through_as_zero() {
        let body = r#"{"videos": [{"width": null, "height": null, "duration": null, "image": "t",
            "photographer": "p", "video_files": [{"quality": "sd", "link": "L"}]}]}"#;
        let video = picker(CannedSearch::new(200, body)).fetch_random_video().await.unwrap();
        assert_eq!((video.width, video.height, video.duration), (0, 0, 0));
        assert_eq!(video.video_url, "L");
    }

    #[tokio::test]
    async fn test_non_success_status_is_provider_error() {
        let search = CannedSearch::new(429, "slow down");
        let err = picker(search).fetch_random_video().await.unwrap_err();

        assert_eq!(err.provider_status(), Some(429));
        match err {
            PickerError::Provider(ProviderError::Status { status, body }) => {
                assert_eq!(status, 429);
                assert_eq!(body, "slow down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_provider_error() {
        let err = picker(CannedSearch::new(200, "<html>"))
            .fetch_random_video()
            .await
            .unwrap_err();
        assert!(matches!(err, PickerError::Provider(ProviderError::Decode(_))));
    }

    #[tokio::test]
    async fn test_fields_pass_through() {
        let body = r#"{"videos": [{
            "id": 42, "width": 3840, "height": 2160, "duration": 17,
            "image": "https://images/thumb.jpg", "photographer": "Sam Lee",
            "video_files": [
                {"quality": "uhd", "link": "https://cdn/uhd.mp4"},
                {"quality": "hd", "link": "https://cdn/hd.mp4"}
            ]
        }]}"#;
        let search = CannedSearch::new(200, body);
        let video = picker(search.clone()).fetch_random_video().await.unwrap();

        let term = search.queries()[0].term;
        assert_eq!(video.title, format!("{term} Video"));
        assert_eq!(video.photographer, "Sam Lee");
        assert_eq!(video.duration, 17);
        assert_eq!(video.thumbnail, "https://images/thumb.jpg");
        assert_eq!(video.width, 3840);
        assert_eq!(video.height, 2160);
        assert_eq!(video.video_url, "https://cdn/hd.mp4");
    }

    #[tokio::test]
    async fn test_random_draws_stay_in_bounds() {
        let search = CannedSearch::new(200, r#"{"videos": []}"#);
        let picker = picker(search.clone());

        for _ in 0..300 {
            let _ = picker.fetch_random_video().await;
        }

        let queries = search.queries();
        assert_eq!(queries.len(), 300);
        for query in &queries {
            assert!(SEARCH_TERMS.contains(&query.term));
            assert!((1..=MAX_PAGE).contains(&query.page));
            assert_eq!(query.per_page, RESULTS_PER_PAGE);
        }
        for page in 1..=MAX_PAGE {
            assert!(queries.iter().any(|q| q.page == page), "page {page} never drawn");
        }
    }
}
