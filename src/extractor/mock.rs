//! Canned extractor used for tests and wiring checks
//!
//! The gateway takes the `Extractor` trait, so the HTTP surface can be
//! exercised end to end with this backend instead of a live yt-dlp binary.

use crate::extractor::models::{Format, VideoInfo};
use crate::extractor::traits::Extractor;
use crate::utils::error::GatewayError;
use async_trait::async_trait;
use std::time::Duration;

/// What the mock should do when asked to extract
pub enum MockBehavior {
    /// Return the given metadata
    Succeed(VideoInfo),
    /// Fail with an extraction error carrying this message
    Fail(String),
}

/// Extractor that replays a fixed response
pub struct MockExtractor {
    behavior: MockBehavior,
}

impl MockExtractor {
    pub fn new(behavior: MockBehavior) -> Self {
        Self { behavior }
    }

    /// Mock with a plausible two-format response and a top-level URL
    pub fn with_sample_video() -> Self {
        Self::new(MockBehavior::Succeed(sample_video()))
    }

    /// Mock that fails every extraction with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fail(message.into()))
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    fn id(&self) -> &'static str {
        "mock"
    }

    fn version(&self) -> Option<String> {
        Some("mock".to_string())
    }

    async fn extract(
        &self,
        _url: &str,
        _format_expr: &str,
        _timeout: Option<Duration>,
    ) -> Result<VideoInfo, GatewayError> {
        match &self.behavior {
            MockBehavior::Succeed(info) => Ok(info.clone()),
            MockBehavior::Fail(msg) => Err(GatewayError::ExtractionError(msg.clone())),
        }
    }
}

/// Sample metadata mirroring a typical extractor response
pub fn sample_video() -> VideoInfo {
    VideoInfo {
        title: Some("Test Video".to_string()),
        duration: Some(180),
        view_count: Some(1000),
        uploader: Some("Test Channel".to_string()),
        url: Some("https://cdn.example.com/test-video.mp4".to_string()),
        ext: Some("mp4".to_string()),
        formats: vec![
            Format {
                format_id: Some("18".to_string()),
                ext: Some("mp4".to_string()),
                height: Some(360),
                url: Some("https://cdn.example.com/test-360.mp4".to_string()),
                vcodec: Some("h264".to_string()),
                ..Format::default()
            },
            Format {
                format_id: Some("22".to_string()),
                ext: Some("mp4".to_string()),
                height: Some(720),
                url: Some("https://cdn.example.com/test-720.mp4".to_string()),
                vcodec: Some("h264".to_string()),
                ..Format::default()
            },
        ],
    }
}
