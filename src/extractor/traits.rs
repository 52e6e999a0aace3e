use crate::extractor::models::VideoInfo;
use crate::utils::error::GatewayError;
use async_trait::async_trait;
use std::time::Duration;

/// Core trait for video extractors
///
/// This trait isolates the gateway from the specific extraction backend
/// (yt-dlp subprocess, mock, etc.) so the HTTP layer can be tested without
/// touching the network.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns a unique identifier for this extractor (e.g., "ytdlp", "mock")
    fn id(&self) -> &'static str;

    /// Backend version string, when the backend can report one
    fn version(&self) -> Option<String> {
        None
    }

    /// Extracts video metadata without downloading any media
    ///
    /// `format_expr` is the backend's format-selection expression; `timeout`
    /// bounds the whole call when the caller is latency-sensitive.
    async fn extract(
        &self,
        url: &str,
        format_expr: &str,
        timeout: Option<Duration>,
    ) -> Result<VideoInfo, GatewayError>;
}
