//! The extraction gateway: validates input, calls the extractor, applies
//! the selection policy, and shapes the result for the HTTP layer

use crate::extractor::models::Format;
use crate::extractor::traits::Extractor;
use crate::gateway::selection;
use crate::utils::config::SelectionPolicy;
use crate::utils::error::GatewayError;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};
use url::Url;

/// Result of the full extraction operation
#[derive(Debug, Clone)]
pub struct ExtractionSummary {
    pub title: String,
    pub duration: Option<u64>,
    pub view_count: Option<u64>,
    pub uploader: String,
    pub formats: Vec<Format>,
    /// Chosen playback URL, empty when no candidate qualified
    pub download_url: String,
    pub selected_format: String,
}

/// Result of the low-latency stream resolution
#[derive(Debug, Clone)]
pub struct StreamTarget {
    /// Direct playback URL to redirect to
    pub url: String,
    /// Suggested attachment filename, guaranteed ASCII
    pub filename: String,
}

/// Stateless gateway around an [`Extractor`] backend
///
/// Holds no mutable state, so a single instance is shared across requests.
pub struct ExtractionGateway {
    extractor: Arc<dyn Extractor>,
    policy: SelectionPolicy,
}

impl ExtractionGateway {
    pub fn new(extractor: Arc<dyn Extractor>, policy: SelectionPolicy) -> Self {
        Self { extractor, policy }
    }

    pub fn extractor(&self) -> &Arc<dyn Extractor> {
        &self.extractor
    }

    /// Extract metadata and pick a playback URL for the given media URL
    ///
    /// The quality hint is accepted for API compatibility but does not
    /// participate in selection.
    pub async fn extract(
        &self,
        url: &str,
        _quality_hint: Option<&str>,
    ) -> Result<ExtractionSummary, GatewayError> {
        validate_url(url)?;
        info!("Extracting video info: {}", url);

        let info = self
            .extractor
            .extract(url, &self.policy.full_format_expr(), None)
            .await?;

        let selection = selection::choose_download_url(&info, &self.policy);
        debug!(
            "Selected download URL ({}): {}",
            selection.selected_format,
            if selection.download_url.is_empty() {
                "<none>"
            } else {
                "found"
            }
        );

        Ok(ExtractionSummary {
            title: info.title_or_default(),
            duration: info.duration,
            view_count: info.view_count,
            uploader: info.uploader_or_default(),
            formats: selection::display_formats(&info.formats, &self.policy),
            download_url: selection.download_url,
            selected_format: selection.selected_format,
        })
    }

    /// Resolve a redirect target for the given media URL, optimized for
    /// latency rather than quality
    pub async fn resolve_stream(&self, url: &str) -> Result<StreamTarget, GatewayError> {
        validate_url(url)?;
        info!("Fast stream resolution for: {}", truncate(url, 50));

        let info = self
            .extractor
            .extract(
                url,
                &self.policy.stream_format_expr(),
                Some(self.policy.stream_timeout()),
            )
            .await?;

        let stream_url = selection::choose_stream_url(&info, &self.policy)
            .ok_or_else(|| GatewayError::NotFound("no streamable URL for this video".into()))?
            .to_string();

        let ext = info.ext.as_deref().unwrap_or("mp4");
        let filename = stream_filename(ext, unix_timestamp_secs())?;
        debug!("Resolved stream target with filename: {}", filename);

        Ok(StreamTarget {
            url: stream_url,
            filename,
        })
    }
}

/// Reject anything that is not an absolute http(s) URL before the extractor
/// is ever called
pub fn validate_url(url: &str) -> Result<(), GatewayError> {
    let parsed = Url::parse(url).map_err(|e| GatewayError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(GatewayError::InvalidUrl(format!(
            "unsupported scheme: {}",
            other
        ))),
    }
}

/// Synthesize the attachment filename, restricted to ASCII so it can never
/// produce a malformed header value
fn stream_filename(ext: &str, timestamp: u64) -> Result<String, GatewayError> {
    if !ext.is_ascii() || ext.contains(['"', '\\', '/', ';']) {
        return Err(GatewayError::EncodingError(format!(
            "extension not representable in a header: {:?}",
            ext
        )));
    }
    Ok(format!("video_{}.{}", timestamp, ext))
}

fn unix_timestamp_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
