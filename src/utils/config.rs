//! Server configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Format selection policy constants
///
/// The full extraction path and the low-latency redirect path use different
/// height caps and candidate-scan depths (720/5 vs 480/3). The original
/// service hardcoded both with no stated rationale beyond redirect speed, so
/// they are kept as configuration rather than derived requirements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionPolicy {
    /// Maximum vertical resolution for the full extraction path
    pub max_height: u32,

    /// Maximum vertical resolution for the low-latency redirect path
    pub stream_max_height: u32,

    /// How many candidates the extract path exposes for display
    pub display_limit: usize,

    /// How many candidates the redirect path scans for a fallback URL
    pub stream_scan_depth: usize,

    /// Hard timeout on the extractor call in the redirect path (seconds)
    pub stream_timeout_secs: u64,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            max_height: 720,
            stream_max_height: 480,
            display_limit: 5,
            stream_scan_depth: 3,
            stream_timeout_secs: 10,
        }
    }
}

impl SelectionPolicy {
    /// yt-dlp format expression for the full extraction path:
    /// mp4 capped at `max_height`, then anything capped, then best effort
    pub fn full_format_expr(&self) -> String {
        format!(
            "(mp4)[height<={h}]/best[height<={h}]/best",
            h = self.max_height
        )
    }

    /// yt-dlp format expression for the redirect path: smallest qualifying
    /// rendition first since resolution latency is user-facing
    pub fn stream_format_expr(&self) -> String {
        format!("worst[height<={}]/worst", self.stream_max_height)
    }

    pub fn stream_timeout(&self) -> Duration {
        Duration::from_secs(self.stream_timeout_secs)
    }
}

/// Server settings, loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listening port (`PORT`, default 8080)
    pub port: u16,

    /// Base URL advertised in proxy download links (`PUBLIC_BASE_URL`)
    pub public_base_url: String,

    /// Deployment environment name, surfaced read-only in /status
    pub environment: Option<String>,

    /// Format selection policy
    pub policy: SelectionPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", port));

        let environment = std::env::var("VIDGATE_ENVIRONMENT").ok();

        Self {
            port,
            public_base_url,
            environment,
            policy: SelectionPolicy::default(),
        }
    }

    /// Proxy download link routed back through this server's /stream endpoint
    pub fn proxy_stream_url(&self, video_url: &str) -> String {
        format!(
            "{}/stream?url={}",
            self.public_base_url.trim_end_matches('/'),
            urlencoding::encode(video_url)
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            public_base_url: "http://localhost:8080".to_string(),
            environment: None,
            policy: SelectionPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = SelectionPolicy::default();
        assert_eq!(policy.max_height, 720);
        assert_eq!(policy.stream_max_height, 480);
        assert_eq!(policy.display_limit, 5);
        assert_eq!(policy.stream_scan_depth, 3);
    }

    #[test]
    fn test_format_expressions() {
        let policy = SelectionPolicy::default();
        assert_eq!(
            policy.full_format_expr(),
            "(mp4)[height<=720]/best[height<=720]/best"
        );
        assert_eq!(policy.stream_format_expr(), "worst[height<=480]/worst");
    }

    #[test]
    fn test_proxy_stream_url_encodes_query() {
        let config = ServerConfig::default();
        let link = config.proxy_stream_url("https://example.com/watch?v=abc");
        assert_eq!(
            link,
            "http://localhost:8080/stream?url=https%3A%2F%2Fexample.com%2Fwatch%3Fv%3Dabc"
        );
    }

    #[test]
    fn test_proxy_stream_url_trims_trailing_slash() {
        let config = ServerConfig {
            public_base_url: "https://gateway.example.com/".to_string(),
            ..ServerConfig::default()
        };
        let link = config.proxy_stream_url("https://example.com/v");
        assert!(link.starts_with("https://gateway.example.com/stream?url="));
    }
}
