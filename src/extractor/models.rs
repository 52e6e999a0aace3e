//! Data structures for video information

use serde::{Deserialize, Serialize};

/// Video information structure, deserialized from extractor JSON output
///
/// Every field is defaulted: the extractor reports wildly different subsets
/// of metadata depending on the source site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub uploader: Option<String>,
    /// Direct playback URL picked by the extractor itself, when present
    #[serde(default)]
    pub url: Option<String>,
    /// Container extension of the extractor-selected format
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub formats: Vec<Format>,
}

impl VideoInfo {
    /// Title with the placeholder applied when the extractor reported none
    pub fn title_or_default(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| "Unknown Title".to_string())
    }

    /// Uploader with the placeholder applied when the extractor reported none
    pub fn uploader_or_default(&self) -> String {
        self.uploader
            .clone()
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// One available encoded rendition of the source media
///
/// Candidate order is extractor-defined and not necessarily quality-ranked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Format {
    #[serde(default)]
    pub format_id: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub format_note: Option<String>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl Format {
    /// A candidate is audio-only when its video codec is explicitly "none"
    pub fn is_audio_only(&self) -> bool {
        self.vcodec.as_deref() == Some("none")
    }

    /// Playback URL, if present and non-empty
    pub fn playback_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_sparse_format() {
        let fmt: Format = serde_json::from_str(r#"{"format_id": "18"}"#).unwrap();
        assert_eq!(fmt.format_id.as_deref(), Some("18"));
        assert!(fmt.url.is_none());
        assert!(!fmt.is_audio_only());
    }

    #[test]
    fn test_audio_only_detection() {
        let fmt: Format =
            serde_json::from_str(r#"{"vcodec": "none", "url": "https://a/audio"}"#).unwrap();
        assert!(fmt.is_audio_only());

        let fmt: Format = serde_json::from_str(r#"{"vcodec": "h264"}"#).unwrap();
        assert!(!fmt.is_audio_only());
    }

    #[test]
    fn test_empty_url_is_no_playback_url() {
        let fmt = Format {
            url: Some(String::new()),
            ..Format::default()
        };
        assert!(fmt.playback_url().is_none());
    }

    #[test]
    fn test_deserialize_info_with_unknown_fields() {
        let info: VideoInfo = serde_json::from_str(
            r#"{"title": "t", "formats": [], "webpage_url": "https://x", "fps": 30}"#,
        )
        .unwrap();
        assert_eq!(info.title_or_default(), "t");
        assert_eq!(info.uploader_or_default(), "Unknown");
    }
}
