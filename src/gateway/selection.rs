//! Playback-URL selection policy
//!
//! Pure functions over an extractor response. Given the same response and
//! policy, every function here is deterministic, so selection outcomes are
//! reproducible across requests.

use crate::extractor::models::{Format, VideoInfo};
use crate::utils::config::SelectionPolicy;

/// Outcome of the full-extraction selection pass
#[derive(Debug, Clone)]
pub struct Selection {
    /// Chosen playback URL, empty when nothing qualified
    pub download_url: String,
    /// Note of the candidate that matched, "auto" for the extractor's own pick
    pub selected_format: String,
}

/// Pick the playback URL for the full extraction path
///
/// Applied in strict order, first match wins:
/// 1. the extractor's own top-level URL;
/// 2. first mp4 candidate within the height cap that carries a URL;
/// 3. first candidate within the cap with a URL and a non-"none" vcodec;
/// 4. nothing — empty URL.
pub fn choose_download_url(info: &VideoInfo, policy: &SelectionPolicy) -> Selection {
    if let Some(url) = info.url.as_deref().filter(|u| !u.is_empty()) {
        return Selection {
            download_url: url.to_string(),
            selected_format: "auto".to_string(),
        };
    }

    let mp4_match = info.formats.iter().find(|fmt| {
        fmt.ext.as_deref() == Some("mp4")
            && fmt.height.unwrap_or(0) <= policy.max_height
            && fmt.playback_url().is_some()
    });

    let fallback_match = mp4_match.or_else(|| {
        info.formats.iter().find(|fmt| {
            fmt.height.unwrap_or(0) <= policy.max_height
                && fmt.playback_url().is_some()
                && !fmt.is_audio_only()
        })
    });

    match fallback_match {
        Some(fmt) => Selection {
            download_url: fmt.playback_url().unwrap_or_default().to_string(),
            selected_format: fmt
                .format_note
                .clone()
                .unwrap_or_else(|| "auto".to_string()),
        },
        None => Selection {
            download_url: String::new(),
            selected_format: "auto".to_string(),
        },
    }
}

/// Candidates shown to the caller: within the first `display_limit` raw
/// entries, those that are not audio-only and carry a URL, source order
/// preserved. The window is sliced before filtering, so a qualifying
/// candidate past the window is never shown.
pub fn display_formats(formats: &[Format], policy: &SelectionPolicy) -> Vec<Format> {
    formats
        .iter()
        .take(policy.display_limit)
        .filter(|fmt| !fmt.is_audio_only() && fmt.playback_url().is_some())
        .cloned()
        .collect()
}

/// Pick the redirect target for the low-latency stream path
///
/// Simplified two-step scan: top-level URL, else the first of the first
/// `stream_scan_depth` candidates with any URL at all.
pub fn choose_stream_url<'a>(info: &'a VideoInfo, policy: &SelectionPolicy) -> Option<&'a str> {
    if let Some(url) = info.url.as_deref().filter(|u| !u.is_empty()) {
        return Some(url);
    }

    info.formats
        .iter()
        .take(policy.stream_scan_depth)
        .find_map(|fmt| fmt.playback_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(ext: &str, height: u32, url: &str, vcodec: &str) -> Format {
        Format {
            ext: Some(ext.to_string()),
            height: Some(height),
            url: Some(url.to_string()),
            vcodec: Some(vcodec.to_string()),
            ..Format::default()
        }
    }

    #[test]
    fn test_top_level_url_wins() {
        let info = VideoInfo {
            url: Some("https://a/top".to_string()),
            formats: vec![fmt("mp4", 360, "https://a/fmt", "h264")],
            ..VideoInfo::default()
        };
        let selection = choose_download_url(&info, &SelectionPolicy::default());
        assert_eq!(selection.download_url, "https://a/top");
        assert_eq!(selection.selected_format, "auto");
    }

    #[test]
    fn test_mp4_preferred_over_earlier_non_mp4() {
        // mp4 at position 2 beats webm at position 1
        let info = VideoInfo {
            formats: vec![
                fmt("webm", 360, "A", "vp9"),
                fmt("mp4", 480, "B", "h264"),
            ],
            ..VideoInfo::default()
        };
        let selection = choose_download_url(&info, &SelectionPolicy::default());
        assert_eq!(selection.download_url, "B");
    }

    #[test]
    fn test_non_mp4_fallback_when_no_mp4_qualifies() {
        let info = VideoInfo {
            formats: vec![
                fmt("mp4", 1080, "too-big", "h264"),
                fmt("webm", 480, "C", "vp9"),
            ],
            ..VideoInfo::default()
        };
        let selection = choose_download_url(&info, &SelectionPolicy::default());
        assert_eq!(selection.download_url, "C");
    }

    #[test]
    fn test_audio_only_skipped_in_fallback() {
        let info = VideoInfo {
            formats: vec![
                fmt("webm", 360, "audio", "none"),
                fmt("webm", 360, "video", "vp9"),
            ],
            ..VideoInfo::default()
        };
        let selection = choose_download_url(&info, &SelectionPolicy::default());
        assert_eq!(selection.download_url, "video");
    }

    #[test]
    fn test_empty_when_nothing_qualifies() {
        let info = VideoInfo {
            formats: vec![fmt("mp4", 2160, "4k-only", "h264")],
            ..VideoInfo::default()
        };
        let selection = choose_download_url(&info, &SelectionPolicy::default());
        assert_eq!(selection.download_url, "");
    }

    #[test]
    fn test_missing_height_counts_as_within_cap() {
        let info = VideoInfo {
            formats: vec![Format {
                ext: Some("mp4".to_string()),
                url: Some("no-height".to_string()),
                vcodec: Some("h264".to_string()),
                ..Format::default()
            }],
            ..VideoInfo::default()
        };
        let selection = choose_download_url(&info, &SelectionPolicy::default());
        assert_eq!(selection.download_url, "no-height");
    }

    #[test]
    fn test_display_formats_capped_and_ordered() {
        let formats: Vec<Format> = (0..8)
            .map(|i| fmt("mp4", 360, &format!("u{}", i), "h264"))
            .collect();
        let shown = display_formats(&formats, &SelectionPolicy::default());
        assert_eq!(shown.len(), 5);
        assert_eq!(shown[0].url.as_deref(), Some("u0"));
        assert_eq!(shown[4].url.as_deref(), Some("u4"));
    }

    #[test]
    fn test_display_formats_skip_audio_only_and_urlless() {
        let formats = vec![
            fmt("webm", 360, "audio", "none"),
            Format {
                ext: Some("mp4".to_string()),
                vcodec: Some("h264".to_string()),
                ..Format::default()
            },
            fmt("mp4", 480, "keep", "h264"),
        ];
        let shown = display_formats(&formats, &SelectionPolicy::default());
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].url.as_deref(), Some("keep"));
    }

    #[test]
    fn test_display_window_sliced_before_filtering() {
        // Six audio-only entries fill the window; the qualifying candidate
        // at position 7 is outside it and must not be shown
        let mut formats: Vec<Format> = (0..6)
            .map(|i| fmt("webm", 360, &format!("a{}", i), "none"))
            .collect();
        formats.push(fmt("mp4", 480, "past-window", "h264"));
        let shown = display_formats(&formats, &SelectionPolicy::default());
        assert!(shown.is_empty());
    }

    #[test]
    fn test_stream_scan_limited_to_depth() {
        let urlless = Format::default();
        let info = VideoInfo {
            formats: vec![
                urlless.clone(),
                urlless.clone(),
                urlless.clone(),
                fmt("mp4", 360, "past-depth", "h264"),
            ],
            ..VideoInfo::default()
        };
        assert_eq!(choose_stream_url(&info, &SelectionPolicy::default()), None);
    }

    #[test]
    fn test_stream_ignores_codec_and_height() {
        // The stream path takes anything with a URL, even audio-only 4k
        let info = VideoInfo {
            formats: vec![fmt("webm", 2160, "anything", "none")],
            ..VideoInfo::default()
        };
        assert_eq!(
            choose_stream_url(&info, &SelectionPolicy::default()),
            Some("anything")
        );
    }
}
