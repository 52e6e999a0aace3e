//! Error handling for Vidgate

use thiserror::Error;

/// Main error type for Vidgate
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to extract video info: {0}")]
    ExtractionError(String),

    #[error("No streamable URL found: {0}")]
    NotFound(String),

    #[error("Header encoding error: {0}")]
    EncodingError(String),

    #[error("Extractor service unavailable")]
    ExtractorUnavailable,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl GatewayError {
    /// HTTP status code the request boundary should report for this error
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::InvalidUrl(_) => 400,
            GatewayError::NotFound(_) => 404,
            GatewayError::YtDlpNotFound | GatewayError::ExtractorUnavailable => 503,
            GatewayError::ExtractionError(_)
            | GatewayError::EncodingError(_)
            | GatewayError::IoError(_)
            | GatewayError::SerializationError(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(GatewayError::InvalidUrl("x".into()).status_code(), 400);
        assert_eq!(GatewayError::NotFound("x".into()).status_code(), 404);
        assert_eq!(GatewayError::ExtractorUnavailable.status_code(), 503);
        assert_eq!(GatewayError::ExtractionError("x".into()).status_code(), 500);
        assert_eq!(GatewayError::EncodingError("x".into()).status_code(), 500);
    }
}
