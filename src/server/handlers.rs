//! Request handlers for the extraction gateway HTTP surface

use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

/// Body of /extract and /download requests
#[derive(Debug, Deserialize)]
pub struct VideoRequest {
    pub url: String,
    /// Quality hint, accepted for compatibility but unused in selection
    #[serde(default)]
    pub quality: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub url: String,
}

fn timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// GET / - service banner, never fails
pub async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "message": "vidgate extraction gateway",
        "status": "running",
        "extractor_available": state.extractor_available(),
        "version": env!("CARGO_PKG_VERSION"),
        "port": state.config.port,
        "timestamp": timestamp_ms(),
    }))
}

/// GET /health - health check, never fails
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let extractor_status = if state.extractor_available() {
        "available"
    } else {
        "unavailable"
    };
    Json(json!({
        "status": "healthy",
        "extractor_status": extractor_status,
        "timestamp": timestamp_ms(),
    }))
}

/// GET /status - server and environment info, never fails
pub async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "server": "vidgate",
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "extractor_version": state
            .extractor_version()
            .unwrap_or_else(|| "not_installed".to_string()),
        "environment": {
            "PORT": state.config.port,
            "ENVIRONMENT": state.config.environment,
        },
    }))
}

/// POST /extract - full metadata extraction
///
/// Internal failures are reported as HTTP 200 with `success: false`; only a
/// malformed input URL is rejected with a 4xx before the extractor runs.
pub async fn extract(
    State(state): State<AppState>,
    Json(request): Json<VideoRequest>,
) -> Response {
    let Some(gateway) = state.gateway.as_ref() else {
        return extraction_failure_body(&GatewayError::ExtractorUnavailable);
    };

    match gateway
        .extract(&request.url, request.quality.as_deref())
        .await
    {
        Ok(summary) => {
            let proxy_url = state.config.proxy_stream_url(&request.url);
            Json(json!({
                "success": true,
                "video_info": {
                    "title": summary.title,
                    "duration": summary.duration,
                    "view_count": summary.view_count,
                    "uploader": summary.uploader,
                    "formats": summary.formats,
                },
                "download_url": proxy_url.as_str(),
                "direct_url": proxy_url.as_str(),
                "proxy_url": proxy_url.as_str(),
                "selected_format": summary.selected_format,
                "message": "Video information extracted",
            }))
            .into_response()
        }
        Err(err @ GatewayError::InvalidUrl(_)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": err.to_string(),
                "message": "Invalid video URL",
            })),
        )
            .into_response(),
        Err(err) => {
            error!("Extraction failed: {}", err);
            extraction_failure_body(&err)
        }
    }
}

/// POST /download - hand out the proxy download link for a URL
pub async fn download(
    State(state): State<AppState>,
    Json(request): Json<VideoRequest>,
) -> Response {
    match crate::gateway::service::validate_url(&request.url) {
        Ok(_) => {
            let proxy_url = state.config.proxy_stream_url(&request.url);
            Json(json!({
                "success": true,
                "download_ready": true,
                "proxy_download_url": proxy_url.as_str(),
                "direct_url": proxy_url.as_str(),
                "message": "Proxy download URL ready",
            }))
            .into_response()
        }
        Err(err) => Json(json!({
            "success": false,
            "error": err.to_string(),
            "message": "Download preparation failed",
        }))
        .into_response(),
    }
}

/// GET /stream?url=... - resolve and redirect to a direct playback URL
pub async fn stream(
    State(state): State<AppState>,
    Query(query): Query<StreamQuery>,
) -> Response {
    let Some(gateway) = state.gateway.as_ref() else {
        error!("Stream requested but extractor is unavailable");
        return stream_error(&GatewayError::ExtractorUnavailable);
    };

    match gateway.resolve_stream(&query.url).await {
        Ok(target) => {
            info!("Redirecting stream request to resolved URL");
            match redirect_response(&target.url, &target.filename) {
                Ok(response) => response,
                Err(err) => stream_error(&err),
            }
        }
        Err(err) => {
            error!("Stream resolution failed: {}", err);
            stream_error(&err)
        }
    }
}

/// Build the 302 redirect carrying the attachment filename
///
/// Header values are validated rather than trusted; a URL or filename that
/// cannot be represented in a header becomes an `EncodingError`.
fn redirect_response(url: &str, filename: &str) -> Result<Response, GatewayError> {
    let location = HeaderValue::from_str(url)
        .map_err(|e| GatewayError::EncodingError(format!("location header: {}", e)))?;
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        .map_err(|e| GatewayError::EncodingError(format!("content-disposition header: {}", e)))?;

    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, location),
            (header::CONTENT_DISPOSITION, disposition),
        ],
    )
        .into_response())
}

/// 200 response with `success: false`, used by the JSON-returning endpoints
fn extraction_failure_body(err: &GatewayError) -> Response {
    Json(json!({
        "success": false,
        "error": err.to_string(),
        "message": "Video extraction failed",
    }))
    .into_response()
}

/// Status-coded JSON error for the redirect path
fn stream_error(err: &GatewayError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": err.to_string(),
        })),
    )
        .into_response()
}
