//! Vidgate - HTTP gateway for video extraction
//!
//! A thin HTTP service that resolves media page URLs to direct playback
//! URLs through a yt-dlp backend: JSON metadata on /extract, a 302
//! redirect on /stream.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};
use vidgate::extractor::YtDlpExtractor;
use vidgate::gateway::ExtractionGateway;
use vidgate::server::{build_router, AppState};
use vidgate::utils::config::ServerConfig;

#[derive(Parser)]
#[command(name = "vidgate", version, about = "HTTP gateway for video extraction")]
struct Args {
    /// Listening port (overrides the PORT environment variable)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut config = ServerConfig::from_env();
    if let Some(port) = args.port {
        config.port = port;
    }

    // A missing yt-dlp binary degrades the service instead of killing it:
    // the availability flag stays false and requests get explicit errors.
    let gateway = match YtDlpExtractor::new() {
        Ok(extractor) => Some(Arc::new(ExtractionGateway::new(
            Arc::new(extractor),
            config.policy.clone(),
        ))),
        Err(e) => {
            warn!("Extractor unavailable: {}", e);
            warn!("The server will run, but extraction requests will fail.");
            warn!("Install yt-dlp: pip install yt-dlp, or brew install yt-dlp");
            None
        }
    };

    let available = gateway.is_some();
    let state = AppState::new(config.clone(), gateway);
    let router = build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting vidgate on {}", addr);
    info!(
        "Extractor status: {}",
        if available { "available" } else { "unavailable" }
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
