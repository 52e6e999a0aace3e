//! Shared application state

use crate::gateway::ExtractionGateway;
use crate::utils::config::ServerConfig;
use std::sync::Arc;

/// State shared by every request handler
///
/// The gateway is `None` when no extractor backend could be initialized at
/// startup; handlers surface that as an explicit unavailability response
/// instead of a process-wide failure.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub gateway: Option<Arc<ExtractionGateway>>,
}

impl AppState {
    pub fn new(config: ServerConfig, gateway: Option<Arc<ExtractionGateway>>) -> Self {
        Self { config, gateway }
    }

    /// Whether an extractor backend is wired in
    pub fn extractor_available(&self) -> bool {
        self.gateway.is_some()
    }

    /// Backend version string for /status, when one is known
    pub fn extractor_version(&self) -> Option<String> {
        self.gateway
            .as_ref()
            .and_then(|gw| gw.extractor().version())
    }
}
