//! Vidgate library

pub mod extractor;
pub mod gateway;
pub mod server;
pub mod utils;

// Re-export main types for easier use
pub use extractor::{Extractor, Format, MockExtractor, VideoInfo, YtDlpExtractor};
pub use gateway::{ExtractionGateway, ExtractionSummary, StreamTarget};
pub use server::{build_router, AppState};
pub use utils::{GatewayError, SelectionPolicy, ServerConfig};
