pub mod selection;
pub mod service;

pub use service::{ExtractionGateway, ExtractionSummary, StreamTarget};
