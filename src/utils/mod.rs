pub mod config;
pub mod error;

pub use config::{SelectionPolicy, ServerConfig};
pub use error::GatewayError;
