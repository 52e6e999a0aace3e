pub mod mock;
pub mod models;
pub mod traits;
pub mod ytdlp;

pub use mock::{MockBehavior, MockExtractor};
pub use models::{Format, VideoInfo};
pub use traits::Extractor;
pub use ytdlp::YtDlpExtractor;
