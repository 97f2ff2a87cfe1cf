pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod processor;
pub mod runtime;
pub mod types;

pub use error::{DownloadError, DownloadFailure, EstatError};
