pub mod example_extractor;
pub mod master_downloader;
pub mod parser;

pub use example_extractor::extract_examples_for_code;
pub use master_downloader::download_classification_master;
