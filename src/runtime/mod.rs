pub mod config;
pub mod fetcher;
pub mod logging;
