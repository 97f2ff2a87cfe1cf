use crate::error::{DownloadError, DownloadFailure, EstatError};
use crate::extractor::parser::parse_master_csv;
use crate::runtime::config::EstatConfig;
use crate::runtime::fetcher::{FetchRequest, Fetcher};
use crate::types::RawTable;

/// Downloads and parses the classification master for one revision.
///
/// Fails with a download error when the request fails, the body is blank, or
/// the body is not the expected CSV.
pub async fn download_classification_master(
    fetcher: &dyn Fetcher,
    config: &EstatConfig,
    classification_type: &str,
    revision_code: &str,
) -> Result<RawTable, EstatError> {
    let fail = |failure| DownloadError::new(classification_type, revision_code, failure);

    let request = FetchRequest::get(&config.master_url, config.master_timeout())
        .with_param("bKbn", classification_type)
        .with_param("kaiteiCode", revision_code)
        .with_param("charset", "UTF-8");

    tracing::info!(
        "[EStat] Downloading master classification_type={} revision_code={}",
        classification_type,
        revision_code
    );

    let text = fetcher
        .fetch(&request)
        .await
        .map_err(|e| fail(DownloadFailure::Request(e)))?;

    if text.trim().is_empty() {
        return Err(fail(DownloadFailure::EmptyResponse).into());
    }

    let rows = parse_master_csv(&text).map_err(|e| fail(DownloadFailure::Parse(e)))?;
    let table = RawTable::new(rows)?;

    tracing::info!(
        "[EStat] Downloaded {} rows for classification_type={} revision_code={}",
        table.len(),
        classification_type,
        revision_code
    );
    Ok(table)
}
