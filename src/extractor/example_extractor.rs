use crate::error::EstatError;
use crate::extractor::parser::parse_example_table;
use crate::runtime::config::EstatConfig;
use crate::runtime::fetcher::{FetchRequest, Fetcher};
use crate::types::{ExampleRecord, RevisionMapping, JSIC_CLASSIFICATION_TYPE};

pub fn example_url(config: &EstatConfig, revision_code: &str, code: &str) -> String {
    format!(
        "{}/{JSIC_CLASSIFICATION_TYPE}/{}/{}",
        config.terms_url.trim_end_matches('/'),
        urlencoding::encode(revision_code),
        urlencoding::encode(code)
    )
}

/// Scrapes the example and unsuitable-example cells of one code's terms page.
pub async fn extract_examples_for_code(
    fetcher: &dyn Fetcher,
    config: &EstatConfig,
    code: &str,
    revision_code: &str,
    revision_mapping: &RevisionMapping,
) -> Result<ExampleRecord, EstatError> {
    let release_date = revision_mapping.release_date(revision_code)?.to_string();
    let fail = |reason: String| EstatError::ExampleFetch {
        code: code.to_string(),
        revision_code: revision_code.to_string(),
        reason,
    };

    let request = FetchRequest::get(
        example_url(config, revision_code, code),
        config.example_timeout(),
    );
    tracing::debug!("[EStat] Fetching examples from {}", request.url);

    let html = fetcher.fetch(&request).await.map_err(fail)?;
    let cells = parse_example_table(&html).map_err(fail)?;

    Ok(ExampleRecord {
        code: code.to_string(),
        example: cells.example,
        unsuitable_example: cells.unsuitable_example,
        release_date,
    })
}
