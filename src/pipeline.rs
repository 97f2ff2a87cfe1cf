use crate::error::EstatError;
use crate::extractor::{download_classification_master, extract_examples_for_code};
use crate::processor::flat_master::{create_flat_master_table, DivisionRanges};
use crate::runtime::config::EstatConfig;
use crate::runtime::fetcher::Fetcher;
use crate::runtime::logging::{log_event, LogLevel};
use crate::types::{ExampleRecord, FlatMasterRow, JSIC_CLASSIFICATION_TYPE};

/// Downloads one JSIC revision and flattens it into one row per class code.
///
/// Division spans come from the configuration when the revision has them,
/// otherwise from the row order of the download.
pub async fn build_jsic_flat_master(
    fetcher: &dyn Fetcher,
    config: &EstatConfig,
    revision_code: &str,
) -> Result<Vec<FlatMasterRow>, EstatError> {
    let started_at = chrono::Utc::now();

    let raw = download_classification_master(
        fetcher,
        config,
        JSIC_CLASSIFICATION_TYPE,
        revision_code,
    )
    .await?
    .cleaned();

    let divisions = match config.division_ranges_for(revision_code)? {
        Some(divisions) => divisions,
        None => {
            tracing::debug!(
                "[EStat] No configured division ranges for revision {}, using row order",
                revision_code
            );
            DivisionRanges::from_input_order(&raw)?
        }
    };

    let flat = create_flat_master_table(&raw, &divisions)?;

    log_event(
        LogLevel::Info,
        "flat master built",
        Some(serde_json::json!({
            "revisionCode": revision_code,
            "rawRows": raw.len(),
            "classRows": flat.len(),
            "startedAt": started_at.to_rfc3339(),
            "elapsedMs": (chrono::Utc::now() - started_at).num_milliseconds(),
        })),
    );
    Ok(flat)
}

/// Looks up examples for each code in turn. The first failure stops the run.
pub async fn collect_examples(
    fetcher: &dyn Fetcher,
    config: &EstatConfig,
    revision_code: &str,
    codes: &[String],
) -> Result<Vec<ExampleRecord>, EstatError> {
    let mut records = Vec::with_capacity(codes.len());

    for code in codes {
        match extract_examples_for_code(fetcher, config, code, revision_code, &config.revisions)
            .await
        {
            Ok(record) => records.push(record),
            Err(err) => {
                log_event(
                    LogLevel::Error,
                    "example lookup failed",
                    Some(serde_json::json!({ "code": code, "error": err.to_string() })),
                );
                return Err(err);
            }
        }
    }

    tracing::info!(
        "[EStat] Collected examples for {} codes (revision {})",
        records.len(),
        revision_code
    );
    Ok(records)
}
