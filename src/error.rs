use crate::types::HierarchyLevel;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EstatError {
    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error(
        "Failed to fetch examples for code={code}, revision_code={revision_code}: {reason}"
    )]
    ExampleFetch {
        code: String,
        revision_code: String,
        reason: String,
    },

    #[error("No release date configured for revision_code={revision_code}")]
    UnknownRevision { revision_code: String },

    #[error("Malformed classification code: {code:?}")]
    MalformedCode { code: String },

    #[error("Duplicate classification code in raw table: {code}")]
    DuplicateCode { code: String },

    #[error("No {level} ancestor {ancestor_code} found for class {class_code}")]
    MissingAncestor {
        class_code: String,
        level: HierarchyLevel,
        ancestor_code: String,
    },

    #[error("No division covers major group {major_group_code}")]
    UnresolvedDivision { major_group_code: String },

    #[error("Invalid division ranges: {reason}")]
    InvalidDivisionRanges { reason: String },

    #[error("Failed to load config {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("Failed to write CSV output: {0}")]
    Output(#[from] csv::Error),
}

/// Failure of the bulk master download, carrying the request parameters.
#[derive(Debug, thiserror::Error)]
#[error(
    "Failed to download data (classification_type={classification_type}, revision_code={revision_code}): {failure}"
)]
pub struct DownloadError {
    pub classification_type: String,
    pub revision_code: String,
    #[source]
    pub failure: DownloadFailure,
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadFailure {
    #[error("{0}")]
    Request(String),
    #[error("Received empty response")]
    EmptyResponse,
    #[error("Failed to parse master CSV: {0}")]
    Parse(String),
}

impl DownloadError {
    pub(crate) fn new(
        classification_type: &str,
        revision_code: &str,
        failure: DownloadFailure,
    ) -> Self {
        Self {
            classification_type: classification_type.to_string(),
            revision_code: revision_code.to_string(),
            failure,
        }
    }
}
