use crate::error::EstatError;
use crate::processor::flat_master::{DivisionRange, DivisionRanges};
use crate::types::RevisionMapping;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MASTER_URL: &str = "https://www.e-stat.go.jp/classifications/terms/download";
pub const DEFAULT_TERMS_URL: &str = "https://www.e-stat.go.jp/classifications/terms";
const CONFIG_PATH_ENV: &str = "ESTAT_CONFIG_PATH";
const CONFIG_FILE_NAME: &str = "estat.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstatConfig {
    pub master_url: String,
    pub terms_url: String,
    pub master_timeout_secs: u64,
    pub example_timeout_secs: u64,
    pub revisions: RevisionMapping,
    /// Division spans keyed by revision code.
    pub division_ranges: HashMap<String, Vec<DivisionRange>>,
}

impl Default for EstatConfig {
    fn default() -> Self {
        Self {
            master_url: DEFAULT_MASTER_URL.to_string(),
            terms_url: DEFAULT_TERMS_URL.to_string(),
            master_timeout_secs: 60,
            example_timeout_secs: 30,
            revisions: RevisionMapping::default(),
            division_ranges: HashMap::new(),
        }
    }
}

impl EstatConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, EstatError> {
        let path = path.as_ref();
        let config_error = |reason: String| EstatError::Config {
            path: path.to_path_buf(),
            reason,
        };

        let content = fs::read_to_string(path)
            .map_err(|e| config_error(format!("Failed to read {CONFIG_FILE_NAME}: {e}")))?;
        let config: EstatConfig = serde_json::from_str(&content)
            .map_err(|e| config_error(format!("Failed to parse {CONFIG_FILE_NAME}: {e}")))?;

        for (revision_code, release_date) in config.revisions.iter() {
            chrono::NaiveDate::parse_from_str(release_date, "%Y-%m-%d").map_err(|e| {
                config_error(format!(
                    "Release date {release_date:?} for revision {revision_code} is not an ISO date: {e}"
                ))
            })?;
        }
        for revision_code in config.division_ranges.keys() {
            config
                .division_ranges_for(revision_code)
                .map_err(|e| config_error(e.to_string()))?;
        }

        Ok(config)
    }

    /// Loads `estat.json` from `$ESTAT_CONFIG_PATH`, or from the crate's
    /// `configs/` directory when the variable is unset.
    pub fn load_default() -> Result<Self, EstatError> {
        let dir = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("configs"));
        Self::load_from_file(dir.join(CONFIG_FILE_NAME))
    }

    pub fn master_timeout(&self) -> Duration {
        Duration::from_secs(self.master_timeout_secs)
    }

    pub fn example_timeout(&self) -> Duration {
        Duration::from_secs(self.example_timeout_secs)
    }

    /// Configured division spans for a revision, if any.
    pub fn division_ranges_for(
        &self,
        revision_code: &str,
    ) -> Result<Option<DivisionRanges>, EstatError> {
        self.division_ranges
            .get(revision_code)
            .map(|ranges| DivisionRanges::new(ranges.clone()))
            .transpose()
    }
}
