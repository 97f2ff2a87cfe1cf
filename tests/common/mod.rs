#![allow(dead_code)]
use async_trait::async_trait;
use estat_master::runtime::fetcher::{FetchRequest, Fetcher};
use estat_master::types::ClassificationRow;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

pub fn fixtures_dir() -> String {
    format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"))
}

pub fn load_fixture(filename: &str) -> String {
    let path = Path::new(&fixtures_dir()).join(filename);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

pub fn row(code: &str, code_name: &str, desc: &str) -> ClassificationRow {
    ClassificationRow::new(code, code_name, Some(desc))
}

/// Serves canned bodies by URL and records every request it receives.
pub struct MockFetcher {
    pub responses: HashMap<String, Result<String, String>>,
    pub requests: Mutex<Vec<FetchRequest>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn add_fixture(&mut self, url: &str, content: &str) {
        self.responses
            .insert(url.to_string(), Ok(content.to_string()));
    }

    pub fn add_failure(&mut self, url: &str, error: &str) {
        self.responses
            .insert(url.to_string(), Err(error.to_string()));
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, request: &FetchRequest) -> Result<String, String> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| Err(format!("MockFetcher: No fixture for URL: {}", request.url)))
    }
}
