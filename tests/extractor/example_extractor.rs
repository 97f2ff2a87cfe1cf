use crate::common::{load_fixture, MockFetcher};
use estat_master::extractor::extract_examples_for_code;
use estat_master::runtime::config::EstatConfig;
use estat_master::types::RevisionMapping;
use estat_master::EstatError;
use std::time::Duration;

const URL_04_0111: &str = "https://www.e-stat.go.jp/classifications/terms/10/04/0111";

fn revision_mapping() -> RevisionMapping {
    [("04", "2023-07-01"), ("03", "2013-10-01")]
        .into_iter()
        .collect()
}

#[tokio::test]
async fn extracts_examples_and_release_date() {
    let mut fetcher = MockFetcher::new();
    fetcher.add_fixture(URL_04_0111, &load_fixture("jsic/example_0111.html"));

    let record = extract_examples_for_code(
        &fetcher,
        &EstatConfig::default(),
        "0111",
        "04",
        &revision_mapping(),
    )
    .await
    .expect("extraction should succeed");

    assert_eq!(record.code, "0111");
    assert_eq!(record.example.as_deref(), Some("稲作農業；水稲栽培"));
    assert_eq!(record.unsuitable_example.as_deref(), Some("米の販売；米の加工"));
    assert_eq!(record.release_date, "2023-07-01");

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, URL_04_0111);
}

#[tokio::test]
async fn empty_table_yields_no_examples() {
    let mut fetcher = MockFetcher::new();
    fetcher.add_fixture(
        "https://www.e-stat.go.jp/classifications/terms/10/04/9999",
        "<html><body><table></table></body></html>",
    );

    let record = extract_examples_for_code(
        &fetcher,
        &EstatConfig::default(),
        "9999",
        "04",
        &revision_mapping(),
    )
    .await
    .unwrap();

    assert_eq!(record.code, "9999");
    assert_eq!(record.example, None);
    assert_eq!(record.unsuitable_example, None);
    assert_eq!(record.release_date, "2023-07-01");
}

#[tokio::test]
async fn resolves_other_revision() {
    let url = "https://www.e-stat.go.jp/classifications/terms/10/03/0111";
    let mut fetcher = MockFetcher::new();
    fetcher.add_fixture(url, &load_fixture("jsic/example_0111.html"));

    let record = extract_examples_for_code(
        &fetcher,
        &EstatConfig::default(),
        "0111",
        "03",
        &revision_mapping(),
    )
    .await
    .unwrap();

    assert_eq!(record.release_date, "2013-10-01");
    assert_eq!(fetcher.requests()[0].url, url);
}

#[tokio::test]
async fn uses_thirty_second_timeout() {
    let mut fetcher = MockFetcher::new();
    fetcher.add_fixture(URL_04_0111, "<html><body></body></html>");

    extract_examples_for_code(
        &fetcher,
        &EstatConfig::default(),
        "0111",
        "04",
        &revision_mapping(),
    )
    .await
    .unwrap();

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].timeout, Duration::from_secs(30));
    assert!(requests[0].query.is_empty());
}

#[tokio::test]
async fn unknown_revision_fails_before_fetching() {
    let fetcher = MockFetcher::new();

    let err = extract_examples_for_code(
        &fetcher,
        &EstatConfig::default(),
        "0111",
        "99",
        &revision_mapping(),
    )
    .await
    .expect_err("unknown revision should fail");

    assert!(matches!(err, EstatError::UnknownRevision { ref revision_code } if revision_code == "99"));
    assert!(fetcher.requests().is_empty());
}

#[tokio::test]
async fn network_failure_names_code_and_revision() {
    let mut fetcher = MockFetcher::new();
    fetcher.add_failure(URL_04_0111, "HTTP error 503");

    let err = extract_examples_for_code(
        &fetcher,
        &EstatConfig::default(),
        "0111",
        "04",
        &revision_mapping(),
    )
    .await
    .expect_err("fetch failure should surface");

    match err {
        EstatError::ExampleFetch {
            code,
            revision_code,
            reason,
        } => {
            assert_eq!(code, "0111");
            assert_eq!(revision_code, "04");
            assert!(reason.contains("503"));
        }
        other => panic!("expected example fetch error, got {other:?}"),
    }
}
