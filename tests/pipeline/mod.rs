use crate::common::{load_fixture, MockFetcher};
use estat_master::pipeline::{build_jsic_flat_master, collect_examples};
use estat_master::processor::DivisionRange;
use estat_master::runtime::config::{EstatConfig, DEFAULT_MASTER_URL};
use estat_master::EstatError;

fn master_fetcher(fixture: &str) -> MockFetcher {
    let mut fetcher = MockFetcher::new();
    fetcher.add_fixture(DEFAULT_MASTER_URL, &load_fixture(fixture));
    fetcher
}

#[tokio::test]
async fn builds_flat_master_from_row_order() {
    let fetcher = master_fetcher("jsic/master_two_divisions.csv");

    let flat = build_jsic_flat_master(&fetcher, &EstatConfig::default(), "04")
        .await
        .expect("pipeline should succeed");

    let codes: Vec<(&str, &str, &str, &str)> = flat
        .iter()
        .map(|r| {
            (
                r.class_code.as_str(),
                r.group_code.as_str(),
                r.major_group_code.as_str(),
                r.division_code.as_str(),
            )
        })
        .collect();
    assert_eq!(
        codes,
        vec![
            ("0111", "011", "01", "A"),
            ("0112", "011", "01", "A"),
            ("0211", "021", "02", "A"),
            ("0311", "031", "03", "B"),
        ]
    );
    assert_eq!(flat[1].class_desc, None);
    assert_eq!(fetcher.requests()[0].param("bKbn"), Some("10"));
}

#[tokio::test]
async fn cleans_multiline_descriptions() {
    let fetcher = master_fetcher("jsic/master_sample.csv");

    let flat = build_jsic_flat_master(&fetcher, &EstatConfig::default(), "04")
        .await
        .unwrap();

    assert_eq!(flat.len(), 1);
    assert_eq!(
        flat[0].group_desc.as_deref(),
        Some("耕種農業の説明 （園芸を含む）")
    );
}

#[tokio::test]
async fn configured_ranges_take_precedence() {
    let fetcher = master_fetcher("jsic/master_two_divisions.csv");
    let mut config = EstatConfig::default();
    // Deliberately narrower than the row order implies.
    config.division_ranges.insert(
        "04".to_string(),
        vec![
            DivisionRange::new("A", "01", "01"),
            DivisionRange::new("B", "03", "04"),
        ],
    );

    let err = build_jsic_flat_master(&fetcher, &config, "04")
        .await
        .expect_err("02 is outside every configured range");

    match err {
        EstatError::UnresolvedDivision { major_group_code } => {
            assert_eq!(major_group_code, "02");
        }
        other => panic!("expected unresolved division, got {other:?}"),
    }
}

#[tokio::test]
async fn download_failure_surfaces_unchanged() {
    let mut fetcher = MockFetcher::new();
    fetcher.add_failure(DEFAULT_MASTER_URL, "Network error");

    let err = build_jsic_flat_master(&fetcher, &EstatConfig::default(), "04")
        .await
        .expect_err("download failure should surface");

    assert!(matches!(err, EstatError::Download(_)));
}

#[tokio::test]
async fn collects_examples_in_code_order() {
    let mut fetcher = MockFetcher::new();
    let html = load_fixture("jsic/example_0111.html");
    fetcher.add_fixture(
        "https://www.e-stat.go.jp/classifications/terms/10/04/0111",
        &html,
    );
    fetcher.add_fixture(
        "https://www.e-stat.go.jp/classifications/terms/10/04/0112",
        "<html><body><table></table></body></html>",
    );
    let mut config = EstatConfig::default();
    config.revisions.insert("04", "2023-07-01");

    let records = collect_examples(
        &fetcher,
        &config,
        "04",
        &["0111".to_string(), "0112".to_string()],
    )
    .await
    .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].code, "0111");
    assert!(records[0].example.is_some());
    assert_eq!(records[1].code, "0112");
    assert_eq!(records[1].example, None);

    let urls: Vec<String> = fetcher.requests().into_iter().map(|r| r.url).collect();
    assert!(urls[0].ends_with("/0111"));
    assert!(urls[1].ends_with("/0112"));
}

#[tokio::test]
async fn stops_at_first_failed_lookup() {
    let mut fetcher = MockFetcher::new();
    fetcher.add_failure(
        "https://www.e-stat.go.jp/classifications/terms/10/04/0111",
        "timed out",
    );
    let mut config = EstatConfig::default();
    config.revisions.insert("04", "2023-07-01");

    let err = collect_examples(
        &fetcher,
        &config,
        "04",
        &["0111".to_string(), "0112".to_string()],
    )
    .await
    .expect_err("first failure should stop the run");

    assert!(matches!(err, EstatError::ExampleFetch { ref code, .. } if code == "0111"));
    assert_eq!(fetcher.requests().len(), 1);
}
