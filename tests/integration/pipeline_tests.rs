//! Service-level tests with stub strategies and SQLite storage

use crate::common::{StubStrategy, PROFILE_PAGE, THIN_PAGE};
use profile_lens::config::{parse_config, Config, StrategyKind};
use profile_lens::output::ExportFormat;
use profile_lens::scrape::FetchOrchestrator;
use profile_lens::storage::{DocumentKind, ProfileStore, SqliteStore};
use profile_lens::{LensError, ProfileService};
use std::sync::Arc;
use tempfile::TempDir;

struct Harness {
    service: ProfileService,
    lightweight: Arc<StubStrategy>,
    rendered: Arc<StubStrategy>,
}

fn harness(config: Config, store: Arc<dyn ProfileStore>, lightweight_markup: &'static str) -> Harness {
    let lightweight = Arc::new(StubStrategy::serving(
        StrategyKind::Lightweight,
        lightweight_markup,
    ));
    let rendered = Arc::new(StubStrategy::serving(StrategyKind::Rendered, PROFILE_PAGE));
    let orchestrator = FetchOrchestrator::new(
        lightweight.clone(),
        rendered.clone(),
        config.fetcher.min_content_length,
        config.fetcher.default_strategy,
    );
    Harness {
        service: ProfileService::with_components(config, orchestrator, store),
        lightweight,
        rendered,
    }
}

fn sqlite_store(dir: &TempDir) -> Arc<dyn ProfileStore> {
    Arc::new(SqliteStore::new(&dir.path().join("profiles.db")).unwrap())
}

#[tokio::test]
async fn test_scrape_persists_record_and_analysis() {
    let dir = TempDir::new().unwrap();
    let h = harness(Config::default(), sqlite_store(&dir), PROFILE_PAGE);

    let outcome = h
        .service
        .scrape("https://www.linkedin.com/in/jane-doe/", None)
        .await
        .unwrap();
    assert!(outcome.analysis_queued);
    assert_eq!(h.lightweight.calls(), 1);
    assert_eq!(h.rendered.calls(), 0);

    h.service.shutdown().await;

    let reopened = SqliteStore::new(&dir.path().join("profiles.db")).unwrap();
    let record = reopened.get_profile("jane-doe").unwrap().unwrap();
    assert_eq!(record.name, "Jane Doe");
    let analysis = reopened.get_analysis("jane-doe").unwrap().unwrap();
    assert!(analysis.completeness_score > 0);
    assert_eq!(reopened.list_ids(DocumentKind::Analysis).unwrap(), vec!["jane-doe"]);
}

#[tokio::test]
async fn test_render_first_hint() {
    let dir = TempDir::new().unwrap();
    let h = harness(Config::default(), sqlite_store(&dir), PROFILE_PAGE);

    let outcome = h
        .service
        .scrape(
            "https://www.linkedin.com/in/jane-doe",
            Some(StrategyKind::Rendered),
        )
        .await
        .unwrap();

    assert_eq!(outcome.data.name, "Jane Doe");
    assert_eq!(h.rendered.calls(), 1);
    assert_eq!(h.lightweight.calls(), 0);
}

#[tokio::test]
async fn test_thin_lightweight_page_uses_rendered() {
    let dir = TempDir::new().unwrap();
    let h = harness(Config::default(), sqlite_store(&dir), THIN_PAGE);

    let outcome = h
        .service
        .scrape("https://www.linkedin.com/in/jane-doe", None)
        .await
        .unwrap();

    assert_eq!(outcome.data.experience.len(), 2);
    assert_eq!(h.lightweight.calls(), 1);
    assert_eq!(h.rendered.calls(), 1);
}

#[tokio::test]
async fn test_batch_of_eleven_rejected_before_fetch() {
    let dir = TempDir::new().unwrap();
    let h = harness(Config::default(), sqlite_store(&dir), PROFILE_PAGE);
    let urls: Vec<String> = (0..11)
        .map(|i| format!("https://www.linkedin.com/in/person-{}", i))
        .collect();

    let error = h.service.batch(&urls).await.unwrap_err();

    assert!(matches!(error, LensError::BatchTooLarge { size: 11, max: 10 }));
    assert_eq!(h.lightweight.calls(), 0);
    assert_eq!(h.rendered.calls(), 0);
}

#[tokio::test]
async fn test_batch_respects_configured_limit() {
    let config = parse_config(
        r#"
[pipeline]
max-batch-size = 3
max-concurrent-requests = 2
"#,
    )
    .unwrap();
    let dir = TempDir::new().unwrap();
    let h = harness(config, sqlite_store(&dir), PROFILE_PAGE);

    let urls: Vec<String> = ["alice", "bob", "carol"]
        .iter()
        .map(|slug| format!("https://www.linkedin.com/in/{}", slug))
        .collect();
    let report = h.service.batch(&urls).await.unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.successful, 3);
    assert_eq!(report.failed, 0);
    assert_eq!(h.lightweight.calls(), 3);
    assert_eq!(
        h.service.profile_ids().unwrap(),
        vec!["alice", "bob", "carol"]
    );

    let too_many = [urls.clone(), vec![urls[0].clone()]].concat();
    assert!(h.service.batch(&too_many).await.is_err());
}

#[tokio::test]
async fn test_exports_written_to_configured_dir() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.output.export_dir = dir.path().join("exports").to_string_lossy().into_owned();
    let h = harness(config, sqlite_store(&dir), PROFILE_PAGE);

    h.service
        .scrape("https://www.linkedin.com/in/jane-doe", None)
        .await
        .unwrap();
    h.service.analyze("jane-doe").unwrap();

    let ids = vec!["jane-doe".to_string()];
    for format in [ExportFormat::Json, ExportFormat::Csv, ExportFormat::Html] {
        let path = h.service.save_export(&ids, format).unwrap();
        assert!(path.starts_with(dir.path().join("exports")));
        assert_eq!(
            path.extension().and_then(|e| e.to_str()),
            Some(format.extension())
        );
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Jane Doe"));
    }

    let missing = h
        .service
        .save_export(&["nobody".to_string()], ExportFormat::Json)
        .unwrap_err();
    assert!(matches!(missing, LensError::ProfileNotFound(_)));
}
