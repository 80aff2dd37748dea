//! Fetch, extract and analyze against mock HTTP servers

use crate::common::{StubStrategy, PROFILE_PAGE, THIN_PAGE};
use profile_lens::config::{FetcherConfig, StrategyKind};
use profile_lens::model::CareerLevel;
use profile_lens::robots::PolicyChecker;
use profile_lens::scrape::{
    build_http_client, FetchOrchestrator, LightweightStrategy, Politeness, RateGovernor,
};
use profile_lens::{Analyzer, Extractor, LensError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn politeness(min_delay_ms: u64, check_robots: bool, honor: bool) -> Arc<Politeness> {
    let client = build_http_client(&FetcherConfig::default()).unwrap();
    let policy = check_robots.then(|| Arc::new(PolicyChecker::new(client)));
    Arc::new(Politeness::new(
        Arc::new(RateGovernor::from_millis(min_delay_ms, min_delay_ms)),
        policy,
        "ProfileLens",
        honor,
    ))
}

fn orchestrator(
    politeness: Arc<Politeness>,
    rendered: Arc<StubStrategy>,
) -> FetchOrchestrator {
    let client = build_http_client(&FetcherConfig::default()).unwrap();
    FetchOrchestrator::new(
        Arc::new(LightweightStrategy::new(client, politeness)),
        rendered,
        100,
        StrategyKind::Lightweight,
    )
}

async fn mount_page(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/in/jane-doe"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn profile_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/in/jane-doe", server.uri())).unwrap()
}

#[tokio::test]
async fn test_rich_page_end_to_end() {
    let server = MockServer::start().await;
    mount_page(&server, PROFILE_PAGE).await;

    let rendered = Arc::new(StubStrategy::serving(StrategyKind::Rendered, PROFILE_PAGE));
    let orchestrator = orchestrator(politeness(0, false, false), rendered.clone());

    let page = orchestrator.fetch(&profile_url(&server), None).await.unwrap();
    assert_eq!(page.strategy, StrategyKind::Lightweight);
    assert_eq!(rendered.calls(), 0);

    let record = Extractor::default().extract(&page).unwrap();
    assert_eq!(record.profile_id, "jane-doe");
    assert_eq!(record.name, "Jane Doe");
    assert_eq!(record.experience.len(), 2);
    assert_eq!(record.current_company, "Acme");
    assert_eq!(record.skills.len(), 3);

    let analysis = Analyzer::default().analyze(&record);
    assert_eq!(analysis.profile_id, "jane-doe");
    // "Staff Engineer" carries no leadership keyword; 9+ years of tenure
    assert_eq!(analysis.career_level, CareerLevel::Senior);
    assert!(analysis.industry_focus.contains(&"Technology".to_string()));
    assert!((0.0..=1.0).contains(&analysis.confidence));
}

#[tokio::test]
async fn test_thin_page_falls_back_once() {
    let server = MockServer::start().await;
    mount_page(&server, THIN_PAGE).await;

    let rendered = Arc::new(StubStrategy::serving(StrategyKind::Rendered, PROFILE_PAGE));
    let orchestrator = orchestrator(politeness(0, false, false), rendered.clone());

    let page = orchestrator.fetch(&profile_url(&server), None).await.unwrap();

    assert_eq!(page.strategy, StrategyKind::Rendered);
    assert_eq!(rendered.calls(), 1);
}

#[tokio::test]
async fn test_http_error_and_render_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/in/jane-doe"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let rendered = Arc::new(StubStrategy::failing(StrategyKind::Rendered));
    let orchestrator = orchestrator(politeness(0, false, false), rendered.clone());

    let error = orchestrator
        .fetch(&profile_url(&server), None)
        .await
        .unwrap_err();

    match error {
        LensError::FetchFailed { failures, .. } => assert_eq!(failures.len(), 2),
        other => panic!("expected FetchFailed, got {:?}", other),
    }
    assert_eq!(rendered.calls(), 1);
}

#[tokio::test]
async fn test_honored_robots_denial_skips_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /in/"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/in/jane-doe"))
        .respond_with(ResponseTemplate::new(200).set_body_string(PROFILE_PAGE))
        .expect(0)
        .mount(&server)
        .await;

    let rendered = Arc::new(StubStrategy::serving(StrategyKind::Rendered, PROFILE_PAGE));
    let orchestrator = orchestrator(politeness(0, true, true), rendered.clone());

    let error = orchestrator
        .fetch(&profile_url(&server), None)
        .await
        .unwrap_err();

    assert!(matches!(error, LensError::PolicyDenied { .. }));
    assert_eq!(rendered.calls(), 0);
}

#[tokio::test]
async fn test_advisory_robots_denial_proceeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /"))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, PROFILE_PAGE).await;

    let rendered = Arc::new(StubStrategy::serving(StrategyKind::Rendered, PROFILE_PAGE));
    let orchestrator = orchestrator(politeness(0, true, false), rendered.clone());

    let page = orchestrator.fetch(&profile_url(&server), None).await.unwrap();

    assert_eq!(page.strategy, StrategyKind::Lightweight);
    assert!(page.content.contains("Jane Doe"));
}

#[tokio::test]
async fn test_requests_to_one_host_are_spaced() {
    let server = MockServer::start().await;
    mount_page(&server, PROFILE_PAGE).await;

    let rendered = Arc::new(StubStrategy::serving(StrategyKind::Rendered, PROFILE_PAGE));
    let orchestrator = orchestrator(politeness(150, false, false), rendered);
    let url = profile_url(&server);

    let started = Instant::now();
    orchestrator.fetch(&url, None).await.unwrap();
    orchestrator.fetch(&url, None).await.unwrap();
    orchestrator.fetch(&url, None).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(300));
}
