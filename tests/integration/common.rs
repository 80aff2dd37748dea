//! Shared fixtures for integration tests

use async_trait::async_trait;
use profile_lens::config::StrategyKind;
use profile_lens::scrape::{read_page, FetchFailure, FetchResult, FetchStrategy};
use std::sync::atomic::{AtomicUsize, Ordering};
use url::Url;

pub const PROFILE_PAGE: &str = r#"<html>
  <head><title>Jane Doe - Staff Engineer | LinkedIn</title></head>
  <body>
    <h1 class="text-heading-xlarge">Jane Doe</h1>
    <div class="text-body-medium break-words">Staff Software Engineer at Acme</div>
    <span class="text-body-small inline t-black--light break-words">Berlin, Germany</span>
    <div class="pv-about__summary-text">Builds distributed systems and developer tooling.</div>
    <ul>
      <li class="experience-item">
        <h3>Staff Engineer</h3>
        <p class="experience-item__subtitle">Acme</p>
        <span class="date-range">Jan 2018 - Present</span>
      </li>
      <li class="experience-item">
        <h3>Software Engineer</h3>
        <p class="experience-item__subtitle">Google</p>
        <span class="date-range">Jun 2014 - Dec 2017</span>
      </li>
    </ul>
    <ul>
      <li data-test-id="skill"><span data-test-id="skill-name">Rust</span></li>
      <li data-test-id="skill"><span data-test-id="skill-name">Kubernetes</span></li>
      <li data-test-id="skill"><span data-test-id="skill-name">Leadership</span></li>
    </ul>
  </body>
</html>"#;

pub const THIN_PAGE: &str =
    r#"<html><head><title>Sign in | LinkedIn</title></head><body><p>Sign in</p></body></html>"#;

/// Strategy returning a fixed page (or failure) and counting its calls
pub struct StubStrategy {
    kind: StrategyKind,
    markup: Option<&'static str>,
    calls: AtomicUsize,
}

impl StubStrategy {
    pub fn serving(kind: StrategyKind, markup: &'static str) -> Self {
        Self {
            kind,
            markup: Some(markup),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(kind: StrategyKind) -> Self {
        Self {
            kind,
            markup: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FetchStrategy for StubStrategy {
    fn kind(&self) -> StrategyKind {
        self.kind
    }

    async fn fetch(&self, url: &Url) -> Result<FetchResult, FetchFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let markup = self
            .markup
            .ok_or_else(|| FetchFailure::Driver("stub failure".to_string()))?;
        let page = read_page(markup);
        Ok(FetchResult {
            url: url.to_string(),
            title: page.title,
            content: page.text,
            markup: markup.to_string(),
            strategy: self.kind,
            status_code: 200,
        })
    }
}
