//! Headless-browser fetch strategy
//!
//! Browser engines live in a fixed-size [`RenderPool`]. A fetch leases one
//! engine, takes its politeness turn, then drives the engine on the blocking
//! thread pool. The lease travels into the blocking task, so an engine is never
//! handed out again while a navigation on it is still running, even when the
//! async caller has gone away.

use crate::config::{FetcherConfig, RenderConfig, StrategyKind};
use crate::scrape::{collapse_whitespace, FetchFailure, FetchResult, FetchStrategy, Politeness};
use anyhow::anyhow;
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::fmt::Display;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, info, warn};
use url::Url;

/// Per-navigation settings handed to an engine
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub user_agent: String,
    /// Bounded wait for `body` to appear
    pub readiness_timeout: Duration,
    /// Fixed wait after readiness for client-side rendering to settle
    pub settle_delay: Duration,
}

impl RenderOptions {
    pub fn from_config(fetcher: &FetcherConfig, render: &RenderConfig) -> Self {
        Self {
            user_agent: fetcher.user_agent.clone(),
            readiness_timeout: Duration::from_secs(render.readiness_timeout_secs),
            settle_delay: Duration::from_millis(render.settle_delay_ms),
        }
    }
}

/// What an engine reads back from a rendered page
#[derive(Debug, Clone, Default)]
pub struct RenderedPage {
    pub title: String,
    pub text: String,
    pub markup: String,
}

/// A blocking page renderer
///
/// Implementations are driven from `spawn_blocking` and see at most one
/// navigation at a time.
pub trait RenderEngine: Send + Sync {
    fn render(&self, url: &str, options: &RenderOptions) -> Result<RenderedPage, FetchFailure>;

    /// Releases any external process held by the engine
    fn shutdown(&self) {}
}

/// Chrome/Chromium driven over the DevTools protocol
///
/// The browser process is launched on first use and relaunched if it dies.
pub struct ChromeEngine {
    headless: bool,
    chrome_path: Option<PathBuf>,
    browser: Mutex<Option<Browser>>,
}

impl ChromeEngine {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            headless: config.headless,
            chrome_path: config.chrome_path.as_ref().map(PathBuf::from),
            browser: Mutex::new(None),
        }
    }

    fn browser(&self) -> anyhow::Result<Browser> {
        let mut slot = self.browser.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(browser) = slot.as_ref() {
            return Ok(browser.clone());
        }

        info!("Launching headless browser");
        let options = LaunchOptions::default_builder()
            .headless(self.headless)
            .sandbox(false)
            .path(self.chrome_path.clone())
            .window_size(Some((1920, 1080)))
            .build()
            .map_err(|e| anyhow!("invalid browser launch options: {}", e))?;

        let browser = Browser::new(options)?;
        *slot = Some(browser.clone());
        Ok(browser)
    }

    fn discard_browser(&self) {
        let mut slot = self.browser.lock().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}

impl RenderEngine for ChromeEngine {
    fn render(&self, url: &str, options: &RenderOptions) -> Result<RenderedPage, FetchFailure> {
        let browser = self.browser().map_err(driver_error)?;

        let tab = match browser.new_tab() {
            Ok(tab) => tab,
            Err(e) => {
                // Most likely the browser process died; relaunch next time
                self.discard_browser();
                return Err(driver_error(e));
            }
        };

        let page = drive_tab(&tab, url, options);
        if let Err(e) = tab.close(true) {
            debug!("Failed to close tab for {}: {}", url, e);
        }
        page
    }

    fn shutdown(&self) {
        self.discard_browser();
    }
}

fn drive_tab(tab: &Tab, url: &str, options: &RenderOptions) -> Result<RenderedPage, FetchFailure> {
    tab.set_user_agent(&options.user_agent, Some("en-US,en;q=0.5"), None)
        .map_err(driver_error)?;
    tab.navigate_to(url).map_err(driver_error)?;

    tab.wait_for_element_with_custom_timeout("body", options.readiness_timeout)
        .map_err(|_| FetchFailure::RenderTimeout(options.readiness_timeout))?;
    std::thread::sleep(options.settle_delay);

    let title = tab.get_title().map_err(driver_error)?;
    let text = tab
        .find_element("body")
        .and_then(|body| body.get_inner_text())
        .map_err(driver_error)?;
    let markup = tab.get_content().map_err(driver_error)?;

    Ok(RenderedPage {
        title: collapse_whitespace(&title),
        text: collapse_whitespace(&text),
        markup,
    })
}

fn driver_error(error: impl Display) -> FetchFailure {
    FetchFailure::Driver(error.to_string())
}

/// Fixed set of engines, each leased to one navigation at a time
pub struct RenderPool {
    engines: Vec<Arc<dyn RenderEngine>>,
    permits: Arc<Semaphore>,
    free: Arc<Mutex<Vec<usize>>>,
}

impl RenderPool {
    pub fn new(engines: Vec<Arc<dyn RenderEngine>>) -> Self {
        let count = engines.len();
        Self {
            engines,
            permits: Arc::new(Semaphore::new(count)),
            free: Arc::new(Mutex::new((0..count).rev().collect())),
        }
    }

    /// A pool of `pool_size` lazily launched Chrome engines
    pub fn chrome(config: &RenderConfig) -> Self {
        let engines = (0..config.pool_size.max(1))
            .map(|_| Arc::new(ChromeEngine::new(config)) as Arc<dyn RenderEngine>)
            .collect();
        Self::new(engines)
    }

    /// Number of engines not currently leased
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Waits for a free engine and leases it
    pub async fn acquire(&self) -> Result<RenderLease, FetchFailure> {
        if self.engines.is_empty() {
            return Err(FetchFailure::Driver("render pool is empty".to_string()));
        }

        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| FetchFailure::Driver("render pool closed".to_string()))?;

        let index = self
            .free
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop()
            .ok_or_else(|| FetchFailure::Driver("no free render engine".to_string()))?;

        Ok(RenderLease {
            index,
            engine: self.engines[index].clone(),
            free: self.free.clone(),
            _permit: permit,
        })
    }

    /// Shuts every engine down; later fetches relaunch on demand
    pub fn shutdown(&self) {
        for engine in &self.engines {
            engine.shutdown();
        }
    }
}

/// Exclusive use of one pooled engine, returned on drop
pub struct RenderLease {
    index: usize,
    engine: Arc<dyn RenderEngine>,
    free: Arc<Mutex<Vec<usize>>>,
    _permit: OwnedSemaphorePermit,
}

impl RenderLease {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn engine(&self) -> &dyn RenderEngine {
        self.engine.as_ref()
    }
}

impl Drop for RenderLease {
    fn drop(&mut self) {
        // Runs before the permit field drops, so a woken waiter always finds an index
        self.free
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(self.index);
    }
}

/// Fetches a page by rendering it in a pooled headless browser
pub struct RenderedStrategy {
    pool: Arc<RenderPool>,
    politeness: Arc<Politeness>,
    options: RenderOptions,
}

impl RenderedStrategy {
    pub fn new(pool: Arc<RenderPool>, politeness: Arc<Politeness>, options: RenderOptions) -> Self {
        Self {
            pool,
            politeness,
            options,
        }
    }
}

#[async_trait]
impl FetchStrategy for RenderedStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Rendered
    }

    async fn fetch(&self, url: &Url) -> Result<FetchResult, FetchFailure> {
        let lease = self.pool.acquire().await?;
        self.politeness.admit(url).await?;

        debug!("Rendering {} on engine {}", url, lease.index());
        let target = url.to_string();
        let options = self.options.clone();
        let page = tokio::task::spawn_blocking(move || {
            let page = lease.engine().render(&target, &options);
            drop(lease);
            page
        })
        .await
        .map_err(|e| {
            warn!("Render task for {} did not complete: {}", url, e);
            FetchFailure::Driver(format!("render task failed: {}", e))
        })??;

        Ok(FetchResult {
            url: url.to_string(),
            title: page.title,
            content: page.text,
            markup: page.markup,
            strategy: StrategyKind::Rendered,
            status_code: 200,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::RateGovernor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Engine that records how many navigations overlap
    #[derive(Default)]
    struct CountingEngine {
        active: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    impl RenderEngine for CountingEngine {
        fn render(&self, url: &str, _options: &RenderOptions) -> Result<RenderedPage, FetchFailure> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(30));
            self.active.fetch_sub(1, Ordering::SeqCst);

            Ok(RenderedPage {
                title: "Rendered".to_string(),
                text: format!("rendered text for {}", url),
                markup: "<html><body>rendered</body></html>".to_string(),
            })
        }
    }

    struct TimeoutEngine;

    impl RenderEngine for TimeoutEngine {
        fn render(&self, _url: &str, options: &RenderOptions) -> Result<RenderedPage, FetchFailure> {
            Err(FetchFailure::RenderTimeout(options.readiness_timeout))
        }
    }

    fn options() -> RenderOptions {
        RenderOptions::from_config(&FetcherConfig::default(), &RenderConfig::default())
    }

    fn strategy_with(engine: Arc<dyn RenderEngine>) -> RenderedStrategy {
        let governor = Arc::new(RateGovernor::new(Duration::ZERO, Duration::ZERO));
        RenderedStrategy::new(
            Arc::new(RenderPool::new(vec![engine])),
            Arc::new(Politeness::throttle_only(governor)),
            options(),
        )
    }

    #[test]
    fn test_options_from_config() {
        let options = options();
        assert_eq!(options.readiness_timeout, Duration::from_secs(10));
        assert_eq!(options.settle_delay, Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_lease_is_returned_on_drop() {
        let pool = RenderPool::new(vec![Arc::new(CountingEngine::default()) as Arc<dyn RenderEngine>]);
        assert_eq!(pool.available(), 1);

        let lease = pool.acquire().await.unwrap();
        assert_eq!(lease.index(), 0);
        assert_eq!(pool.available(), 0);

        drop(lease);
        assert_eq!(pool.available(), 1);
        assert!(pool.acquire().await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_pool_fails() {
        let pool = RenderPool::new(Vec::new());
        assert!(matches!(pool.acquire().await, Err(FetchFailure::Driver(_))));
    }

    #[tokio::test]
    async fn test_single_engine_never_overlaps() {
        let engine = Arc::new(CountingEngine::default());
        let strategy = Arc::new(strategy_with(engine.clone()));

        let handles: Vec<_> = (0..3)
            .map(|i| {
                let strategy = strategy.clone();
                tokio::spawn(async move {
                    let url = Url::parse(&format!("https://www.linkedin.com/in/user{}", i)).unwrap();
                    strategy.fetch(&url).await
                })
            })
            .collect();

        for handle in handles {
            let result = handle.await.unwrap().unwrap();
            assert_eq!(result.strategy, StrategyKind::Rendered);
            assert_eq!(result.status_code, 200);
        }
        assert_eq!(engine.calls.load(Ordering::SeqCst), 3);
        assert_eq!(engine.peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_reported() {
        let strategy = strategy_with(Arc::new(TimeoutEngine));
        let url = Url::parse("https://www.linkedin.com/in/jane").unwrap();
        assert_eq!(
            strategy.fetch(&url).await.unwrap_err(),
            FetchFailure::RenderTimeout(Duration::from_secs(10))
        );
    }
}
