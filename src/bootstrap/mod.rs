//! Locating the page's embedded player state through an ordered chain of
//! extraction strategies.
//!
//! Internals are split into:
//! - `strategies`: pure extraction functions, one per strategy
//! - `ytcfg`:      runtime config (API key, client identity) extraction
//! - `utils`:      brace matching and script iteration
//! - `debug`:      optional dump helpers (`debug-dumps` feature)

pub mod strategies;
pub(crate) mod utils;
mod ytcfg;

#[cfg(feature = "debug-dumps")]
pub(crate) mod debug;

pub use ytcfg::{ClientIdentity, RuntimeConfig};

use reqwest::header::ACCEPT_LANGUAGE;
use serde_json::{Map, Value};
use url::Url;

use crate::core::{VideoId, WatchTarget, YtClient, YtError, json_path, net};

/// One way of finding the player state. The locator runs them in order and
/// the first hit wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BootstrapStrategy {
    /// Fetch the requested page (the caller's URL, or the canonical watch
    /// URL for a bare id) and pattern-match the global assignment.
    WatchPage,
    /// Search script elements of a live document snapshot.
    DomScripts,
    /// Read the already-assigned global from the page's execution context.
    GlobalObject,
    /// Re-fetch the normalized `watch?v=<id>` URL and pattern-match again.
    CanonicalRefetch,
}

impl BootstrapStrategy {
    pub const DEFAULT_ORDER: [Self; 4] = [
        Self::WatchPage,
        Self::DomScripts,
        Self::GlobalObject,
        Self::CanonicalRefetch,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::WatchPage => "watch_page",
            Self::DomScripts => "dom_scripts",
            Self::GlobalObject => "global_object",
            Self::CanonicalRefetch => "canonical_refetch",
        }
    }
}

/// What the host environment can offer besides the network: a snapshot of
/// the live document and the page's global variables. Both are optional;
/// strategies that need a missing piece simply miss.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    dom_html: Option<String>,
    globals: Map<String, Value>,
}

impl PageContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialized HTML of the live document.
    #[must_use]
    pub fn with_dom(mut self, html: impl Into<String>) -> Self {
        self.dom_html = Some(html.into());
        self
    }

    /// A global variable as seen by page scripts, e.g.
    /// `ytInitialPlayerResponse` or `ytcfg`.
    #[must_use]
    pub fn with_global(mut self, name: impl Into<String>, value: Value) -> Self {
        self.globals.insert(name.into(), value);
        self
    }

    pub fn dom_html(&self) -> Option<&str> {
        self.dom_html.as_deref()
    }

    pub fn globals(&self) -> &Map<String, Value> {
        &self.globals
    }
}

/// The located player state for one page load. Fetched fresh per request.
#[derive(Debug, Clone)]
pub struct PageBootstrapState {
    video_id: VideoId,
    root: Value,
    runtime_config: Option<RuntimeConfig>,
    strategy: BootstrapStrategy,
}

impl PageBootstrapState {
    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    /// The raw player-response tree.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Runtime config found alongside the state, if any.
    pub fn runtime_config(&self) -> Option<&RuntimeConfig> {
        self.runtime_config.as_ref()
    }

    /// The strategy that produced this state.
    pub fn strategy(&self) -> BootstrapStrategy {
        self.strategy
    }
}

const STATE_VIDEO_ID: &[&str] = &[
    "videoDetails.videoId",
    "playerResponse.videoDetails.videoId",
];

// After client-side navigation the DOM and globals can still describe the
// previously loaded video.
fn describes_video(root: &Value, video_id: &VideoId) -> bool {
    json_path::get_str(root, STATE_VIDEO_ID).is_none_or(|id| id == video_id.as_str())
}

/// Runs the strategy chain for a watch target.
#[derive(Debug, Clone)]
pub struct BootstrapLocator {
    client: YtClient,
    context: PageContext,
    strategies: Vec<BootstrapStrategy>,
}

impl BootstrapLocator {
    pub fn new(client: &YtClient) -> Self {
        Self {
            client: client.clone(),
            context: PageContext::default(),
            strategies: BootstrapStrategy::DEFAULT_ORDER.to_vec(),
        }
    }

    /// Supplies a DOM snapshot and/or page globals for the in-page strategies.
    #[must_use]
    pub fn context(mut self, ctx: PageContext) -> Self {
        self.context = ctx;
        self
    }

    /// Replaces the strategy order.
    #[must_use]
    pub fn strategies(mut self, order: impl IntoIterator<Item = BootstrapStrategy>) -> Self {
        self.strategies = order.into_iter().collect();
        self
    }

    /// Tries each strategy in order and returns the first state found.
    ///
    /// Fetch failures and unparseable candidates inside a strategy count as a
    /// miss; only exhausting the chain is an error.
    ///
    /// # Errors
    ///
    /// Returns [`YtError::BootstrapNotFound`] listing the strategies tried.
    #[tracing::instrument(skip(self, target), err, fields(video_id = %target.video_id))]
    pub async fn locate(&self, target: &WatchTarget) -> Result<PageBootstrapState, YtError> {
        let video_id = &target.video_id;
        let mut attempted = Vec::with_capacity(self.strategies.len());
        let mut seen_config = RuntimeConfig::default();

        for &strategy in &self.strategies {
            attempted.push(strategy.name());
            tracing::debug!(strategy = strategy.name(), "trying bootstrap strategy");

            let hit = match strategy {
                BootstrapStrategy::WatchPage => {
                    let url = match &target.page_url {
                        Some(u) => u.clone(),
                        None => self.client.watch_url(video_id)?,
                    };
                    self.scan_fetched_page(&url, video_id, strategy, &mut seen_config)
                        .await
                }
                BootstrapStrategy::CanonicalRefetch => {
                    let url = self.client.watch_url(video_id)?;
                    self.scan_fetched_page(&url, video_id, strategy, &mut seen_config)
                        .await
                }
                BootstrapStrategy::DomScripts => self.context.dom_html().and_then(|html| {
                    if let Some(cfg) = RuntimeConfig::from_html(html) {
                        seen_config.merge_missing(cfg);
                    }
                    strategies::from_dom_scripts(html)
                }),
                BootstrapStrategy::GlobalObject => {
                    if let Some(cfg) = RuntimeConfig::from_globals(self.context.globals()) {
                        seen_config.merge_missing(cfg);
                    }
                    strategies::from_globals(self.context.globals())
                }
            };

            let Some(root) = hit else {
                tracing::debug!(strategy = strategy.name(), "bootstrap strategy missed");
                continue;
            };
            if !describes_video(&root, video_id) {
                tracing::warn!(
                    strategy = strategy.name(),
                    "bootstrap state belongs to another video; skipping"
                );
                continue;
            }

            tracing::debug!(strategy = strategy.name(), "bootstrap strategy hit");

            #[cfg(feature = "debug-dumps")]
            let _ = debug::debug_dump_state(video_id.as_str(), &root);

            if let Some(cfg) = RuntimeConfig::from_globals(self.context.globals()) {
                seen_config.merge_missing(cfg);
            }
            return Ok(PageBootstrapState {
                video_id: video_id.clone(),
                root,
                runtime_config: (!seen_config.is_empty()).then_some(seen_config),
                strategy,
            });
        }

        Err(YtError::BootstrapNotFound {
            video_id: video_id.to_string(),
            attempted,
        })
    }

    /// Collects the page runtime config without requiring the player state:
    /// page globals first, then the DOM snapshot, then the fetched page, then
    /// the canonical page. Stops as soon as a complete identity is known.
    ///
    /// # Errors
    ///
    /// Returns [`YtError::CommentApiInit`] when no source yields any config.
    #[tracing::instrument(skip(self, target), err, fields(video_id = %target.video_id))]
    pub async fn runtime_config(&self, target: &WatchTarget) -> Result<RuntimeConfig, YtError> {
        let mut cfg = RuntimeConfig::default();

        if let Some(found) = RuntimeConfig::from_globals(self.context.globals()) {
            cfg.merge_missing(found);
        }
        if cfg.identity().is_ok() {
            return Ok(cfg);
        }

        if let Some(found) = self.context.dom_html().and_then(RuntimeConfig::from_html) {
            cfg.merge_missing(found);
        }
        if cfg.identity().is_ok() {
            return Ok(cfg);
        }

        let canonical = self.client.watch_url(&target.video_id)?;
        let mut urls = vec![target.page_url.clone().unwrap_or_else(|| canonical.clone())];
        if urls[0] != canonical {
            urls.push(canonical);
        }
        for url in urls {
            match self.fetch_page(&url, &target.video_id).await {
                Ok(html) => {
                    if let Some(found) = RuntimeConfig::from_html(&html) {
                        cfg.merge_missing(found);
                    }
                }
                Err(e) => tracing::warn!(url = %url, error = %e, "runtime config page fetch failed"),
            }
            if cfg.identity().is_ok() {
                break;
            }
        }

        if cfg.is_empty() {
            return Err(YtError::CommentApiInit(
                "page runtime config (ytcfg) not found".into(),
            ));
        }
        Ok(cfg)
    }

    async fn scan_fetched_page(
        &self,
        url: &Url,
        video_id: &VideoId,
        strategy: BootstrapStrategy,
        seen_config: &mut RuntimeConfig,
    ) -> Option<Value> {
        let html = match self.fetch_page(url, video_id).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(strategy = strategy.name(), url = %url, error = %e, "watch page fetch failed");
                return None;
            }
        };
        if let Some(cfg) = RuntimeConfig::from_html(&html) {
            seen_config.merge_missing(cfg);
        }
        strategies::from_html_assignment(&html)
    }

    pub(crate) async fn fetch_page(&self, url: &Url, video_id: &VideoId) -> Result<String, YtError> {
        let req = self
            .client
            .http()
            .get(url.clone())
            .header(ACCEPT_LANGUAGE, self.client.accept_language());
        let resp = self.client.send_with_retry(req, None).await?;

        if !resp.status().is_success() {
            return Err(YtError::Status {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }
        let body = net::get_text(resp, "watch_page", video_id.as_str(), "html").await?;

        #[cfg(feature = "debug-dumps")]
        let _ = debug::debug_dump_html(video_id.as_str(), "watch_page", &body);

        Ok(body)
    }
}
