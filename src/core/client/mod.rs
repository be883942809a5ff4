//! Public client surface + builder.
//! Internals are split into `retry` (policy types) and `constants` (UA + defaults).

mod constants;
mod retry;

pub use retry::{Backoff, CacheMode, RetryConfig};

pub(crate) use constants::{DEFAULT_CLIENT_NAME, NEXT_PATH, TRANSCRIPT_PATH, WATCH_PATH};

use crate::core::{TranscriptCache, VideoId, YtError};
use constants::{DEFAULT_ACCEPT_LANGUAGE, DEFAULT_BASE_URL, DEFAULT_CLIENT_VERSION, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Configured HTTP client plus the endpoint and identity defaults shared by
/// every Innertube call. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct YtClient {
    http: Client,
    base_url: Url,
    accept_language: String,
    client_version: String,
    retry: RetryConfig,
    transcript_cache: Option<TranscriptCache>,
}

impl Default for YtClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl YtClient {
    /// Create a new builder.
    pub fn builder() -> YtClientBuilder {
        YtClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(crate) fn accept_language(&self) -> &str {
        &self.accept_language
    }

    /// Fallback WEB client version for requests whose page config lacks one.
    pub fn client_version(&self) -> &str {
        &self.client_version
    }

    pub(crate) fn transcript_cache(&self) -> Option<&TranscriptCache> {
        self.transcript_cache.as_ref()
    }

    pub fn cache_enabled(&self) -> bool {
        self.transcript_cache.is_some()
    }

    /// Normalized `<base>/watch?v=<id>` URL for a video.
    pub fn watch_url(&self, video_id: &VideoId) -> Result<Url, YtError> {
        let mut url = self.base_url.join(WATCH_PATH)?;
        url.query_pairs_mut().append_pair("v", video_id.as_str());
        Ok(url)
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, YtError> {
        Ok(self.base_url.join(path)?)
    }

    /// Sends a request, retrying transport failures (and opted-in status codes)
    /// according to the effective retry policy. The final response is returned
    /// regardless of its status; callers decide how to treat non-success codes.
    pub(crate) async fn send_with_retry(
        &self,
        req: reqwest::RequestBuilder,
        retry_override: Option<&RetryConfig>,
    ) -> Result<reqwest::Response, YtError> {
        let cfg = retry_override.unwrap_or(&self.retry);
        let mut attempt = 0u32;

        loop {
            let Some(this_try) = req.try_clone() else {
                // Streaming bodies cannot be replayed.
                return Ok(req.send().await?);
            };
            let can_retry = cfg.enabled && attempt < cfg.max_retries;

            match this_try.send().await {
                Ok(resp) => {
                    let code = resp.status().as_u16();
                    if can_retry && cfg.retry_on_status.contains(&code) {
                        tracing::debug!(status = code, attempt, "retrying on status");
                    } else {
                        return Ok(resp);
                    }
                }
                Err(e) => {
                    let retryable = (cfg.retry_on_timeout && e.is_timeout())
                        || (cfg.retry_on_connect && e.is_connect());
                    if !(can_retry && retryable) {
                        return Err(YtError::Http(e));
                    }
                    tracing::debug!(error = %e, attempt, "retrying after transport error");
                }
            }

            tokio::time::sleep(cfg.backoff.delay_for(attempt)).await;
            attempt += 1;
        }
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct YtClientBuilder {
    user_agent: Option<String>,
    base_url: Option<Url>,
    accept_language: Option<String>,
    client_version: Option<String>,
    retry: Option<RetryConfig>,
    transcript_cache: Option<TranscriptCache>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl YtClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the web origin (e.g., `https://www.youtube.com/`).
    ///
    /// Watch pages and `youtubei/v1/*` endpoints are resolved against it.
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Accept-Language header sent with watch-page fetches.
    #[must_use]
    pub fn accept_language(mut self, value: impl Into<String>) -> Self {
        self.accept_language = Some(value.into());
        self
    }

    /// WEB client version used when the page does not advertise one.
    #[must_use]
    pub fn client_version(mut self, version: impl Into<String>) -> Self {
        self.client_version = Some(version.into());
        self
    }

    /// Replace the default retry policy.
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Attach a transcript cache. Without one, transcripts are never cached.
    #[must_use]
    pub fn transcript_cache(mut self, cache: TranscriptCache) -> Self {
        self.transcript_cache = Some(cache);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    pub fn build(self) -> Result<YtClient, YtError> {
        let base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .cookie_store(true);

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(YtClient {
            http,
            base_url,
            accept_language: self
                .accept_language
                .unwrap_or_else(|| DEFAULT_ACCEPT_LANGUAGE.to_string()),
            client_version: self
                .client_version
                .unwrap_or_else(|| DEFAULT_CLIENT_VERSION.to_string()),
            retry: self.retry.unwrap_or_default(),
            transcript_cache: self.transcript_cache,
        })
    }
}
