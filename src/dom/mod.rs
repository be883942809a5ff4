//! Polling a changing document until an element shows up.
//!
//! The web UI renders transcript panels and comment sections lazily, so
//! callers that drive a live page need to wait for a selector to match before
//! reading it. The document itself is supplied through [`DomSource`].

use std::time::Duration;

use scraper::{Html, Selector};
use tokio::time::Instant;

use crate::core::YtError;

/// Anything that can produce the current serialized HTML of a document.
///
/// Returning `None` means "no snapshot right now"; the poller tries again
/// on the next tick.
pub trait DomSource {
    fn snapshot(&self) -> Option<String>;
}

impl<F> DomSource for F
where
    F: Fn() -> Option<String>,
{
    fn snapshot(&self) -> Option<String> {
        self()
    }
}

impl DomSource for str {
    fn snapshot(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl DomSource for String {
    fn snapshot(&self) -> Option<String> {
        Some(self.clone())
    }
}

/// The first element that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomMatch {
    /// Outer HTML.
    pub html: String,
    pub inner_html: String,
    /// Concatenated text nodes, trimmed.
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
pub struct DomPoller {
    interval: Duration,
    timeout: Duration,
}

impl Default for DomPoller {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(100),
            timeout: Duration::from_secs(5),
        }
    }
}

impl DomPoller {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn interval(mut self, every: Duration) -> Self {
        self.interval = every;
        self
    }

    #[must_use]
    pub const fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = limit;
        self
    }

    /// Polls `source` until `selector` matches or the timeout elapses. The
    /// document is checked once immediately, so a zero timeout still performs
    /// a single lookup.
    ///
    /// # Errors
    ///
    /// [`YtError::InvalidSelector`] for a selector that does not parse,
    /// [`YtError::ElementNotFound`] on timeout.
    pub async fn wait_for<S>(&self, source: &S, selector: &str) -> Result<DomMatch, YtError>
    where
        S: DomSource + ?Sized,
    {
        let sel = Selector::parse(selector)
            .map_err(|e| YtError::InvalidSelector(format!("{selector}: {e}")))?;
        let started = Instant::now();
        let mut polls = 0u32;

        loop {
            polls += 1;
            if let Some(doc) = source.snapshot()
                && let Some(found) = first_match(&doc, &sel)
            {
                tracing::debug!(selector, polls, "element found");
                return Ok(found);
            }

            let waited = started.elapsed();
            if waited >= self.timeout {
                tracing::debug!(selector, polls, "element wait timed out");
                return Err(YtError::ElementNotFound {
                    selector: selector.to_string(),
                    waited_ms: u64::try_from(waited.as_millis()).unwrap_or(u64::MAX),
                });
            }
            tokio::time::sleep(self.interval.min(self.timeout - waited)).await;
        }
    }
}

// `Html` is not `Send`; keep it out of the async state.
fn first_match(doc: &str, sel: &Selector) -> Option<DomMatch> {
    let parsed = Html::parse_document(doc);
    parsed.select(sel).next().map(|el| DomMatch {
        html: el.html(),
        inner_html: el.inner_html(),
        text: el.text().collect::<String>().trim().to_string(),
    })
}
