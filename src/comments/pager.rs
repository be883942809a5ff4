use std::collections::HashSet;
use std::time::Duration;

use futures::Stream;
use tokio_util::sync::CancellationToken;

use super::{api, model::CommentItem, model::CommentPage};
use crate::{
    bootstrap::{BootstrapLocator, ClientIdentity, PageContext},
    core::{WatchTarget, YtClient, YtError, client::RetryConfig},
};

/// Hard ceiling on `next` requests per pager, whatever the server returns.
pub const MAX_PAGE_REQUESTS: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PagerState {
    Init,
    HasMore,
    Done,
}

/// Lazy cursor over the comment pages of one video.
///
/// Each call to [`next_page`](Self::next_page) issues at most one request.
/// Items are de-duplicated across pages by comment id and by normalized text.
/// A pager is not resumable: once it reports `None` or an error it stays
/// finished.
#[derive(Debug)]
pub struct CommentPager {
    client: YtClient,
    target: WatchTarget,
    context: PageContext,
    identity: Option<ClientIdentity>,
    continuation: Option<String>,
    state: PagerState,
    requests: u32,
    max_replies: usize,
    page_delay: Duration,
    retry_override: Option<RetryConfig>,
    cancel: Option<CancellationToken>,
    seen_ids: HashSet<String>,
    seen_texts: HashSet<String>,
    sent_tokens: HashSet<String>,
    ceiling_reached: bool,
    total_count_text: Option<String>,
}

impl CommentPager {
    pub(super) fn new(
        client: YtClient,
        target: WatchTarget,
        context: PageContext,
        max_replies: usize,
        page_delay: Duration,
        retry_override: Option<RetryConfig>,
        cancel: Option<CancellationToken>,
    ) -> Self {
        Self {
            client,
            target,
            context,
            identity: None,
            continuation: None,
            state: PagerState::Init,
            requests: 0,
            max_replies,
            page_delay,
            retry_override,
            cancel,
            seen_ids: HashSet::new(),
            seen_texts: HashSet::new(),
            sent_tokens: HashSet::new(),
            ceiling_reached: false,
            total_count_text: None,
        }
    }

    /// Number of page requests that returned successfully.
    pub fn pages_fetched(&self) -> u32 {
        self.requests
    }

    /// Whether the last page carried a continuation token.
    pub fn has_more(&self) -> bool {
        self.state == PagerState::HasMore
    }

    /// Whether paging stopped at [`MAX_PAGE_REQUESTS`] while the server still
    /// offered a continuation token.
    pub fn ceiling_reached(&self) -> bool {
        self.ceiling_reached
    }

    /// Header text like `"1,234 Comments"`, once a page carrying it was seen.
    pub fn total_count_text(&self) -> Option<&str> {
        self.total_count_text.as_deref()
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    async fn pause(&self) -> Result<(), YtError> {
        if self.page_delay.is_zero() {
            return Ok(());
        }
        match &self.cancel {
            Some(token) => tokio::select! {
                () = token.cancelled() => Err(YtError::Cancelled),
                () = tokio::time::sleep(self.page_delay) => Ok(()),
            },
            None => {
                tokio::time::sleep(self.page_delay).await;
                Ok(())
            }
        }
    }

    async fn identity(&mut self) -> Result<ClientIdentity, YtError> {
        if let Some(id) = &self.identity {
            return Ok(id.clone());
        }
        let cfg = BootstrapLocator::new(&self.client)
            .context(self.context.clone())
            .runtime_config(&self.target)
            .await?;
        let id = cfg.identity()?;
        tracing::debug!(client_name = %id.client_name, client_version = %id.client_version, "comment client identity resolved");
        self.identity = Some(id.clone());
        Ok(id)
    }

    fn keep(&mut self, item: &CommentItem) -> bool {
        if !self.seen_ids.insert(item.comment_id.clone()) {
            return false;
        }
        let norm = item.text.trim().to_lowercase();
        norm.is_empty() || self.seen_texts.insert(norm)
    }

    /// Fetches the next page. Returns `Ok(None)` once the server stops
    /// returning fresh continuation tokens or [`MAX_PAGE_REQUESTS`] is reached
    /// (see [`ceiling_reached`](Self::ceiling_reached)).
    ///
    /// # Errors
    ///
    /// [`YtError::CommentApiInit`] when the client identity cannot be
    /// obtained, [`YtError::Cancelled`] when the cancellation token fires, or
    /// the request/parse error of the page. The pager is finished afterwards.
    pub async fn next_page(&mut self) -> Result<Option<CommentPage>, YtError> {
        if self.state == PagerState::Done || self.ceiling_reached {
            return Ok(None);
        }
        if self.requests >= MAX_PAGE_REQUESTS {
            tracing::warn!(
                video_id = %self.target.video_id,
                limit = MAX_PAGE_REQUESTS,
                "comment page ceiling reached"
            );
            // State stays HasMore: the server still had pages.
            self.ceiling_reached = true;
            return Ok(None);
        }

        let outcome = self.fetch_next().await;
        if outcome.is_err() {
            self.state = PagerState::Done;
        }
        outcome.map(Some)
    }

    async fn fetch_next(&mut self) -> Result<CommentPage, YtError> {
        if self.is_cancelled() {
            return Err(YtError::Cancelled);
        }
        if self.state == PagerState::HasMore {
            self.pause().await?;
        }
        let identity = self.identity().await?;
        if self.is_cancelled() {
            return Err(YtError::Cancelled);
        }

        let index = self.requests;
        if let Some(token) = &self.continuation {
            self.sent_tokens.insert(token.clone());
        }
        let parsed = api::fetch_page(
            &self.client,
            &identity,
            &self.target.video_id,
            self.continuation.as_deref(),
            index,
            self.max_replies,
            self.retry_override.as_ref(),
        )
        .await?;
        self.requests += 1;

        if self.total_count_text.is_none() {
            self.total_count_text = parsed.total_count_text;
        }

        let raw = parsed.items.len();
        let mut items = parsed.items;
        items.retain(|c| self.keep(c));

        // Tokens are single-use; any token already sent means the chain cycles.
        let next = parsed
            .continuation
            .filter(|t| !self.sent_tokens.contains(t));
        self.state = if next.is_some() {
            PagerState::HasMore
        } else {
            PagerState::Done
        };
        self.continuation = next;

        tracing::debug!(
            page = index,
            items = items.len(),
            duplicates = raw - items.len(),
            has_more = self.has_more(),
            "comment page fetched"
        );

        Ok(CommentPage {
            index,
            items,
            has_more: self.has_more(),
        })
    }

    /// Turns the pager into a stream of pages. The stream ends after the last
    /// page or right after yielding an error.
    pub fn into_stream(self) -> impl Stream<Item = Result<CommentPage, YtError>> {
        futures::stream::unfold(self, |mut pager| async move {
            match pager.next_page().await {
                Ok(Some(page)) => Some((Ok(page), pager)),
                Ok(None) => None,
                Err(e) => Some((Err(e), pager)),
            }
        })
    }
}
