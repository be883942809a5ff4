//! Comment threads through the `next` endpoint, page by page.

mod api;
mod model;
mod pager;
mod wire;

pub use model::{CommentAuthor, CommentItem, CommentPage, CommentsMetadata, CommentsResult};
pub use pager::{CommentPager, MAX_PAGE_REQUESTS};

use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::{
    bootstrap::PageContext,
    core::{WatchTarget, YtClient, YtError, client::RetryConfig},
};

/// Pause between consecutive page requests unless overridden.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(150);

/// A builder for collecting the comments of one video.
#[derive(Debug, Clone)]
pub struct CommentsBuilder {
    client: YtClient,
    target: WatchTarget,
    max_comments: usize,
    max_replies: usize,
    page_delay: Duration,
    retry_override: Option<RetryConfig>,
    cancel: Option<CancellationToken>,
    context: PageContext,
}

impl CommentsBuilder {
    /// Creates a builder. Defaults: 100 comments, 10 replies per comment,
    /// [`DEFAULT_PAGE_DELAY`] between pages.
    pub fn new(client: &YtClient, target: impl Into<WatchTarget>) -> Self {
        Self {
            client: client.clone(),
            target: target.into(),
            max_comments: 100,
            max_replies: 10,
            page_delay: DEFAULT_PAGE_DELAY,
            retry_override: None,
            cancel: None,
            context: PageContext::default(),
        }
    }

    /// Stop once this many top-level comments have been collected.
    #[must_use]
    pub const fn max_comments(mut self, n: usize) -> Self {
        self.max_comments = n;
        self
    }

    /// Keep at most this many inline replies per comment.
    #[must_use]
    pub const fn max_replies(mut self, n: usize) -> Self {
        self.max_replies = n;
        self
    }

    #[must_use]
    pub const fn page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = delay;
        self
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Checked before every page and during the inter-page delay.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Page globals / DOM snapshot to read the runtime config from before
    /// falling back to fetching the watch page.
    #[must_use]
    pub fn page_context(mut self, ctx: PageContext) -> Self {
        self.context = ctx;
        self
    }

    /// A page cursor with this builder's settings. `max_comments` does not
    /// apply; the caller decides when to stop.
    pub fn pager(&self) -> CommentPager {
        CommentPager::new(
            self.client.clone(),
            self.target.clone(),
            self.context.clone(),
            self.max_replies,
            self.page_delay,
            self.retry_override.clone(),
            self.cancel.clone(),
        )
    }

    /// Collects comments until `max_comments` is reached, the server runs out
    /// of pages or the page ceiling is hit.
    ///
    /// A failure after the first page does not discard what was collected:
    /// the result comes back with `metadata.partial` set.
    ///
    /// # Errors
    ///
    /// [`YtError::CommentApiInit`] when the client identity cannot be
    /// obtained, [`YtError::CommentFetch`] when the first page fails and
    /// [`YtError::Cancelled`] when cancelled before the first page.
    #[tracing::instrument(skip(self), err, fields(video_id = %self.target.video_id))]
    pub async fn fetch(self) -> Result<CommentsResult, YtError> {
        let mut pager = self.pager();
        let mut comments = Vec::new();
        let mut partial_reason = None;

        while comments.len() < self.max_comments {
            match pager.next_page().await {
                Ok(Some(page)) => comments.extend(page.items),
                Ok(None) => break,
                Err(e) if pager.pages_fetched() == 0 => {
                    return Err(match e {
                        YtError::CommentApiInit(_) | YtError::Cancelled => e,
                        other => YtError::comment_fetch(other),
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        pages = pager.pages_fetched(),
                        collected = comments.len(),
                        error = %e,
                        "comment pagination stopped early; returning partial result"
                    );
                    partial_reason = Some(e.to_string());
                    break;
                }
            }
        }

        if partial_reason.is_none() && pager.ceiling_reached() {
            partial_reason = Some(format!("page request ceiling of {MAX_PAGE_REQUESTS} reached"));
        }

        let overflow = comments.len() > self.max_comments;
        comments.truncate(self.max_comments);

        Ok(CommentsResult {
            metadata: CommentsMetadata {
                video_id: self.target.video_id.clone(),
                total_count_text: pager.total_count_text().map(str::to_string),
                pages_fetched: pager.pages_fetched(),
                has_more: overflow || pager.has_more(),
                partial: partial_reason.is_some(),
                partial_reason,
                fetched_at: Utc::now(),
            },
            comments,
        })
    }
}

/// Collects up to `max_comments` comments with at most
/// `max_replies_per_comment` replies each.
///
/// # Errors
///
/// See [`CommentsBuilder::fetch`]; additionally [`YtError::InvalidVideoId`].
pub async fn fetch_comments(
    client: &YtClient,
    video: &str,
    max_comments: usize,
    max_replies_per_comment: usize,
) -> Result<CommentsResult, YtError> {
    let target = WatchTarget::parse(video)?;
    CommentsBuilder::new(client, target)
        .max_comments(max_comments)
        .max_replies(max_replies_per_comment)
        .fetch()
        .await
}
