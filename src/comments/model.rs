use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::VideoId;

/// Who wrote a comment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CommentAuthor {
    pub name: String,
    pub channel_id: Option<String>,
    /// The author owns the channel the video was uploaded to.
    pub is_channel_owner: bool,
    pub is_verified: bool,
}

/// A top-level comment or one of its replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentItem {
    pub comment_id: String,
    pub author: CommentAuthor,
    pub text: String,
    pub like_count: u64,
    /// Reply count as reported by the server, which may exceed `replies.len()`.
    pub reply_count: u64,
    /// Relative time as rendered by the web UI (e.g. `"2 days ago"`).
    pub published_time: Option<String>,
    /// Inline replies, flattened one level. Always empty on replies.
    pub replies: Vec<CommentItem>,
}

/// One page as returned by [`CommentPager`](super::CommentPager), already
/// de-duplicated against earlier pages of the same pager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentPage {
    /// Zero-based request index.
    pub index: u32,
    pub items: Vec<CommentItem>,
    /// Whether the server returned a token for another page.
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentsMetadata {
    pub video_id: VideoId,
    /// Header text such as `"1,234 Comments"`, when the server sent one.
    pub total_count_text: Option<String>,
    pub pages_fetched: u32,
    /// More comments were available when collection stopped.
    pub has_more: bool,
    /// A page after the first failed, the caller cancelled, or the page
    /// request ceiling stopped collection; the comments gathered up to that
    /// point are still returned.
    pub partial: bool,
    pub partial_reason: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentsResult {
    pub comments: Vec<CommentItem>,
    pub metadata: CommentsMetadata,
}
