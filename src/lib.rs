//! innertube-rs: caption transcripts and comment threads from YouTube's
//! internal web API.
//!
//! Everything goes through a [`YtClient`]. Each feature has a builder:
//!
//! - [`TranscriptBuilder`] locates the watch page's player state, picks a
//!   caption track and fetches its segments.
//! - [`CommentsBuilder`] pages through comment threads, or hands out a
//!   [`CommentPager`] for page-at-a-time consumption.
//! - [`DomPoller`] waits for an element in a live document snapshot.
//!
//! The response schema is undocumented and drifts; every lookup goes through
//! the ordered path candidates in [`core::json_path`].

pub mod bootstrap;
pub mod comments;
pub mod core;
pub mod dom;
pub mod transcript;

pub use bootstrap::{
    BootstrapLocator, BootstrapStrategy, ClientIdentity, PageBootstrapState, PageContext,
    RuntimeConfig,
};
pub use comments::{
    CommentAuthor, CommentItem, CommentPage, CommentPager, CommentsBuilder, CommentsMetadata,
    CommentsResult, fetch_comments,
};
pub use crate::core::{
    TranscriptCache, TranscriptCacheKey, VideoId, WatchTarget, YtClient, YtClientBuilder, YtError,
    client::{Backoff, CacheMode, RetryConfig},
};
pub use dom::{DomMatch, DomPoller, DomSource};
pub use transcript::{
    CaptionTrack, TrackKind, Transcript, TranscriptBuilder, TranscriptSegment, encode_params,
    fetch_transcript, select_track,
};

pub use tokio_util::sync::CancellationToken;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`. Safe to call more than
/// once; later calls are no-ops.
#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
