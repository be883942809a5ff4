//! Core components of the `innertube-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`YtClient`] and its builder.
//! - The primary [`YtError`] type.
//! - [`json_path`], the ordered-candidate lookup every response parser goes through.
//! - Video id parsing and the injectable [`TranscriptCache`].

/// The transcript cache keyed by video, language preference and rendering mode.
pub mod cache;
/// The main client (`YtClient`), builder, and configuration.
pub mod client;
/// The primary error type (`YtError`) for the crate.
pub mod error;
/// Schema-drift tolerant JSON lookups.
pub mod json_path;
/// `VideoId` and `WatchTarget` parsing.
pub mod video_id;
/// Helpers for recurring Innertube wire shapes (text runs, abbreviated counts).
pub mod wire;

#[cfg(feature = "test-mode")]
pub(crate) mod fixtures;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::YtClient`
pub use cache::{TranscriptCache, TranscriptCacheKey};
pub use client::{YtClient, YtClientBuilder};
pub use error::YtError;
pub use video_id::{VideoId, WatchTarget};
