//! Caption transcripts: track selection, request params and the
//! `get_transcript` call.

mod api;
mod model;
mod params;
mod select;
mod wire;

pub use model::{CaptionTrack, TrackKind, Transcript, TranscriptSegment, format_timestamp};
pub use params::encode_params;
pub use select::select_track;

use crate::{
    bootstrap::{BootstrapLocator, BootstrapStrategy, PageBootstrapState, PageContext},
    core::{
        TranscriptCacheKey, WatchTarget, YtClient, YtError,
        client::{CacheMode, RetryConfig},
    },
};

/// A builder for fetching the transcript of one video.
#[derive(Debug, Clone)]
pub struct TranscriptBuilder {
    client: YtClient,
    target: WatchTarget,
    languages: Vec<String>,
    include_timestamps: bool,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
    context: PageContext,
    strategies: Option<Vec<BootstrapStrategy>>,
}

impl TranscriptBuilder {
    /// Creates a builder for a video. Defaults: languages `["en"]`, no
    /// timestamps, [`CacheMode::Use`].
    pub fn new(client: &YtClient, target: impl Into<WatchTarget>) -> Self {
        Self {
            client: client.clone(),
            target: target.into(),
            languages: vec!["en".to_string()],
            include_timestamps: false,
            cache_mode: CacheMode::Use,
            retry_override: None,
            context: PageContext::default(),
            strategies: None,
        }
    }

    /// Language preference, most preferred first.
    #[must_use]
    pub fn languages<I, S>(mut self, langs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = langs.into_iter().map(Into::into).collect();
        self
    }

    /// Render [`Transcript::text`] with `[mm:ss]` prefixes.
    #[must_use]
    pub const fn include_timestamps(mut self, yes: bool) -> Self {
        self.include_timestamps = yes;
        self
    }

    /// Sets the cache mode for this call. Only effective when the client has
    /// a transcript cache.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// DOM snapshot / page globals for the in-page bootstrap strategies.
    #[must_use]
    pub fn page_context(mut self, ctx: PageContext) -> Self {
        self.context = ctx;
        self
    }

    /// Overrides the bootstrap strategy order.
    #[must_use]
    pub fn strategies(mut self, order: impl IntoIterator<Item = BootstrapStrategy>) -> Self {
        self.strategies = Some(order.into_iter().collect());
        self
    }

    async fn locate(&self) -> Result<PageBootstrapState, YtError> {
        let mut locator = BootstrapLocator::new(&self.client).context(self.context.clone());
        if let Some(order) = &self.strategies {
            locator = locator.strategies(order.iter().copied());
        }
        locator.locate(&self.target).await
    }

    /// Lists the caption tracks of the video.
    ///
    /// # Errors
    ///
    /// [`YtError::BootstrapNotFound`] when the player state cannot be located,
    /// [`YtError::NoCaptionTracks`] when it lists no tracks.
    pub async fn tracks(&self) -> Result<Vec<CaptionTrack>, YtError> {
        let state = self.locate().await?;
        self.tracks_of(&state)
    }

    fn tracks_of(&self, state: &PageBootstrapState) -> Result<Vec<CaptionTrack>, YtError> {
        let tracks = wire::caption_tracks(state.root());
        if tracks.is_empty() {
            return Err(YtError::NoCaptionTracks {
                video_id: self.target.video_id.to_string(),
            });
        }
        Ok(tracks)
    }

    /// The track [`fetch`](Self::fetch) would use.
    ///
    /// # Errors
    ///
    /// Same as [`tracks`](Self::tracks).
    pub async fn select(&self) -> Result<CaptionTrack, YtError> {
        let tracks = self.tracks().await?;
        select_track(&tracks, &self.languages)
            .cloned()
            .ok_or_else(|| YtError::NoCaptionTracks {
                video_id: self.target.video_id.to_string(),
            })
    }

    /// Executes the request and fetches the transcript.
    ///
    /// A video without captions yields an empty transcript, not an error.
    ///
    /// # Errors
    ///
    /// [`YtError::BootstrapNotFound`] when the player state cannot be located;
    /// [`YtError::Status`] / [`YtError::Http`] when the transcript request fails.
    #[tracing::instrument(skip(self), err, fields(video_id = %self.target.video_id))]
    pub async fn fetch(self) -> Result<Transcript, YtError> {
        let video_id = self.target.video_id.clone();
        let key = TranscriptCacheKey::new(
            video_id.clone(),
            &self.languages,
            self.include_timestamps,
        );
        let cache = self
            .client
            .transcript_cache()
            .filter(|_| self.cache_mode != CacheMode::Bypass);

        if let Some(cache) = cache {
            cache.set_active_video(&video_id).await;
            if self.cache_mode == CacheMode::Use
                && let Some(hit) = cache.get(&key).await
            {
                tracing::debug!("transcript served from cache");
                return Ok(hit);
            }
        }

        let state = self.locate().await?;
        let tracks = match self.tracks_of(&state) {
            Ok(t) => t,
            Err(YtError::NoCaptionTracks { .. }) => {
                tracing::debug!("video has no caption tracks");
                return Ok(Transcript {
                    video_id,
                    track: None,
                    segments: Vec::new(),
                    include_timestamps: self.include_timestamps,
                });
            }
            Err(e) => return Err(e),
        };

        let track = select_track(&tracks, &self.languages)
            .cloned()
            .ok_or_else(|| YtError::NoCaptionTracks {
                video_id: video_id.to_string(),
            })?;
        tracing::debug!(
            language = %track.language_code,
            kind = ?track.kind,
            available = tracks.len(),
            "caption track selected"
        );

        let segments =
            api::fetch_segments(&self.client, &state, &track, self.retry_override.as_ref()).await?;

        let transcript = Transcript {
            video_id,
            track: Some(track),
            segments,
            include_timestamps: self.include_timestamps,
        };

        if let Some(cache) = cache
            && !transcript.is_empty()
        {
            cache.put(key, transcript.clone()).await;
        }
        Ok(transcript)
    }
}

/// Fetches the segments of the best-matching caption track.
///
/// `video` may be a bare id or a watch URL. Returns an empty list when the
/// video has no captions.
///
/// # Errors
///
/// See [`TranscriptBuilder::fetch`]; additionally [`YtError::InvalidVideoId`].
pub async fn fetch_transcript<S: AsRef<str>>(
    client: &YtClient,
    video: &str,
    preferred_languages: &[S],
) -> Result<Vec<TranscriptSegment>, YtError> {
    let target = WatchTarget::parse(video)?;
    let transcript = TranscriptBuilder::new(client, target)
        .languages(preferred_languages.iter().map(|s| s.as_ref().to_string()))
        .fetch()
        .await?;
    Ok(transcript.segments)
}
