use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use url::Url;

use crate::core::YtError;

/// Opaque, non-empty video identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    /// Accepts a bare id or any of the common watch URL shapes:
    /// `watch?v=<id>`, `youtu.be/<id>`, `/shorts/<id>`, `/embed/<id>`,
    /// `/live/<id>` and `/v/<id>`.
    ///
    /// # Errors
    ///
    /// Returns [`YtError::InvalidVideoId`] when no non-empty id can be found.
    pub fn parse(input: &str) -> Result<Self, YtError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(YtError::InvalidVideoId(input.to_string()));
        }
        match parse_url_like(trimmed) {
            Some(url) => Self::from_url(&url),
            None => Self::from_bare(trimmed),
        }
    }

    /// Extracts the id from a watch-page URL.
    ///
    /// # Errors
    ///
    /// Returns [`YtError::InvalidVideoId`] when the URL carries no id.
    pub fn from_url(url: &Url) -> Result<Self, YtError> {
        let invalid = || YtError::InvalidVideoId(url.to_string());

        if let Some((_, v)) = url.query_pairs().find(|(k, _)| k == "v") {
            return Self::from_bare(v.trim()).map_err(|_| invalid());
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();

        let host = url.host_str().unwrap_or_default();
        if host.ends_with("youtu.be") {
            return segments
                .first()
                .ok_or_else(invalid)
                .and_then(|id| Self::from_bare(id).map_err(|_| invalid()));
        }

        match segments.as_slice() {
            [prefix, id, ..] if matches!(*prefix, "shorts" | "embed" | "live" | "v") => {
                Self::from_bare(id).map_err(|_| invalid())
            }
            _ => Err(invalid()),
        }
    }

    fn from_bare(id: &str) -> Result<Self, YtError> {
        let ok = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if ok {
            Ok(Self(id.to_string()))
        } else {
            Err(YtError::InvalidVideoId(id.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse_url_like(s: &str) -> Option<Url> {
    if s.starts_with("http://") || s.starts_with("https://") {
        return Url::parse(s).ok();
    }
    let lower = s.to_ascii_lowercase();
    if lower.contains("youtube.com/") || lower.starts_with("youtu.be/") {
        return Url::parse(&format!("https://{s}")).ok();
    }
    None
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for VideoId {
    type Err = YtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// What the caller asked for: the video plus, when a URL was supplied, the
/// exact page URL to fetch first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub video_id: VideoId,
    pub page_url: Option<Url>,
}

impl WatchTarget {
    /// # Errors
    ///
    /// Returns [`YtError::InvalidVideoId`] when no id can be extracted.
    pub fn parse(input: &str) -> Result<Self, YtError> {
        let trimmed = input.trim();
        match parse_url_like(trimmed) {
            Some(url) => Ok(Self {
                video_id: VideoId::from_url(&url)?,
                page_url: Some(url),
            }),
            None => Ok(Self {
                video_id: VideoId::parse(trimmed)?,
                page_url: None,
            }),
        }
    }
}

impl From<VideoId> for WatchTarget {
    fn from(video_id: VideoId) -> Self {
        Self {
            video_id,
            page_url: None,
        }
    }
}
