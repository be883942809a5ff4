use std::fmt::Write as _;

use serde::Serialize;

use crate::core::VideoId;

/// Human-authored vs automatically generated captions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    #[default]
    Normal,
    /// Automatic speech recognition.
    Asr,
}

impl TrackKind {
    /// Maps the track's wire `kind` field; anything but `"asr"` is a normal track.
    pub fn from_wire(kind: Option<&str>) -> Self {
        match kind {
            Some(k) if k.eq_ignore_ascii_case("asr") => Self::Asr,
            _ => Self::Normal,
        }
    }

    /// Value for the transcript params; normal tracks omit the field.
    pub const fn as_param(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Asr => Some("asr"),
        }
    }
}

/// A caption track listed in the page's player state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptionTrack {
    pub language_code: String,
    pub kind: TrackKind,
    /// Opaque timedtext endpoint for this track.
    pub base_url: String,
    pub display_name: String,
}

/// One timed line of a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start_ms: Option<i64>,
    pub end_ms: Option<i64>,
}

/// Segments of one track, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    pub video_id: VideoId,
    /// The track the segments came from; `None` when the video has no captions.
    pub track: Option<CaptionTrack>,
    pub segments: Vec<TranscriptSegment>,
    /// Whether [`Transcript::text`] prefixes lines with timestamps.
    pub include_timestamps: bool,
}

impl Transcript {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Plain-text rendering: one `[mm:ss] text` line per segment when
    /// timestamps are requested, otherwise the segment texts joined by spaces.
    pub fn text(&self) -> String {
        if !self.include_timestamps {
            return self
                .segments
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
        }

        let mut out = String::new();
        for seg in &self.segments {
            match seg.start_ms {
                Some(ms) => {
                    let _ = writeln!(out, "[{}] {}", format_timestamp(ms), seg.text);
                }
                None => {
                    let _ = writeln!(out, "{}", seg.text);
                }
            }
        }
        out
    }
}

/// `mm:ss`, or `h:mm:ss` past the first hour.
pub fn format_timestamp(ms: i64) -> String {
    let total = ms.max(0) / 1000;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}
