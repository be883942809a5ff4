//! Opaque `params` blob for the transcript endpoint.
//!
//! Two nested protobuf messages, each base64-encoded: the inner one names the
//! track (kind, language), the outer one pairs the video id with the inner
//! blob. The endpoint is strict about the exact bytes: a normal track must
//! omit the kind field entirely (an empty string is not the same), and field
//! order follows the tags. A mismatch typically yields HTTP 200 with no
//! segments rather than an error.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use prost::Message;

use super::model::TrackKind;

#[derive(Clone, PartialEq, Message)]
struct TrackParams {
    #[prost(string, optional, tag = "1")]
    kind: Option<String>,
    #[prost(string, tag = "2")]
    language_code: String,
}

#[derive(Clone, PartialEq, Message)]
struct TranscriptParams {
    #[prost(string, tag = "1")]
    video_id: String,
    /// Base64 of an encoded [`TrackParams`].
    #[prost(string, tag = "2")]
    track: String,
}

/// Encodes the transcript request params. Deterministic for equal inputs.
pub fn encode_params(video_id: &str, kind: TrackKind, language_code: &str) -> String {
    let inner = TrackParams {
        kind: kind.as_param().map(str::to_string),
        language_code: language_code.to_string(),
    };
    let outer = TranscriptParams {
        video_id: video_id.to_string(),
        track: STANDARD.encode(inner.encode_to_vec()),
    };
    STANDARD.encode(outer.encode_to_vec())
}
