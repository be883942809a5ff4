use serde::Deserialize;
use serde_json::Value;

use super::model::{CaptionTrack, TrackKind, TranscriptSegment};
use crate::core::{json_path, wire::text_of};

/// Where the caption track list lives in the player state. The state root is
/// either the player response itself or an object wrapping it.
pub(crate) const CAPTION_TRACKS: &[&str] = &[
    "captions.playerCaptionsTracklistRenderer.captionTracks",
    "playerResponse.captions.playerCaptionsTracklistRenderer.captionTracks",
    "response.captions.playerCaptionsTracklistRenderer.captionTracks",
];

const SEGMENT_LIST: &[&str] = &[
    "actions[0].updateEngagementPanelAction.content.transcriptRenderer.content.transcriptSearchPanelRenderer.body.transcriptSegmentListRenderer.initialSegments",
    "actions[*].updateEngagementPanelAction.content.transcriptRenderer.content.transcriptSearchPanelRenderer.body.transcriptSegmentListRenderer.initialSegments",
];

// Older panel shape: cue groups instead of segment renderers.
const CUE_GROUPS: &[&str] = &[
    "actions[0].updateEngagementPanelAction.content.transcriptRenderer.body.transcriptBodyRenderer.cueGroups",
    "actions[*].updateEngagementPanelAction.content.transcriptRenderer.body.transcriptBodyRenderer.cueGroups",
];

const SEGMENT_TEXT: &[&str] = &["snippet", "snippet.runs[0]"];
const START_MS: &[&str] = &["startMs", "startTimeMs"];
const END_MS: &[&str] = &["endMs", "endTimeMs"];

/* --------- Minimal serde mapping for caption tracks --------- */

#[derive(Deserialize)]
struct RawCaptionTrack {
    #[serde(rename = "languageCode")]
    language_code: String,
    kind: Option<String>,
    #[serde(rename = "baseUrl", default)]
    base_url: String,
    name: Option<Value>,
    #[serde(rename = "vssId")]
    vss_id: Option<String>,
}

impl From<RawCaptionTrack> for CaptionTrack {
    fn from(raw: RawCaptionTrack) -> Self {
        // `vssId` starts with "a." for ASR tracks even when `kind` is missing.
        let kind = match raw.kind.as_deref() {
            Some(k) => TrackKind::from_wire(Some(k)),
            None if raw.vss_id.as_deref().is_some_and(|v| v.starts_with("a.")) => TrackKind::Asr,
            None => TrackKind::Normal,
        };
        let display_name = raw
            .name
            .as_ref()
            .and_then(text_of)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| raw.language_code.clone());
        Self {
            language_code: raw.language_code,
            kind,
            base_url: raw.base_url,
            display_name,
        }
    }
}

/// Caption tracks listed in a player state, in page order. Entries that do
/// not carry a language code are skipped.
pub(crate) fn caption_tracks(root: &Value) -> Vec<CaptionTrack> {
    json_path::get_array(root, CAPTION_TRACKS)
        .map(|arr| {
            arr.iter()
                .filter_map(|t| RawCaptionTrack::deserialize(t).ok())
                .map(CaptionTrack::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Maps a `get_transcript` response to segments, dropping lines without text.
pub(crate) fn segments_from_response(resp: &Value) -> Vec<TranscriptSegment> {
    if let Some(list) = json_path::get_array(resp, SEGMENT_LIST) {
        return list.iter().filter_map(segment_from_renderer).collect();
    }
    if let Some(groups) = json_path::get_array(resp, CUE_GROUPS) {
        return groups
            .iter()
            .filter_map(|g| json_path::get_array(g, &["transcriptCueGroupRenderer.cues"]))
            .flatten()
            .filter_map(segment_from_cue)
            .collect();
    }
    Vec::new()
}

fn non_empty(text: Option<String>) -> Option<String> {
    let t = text?.trim().to_string();
    (!t.is_empty()).then_some(t)
}

fn segment_from_renderer(item: &Value) -> Option<TranscriptSegment> {
    // Section headers and other renderer kinds share the list.
    let r = json_path::get(item, &["transcriptSegmentRenderer"])?;
    let text = non_empty(json_path::get(r, SEGMENT_TEXT).and_then(text_of))?;
    Some(TranscriptSegment {
        text,
        start_ms: json_path::get_i64(r, START_MS),
        end_ms: json_path::get_i64(r, END_MS),
    })
}

fn segment_from_cue(cue: &Value) -> Option<TranscriptSegment> {
    let r = json_path::get(cue, &["transcriptCueRenderer"])?;
    let text = non_empty(json_path::get(r, &["cue"]).and_then(text_of))?;
    let start = json_path::get_i64(r, &["startOffsetMs"]);
    let duration = json_path::get_i64(r, &["durationMs"]);
    Some(TranscriptSegment {
        text,
        start_ms: start,
        end_ms: start.zip(duration).map(|(s, d)| s + d),
    })
}
