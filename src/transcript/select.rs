use super::model::{CaptionTrack, TrackKind};

/// Picks the best track for a language preference list.
///
/// Rank is the position of the track's language in `preferred` (unlisted
/// languages rank last) plus half a step for ASR tracks, so an exact
/// human-authored match beats auto-generated captions of the same language,
/// and any listed language beats an unlisted one. Ties keep list order.
/// With no listed language present, the first non-ASR track wins, else the
/// first track.
///
/// Returns `None` only for an empty track list.
pub fn select_track<'a, S: AsRef<str>>(
    tracks: &'a [CaptionTrack],
    preferred: &[S],
) -> Option<&'a CaptionTrack> {
    // (position, asr) compares exactly like `position + 0.5 * asr` for
    // integer positions, without floats.
    tracks.iter().min_by_key(|t| {
        let position = preferred
            .iter()
            .position(|p| p.as_ref() == t.language_code)
            .unwrap_or(usize::MAX);
        (position, t.kind == TrackKind::Asr)
    })
}
