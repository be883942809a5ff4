use serde::Serialize;
use serde_json::Value;

use super::{model::CaptionTrack, model::TranscriptSegment, params::encode_params, wire};
use crate::{
    bootstrap::PageBootstrapState,
    core::{
        YtClient, YtError,
        client::{DEFAULT_CLIENT_NAME, RetryConfig, TRANSCRIPT_PATH},
        net,
        wire::RequestContext,
    },
};

#[derive(Serialize)]
struct TranscriptRequest<'a> {
    context: RequestContext<'a>,
    params: String,
}

/// Posts the transcript request for `track` and parses the segments.
///
/// No API key or cookies are attached; only the minimal client identity.
pub(super) async fn fetch_segments(
    client: &YtClient,
    state: &PageBootstrapState,
    track: &CaptionTrack,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<TranscriptSegment>, YtError> {
    let url = client.endpoint(TRANSCRIPT_PATH)?;
    let client_version = state
        .runtime_config()
        .and_then(|c| c.client_version.as_deref())
        .unwrap_or(client.client_version());

    let payload = TranscriptRequest {
        context: RequestContext::new(DEFAULT_CLIENT_NAME, client_version),
        params: encode_params(state.video_id().as_str(), track.kind, &track.language_code),
    };

    let req = client.http().post(url.clone()).json(&payload);
    let resp = client.send_with_retry(req, retry_override).await?;

    if !resp.status().is_success() {
        return Err(YtError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }

    let body = net::get_text(resp, "transcript", state.video_id().as_str(), "json").await?;
    let json: Value = serde_json::from_str(&body)?;
    let segments = wire::segments_from_response(&json);

    tracing::debug!(
        language = %track.language_code,
        kind = ?track.kind,
        segments = segments.len(),
        "transcript parsed"
    );
    Ok(segments)
}
