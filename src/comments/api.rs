use serde::Serialize;
use serde_json::Value;

use super::wire::{self, ParsedPage};
use crate::{
    bootstrap::ClientIdentity,
    core::{
        VideoId, YtClient, YtError,
        client::{NEXT_PATH, RetryConfig},
        net,
        wire::RequestContext,
    },
};

#[derive(Serialize)]
struct NextRequest<'a> {
    context: RequestContext<'a>,
    #[serde(rename = "videoId", skip_serializing_if = "Option::is_none")]
    video_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    continuation: Option<&'a str>,
}

/// Requests one page from the `next` endpoint: the video's first page when
/// `continuation` is `None`, otherwise the page behind the token.
pub(super) async fn fetch_page(
    client: &YtClient,
    identity: &ClientIdentity,
    video_id: &VideoId,
    continuation: Option<&str>,
    index: u32,
    max_replies: usize,
    retry_override: Option<&RetryConfig>,
) -> Result<ParsedPage, YtError> {
    let mut url = client.endpoint(NEXT_PATH)?;
    url.query_pairs_mut()
        .append_pair("key", &identity.api_key)
        .append_pair("prettyPrint", "false");

    let payload = NextRequest {
        context: RequestContext::new(&identity.client_name, &identity.client_version)
            .visitor_data(identity.visitor_data.as_deref())
            .hl(identity.hl.as_deref()),
        video_id: continuation.is_none().then_some(video_id.as_str()),
        continuation,
    };

    let req = client.http().post(url).json(&payload);
    let resp = client.send_with_retry(req, retry_override).await?;

    if !resp.status().is_success() {
        return Err(YtError::Status {
            status: resp.status().as_u16(),
            url: resp.url().path().to_string(),
        });
    }

    let endpoint = format!("comments_p{index}");
    let body = net::get_text(resp, &endpoint, video_id.as_str(), "json").await?;
    let json: Value = serde_json::from_str(&body)?;
    Ok(wire::parse_page(&json, max_replies))
}
