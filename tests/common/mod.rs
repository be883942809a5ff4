#![allow(dead_code)]

use httpmock::{Method::GET, Mock, MockServer};
use serde_json::{Value, json};
use std::{fs, path::Path};
use url::Url;

use innertube_rs::YtClient;

pub const VIDEO_ID: &str = "dQw4w9WgXcQ";
pub const API_KEY: &str = "AIzaTestKey";
pub const CLIENT_VERSION: &str = "2.20240611.01.00";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fixture(endpoint: &str, video_id: &str, ext: &str) -> String {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let filename = format!("{endpoint}_{video_id}.{ext}");
    let path = dir.join(&filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn live_or_record_enabled() -> bool {
    std::env::var("YT_LIVE").ok().as_deref() == Some("1") || is_recording()
}

pub fn is_recording() -> bool {
    std::env::var("YT_RECORD").ok().as_deref() == Some("1")
}

/// Client pointed at the mock server with retries off, so failure tests do
/// not sit through backoff.
pub fn client_for(server: &MockServer) -> YtClient {
    YtClient::builder()
        .base_url(Url::parse(&format!("{}/", server.base_url())).unwrap())
        .retry_config(innertube_rs::RetryConfig {
            enabled: false,
            ..Default::default()
        })
        .build()
        .unwrap()
}

/* ------------------- Synthetic page content ------------------- */

pub fn caption_track(lang: &str, asr: bool) -> Value {
    let mut t = json!({
        "baseUrl": format!("https://www.youtube.com/api/timedtext?v={VIDEO_ID}&lang={lang}"),
        "name": {"simpleText": lang},
        "vssId": if asr { format!("a.{lang}") } else { format!(".{lang}") },
        "languageCode": lang,
    });
    if asr {
        t["kind"] = json!("asr");
    }
    t
}

pub fn player_response(video_id: &str, tracks: &[Value]) -> Value {
    json!({
        "videoDetails": {"videoId": video_id, "title": "Test video"},
        "captions": {
            "playerCaptionsTracklistRenderer": {"captionTracks": tracks}
        }
    })
}

pub fn ytcfg_script() -> String {
    format!(
        r#"<script>ytcfg.set({{"INNERTUBE_API_KEY":"{API_KEY}","INNERTUBE_CONTEXT_CLIENT_NAME":1,"INNERTUBE_CONTEXT_CLIENT_VERSION":"{CLIENT_VERSION}","VISITOR_DATA":"CgtWaXNpdG9y"}});</script>"#
    )
}

/// A watch page the way it is served: config block plus the inline assignment.
pub fn watch_page_html(state: &Value) -> String {
    format!(
        "<!DOCTYPE html><html><head>{cfg}</head><body>\n<script nonce=\"n\">var ytInitialPlayerResponse = {state};var meta = document.createElement('meta');</script>\n<div id=\"player\"></div></body></html>",
        cfg = ytcfg_script(),
    )
}

/// A served page without any player state.
pub fn bare_page_html() -> String {
    "<!DOCTYPE html><html><head><title>YouTube</title></head><body><div id=\"content\"></div></body></html>".to_string()
}

pub fn mock_watch_page<'a>(server: &'a MockServer, video_id: &'a str, body: String) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET).path("/watch").query_param("v", video_id);
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(body);
    })
}

pub fn transcript_response(lines: &[(&str, i64, i64)]) -> Value {
    let segments: Vec<Value> = lines
        .iter()
        .map(|(text, start, end)| {
            json!({"transcriptSegmentRenderer": {
                "startMs": start.to_string(),
                "endMs": end.to_string(),
                "snippet": {"runs": [{"text": text}]}
            }})
        })
        .collect();
    json!({
        "actions": [{
            "updateEngagementPanelAction": {"content": {"transcriptRenderer": {"content": {
                "transcriptSearchPanelRenderer": {"body": {
                    "transcriptSegmentListRenderer": {"initialSegments": segments}
                }}
            }}}}
        }]
    })
}

/* ------------------- Synthetic `next` responses ------------------- */

pub fn comment_thread(id: &str, text: &str) -> Value {
    json!({"commentThreadRenderer": {"comment": {"commentRenderer": {
        "commentId": id,
        "contentText": {"runs": [{"text": text}]},
        "authorText": {"simpleText": format!("@author_{id}")},
        "voteCount": {"simpleText": "3"},
        "publishedTimeText": {"runs": [{"text": "1 day ago"}]}
    }}}})
}

pub fn comments_response(threads: Vec<Value>, token: Option<&str>) -> Value {
    let mut items = threads;
    if let Some(t) = token {
        items.push(json!({"continuationItemRenderer": {
            "continuationEndpoint": {"continuationCommand": {"token": t}}
        }}));
    }
    json!({
        "onResponseReceivedEndpoints": [{
            "appendContinuationItemsAction": {"continuationItems": items}
        }]
    })
}

/// Exact request body the comment client sends with the identity from
/// [`ytcfg_script`].
pub fn next_body(video_id: Option<&str>, continuation: Option<&str>) -> Value {
    let mut body = json!({
        "context": {"client": {
            "clientName": "WEB",
            "clientVersion": CLIENT_VERSION,
            "visitorData": "CgtWaXNpdG9y"
        }}
    });
    if let Some(v) = video_id {
        body["videoId"] = json!(v);
    }
    if let Some(c) = continuation {
        body["continuation"] = json!(c);
    }
    body
}

pub fn mock_next<'a>(server: &'a MockServer, request: Value, response: Value) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(httpmock::Method::POST)
            .path("/youtubei/v1/next")
            .query_param("key", API_KEY)
            .json_body(request);
        then.status(200)
            .header("content-type", "application/json")
            .body(response.to_string());
    })
}

/// A watch page carrying only the runtime config.
pub fn config_only_page() -> String {
    format!(
        "<!DOCTYPE html><html><head>{}</head><body></body></html>",
        ytcfg_script()
    )
}
