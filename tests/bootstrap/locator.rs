use innertube_rs::{BootstrapLocator, BootstrapStrategy, PageContext, VideoId, WatchTarget};

use crate::common::{
    self, API_KEY, VIDEO_ID, caption_track, client_for, mock_watch_page, player_response,
    watch_page_html,
};

fn target() -> WatchTarget {
    VideoId::parse(VIDEO_ID).unwrap().into()
}

#[tokio::test]
async fn first_strategy_wins_and_carries_runtime_config() {
    let server = common::setup_server();
    let state = player_response(VIDEO_ID, &[caption_track("en", false)]);
    let page = mock_watch_page(&server, VIDEO_ID, watch_page_html(&state));

    let located = BootstrapLocator::new(&client_for(&server))
        .locate(&target())
        .await
        .unwrap();

    page.assert_hits(1);
    assert_eq!(located.strategy(), BootstrapStrategy::WatchPage);
    assert_eq!(located.root(), &state);
    assert_eq!(
        located.runtime_config().and_then(|c| c.api_key.as_deref()),
        Some(API_KEY)
    );
}

#[tokio::test]
async fn stale_dom_state_from_previous_video_is_skipped() {
    let server = common::setup_server();
    let stale = player_response("prevVideo01", &[caption_track("en", false)]);
    let fresh = player_response(VIDEO_ID, &[caption_track("vi", false)]);
    mock_watch_page(&server, VIDEO_ID, watch_page_html(&fresh));

    let dom = format!("<html><script>var ytInitialPlayerResponse = {stale};</script></html>");
    let located = BootstrapLocator::new(&client_for(&server))
        .context(PageContext::new().with_dom(dom))
        .strategies([BootstrapStrategy::DomScripts, BootstrapStrategy::CanonicalRefetch])
        .locate(&target())
        .await
        .unwrap();

    assert_eq!(located.strategy(), BootstrapStrategy::CanonicalRefetch);
    assert_eq!(located.video_id().as_str(), VIDEO_ID);
    assert_eq!(located.root(), &fresh);
}

#[tokio::test]
async fn http_errors_are_misses_not_failures() {
    let server = common::setup_server();
    let broken = server.mock(|when, then| {
        when.method(httpmock::Method::GET).path("/watch");
        then.status(429);
    });

    let state = player_response(VIDEO_ID, &[]);
    let located = BootstrapLocator::new(&client_for(&server))
        .context(PageContext::new().with_global("ytInitialPlayerResponse", state))
        .locate(&target())
        .await
        .unwrap();

    broken.assert_hits(1);
    assert_eq!(located.strategy(), BootstrapStrategy::GlobalObject);
}

#[tokio::test]
async fn runtime_config_prefers_globals_over_network() {
    let server = common::setup_server();
    let page = mock_watch_page(&server, VIDEO_ID, common::config_only_page());

    let ctx = PageContext::new().with_global(
        "ytcfg",
        serde_json::json!({"INNERTUBE_API_KEY": "from-globals", "INNERTUBE_CLIENT_VERSION": "2.3"}),
    );
    let cfg = BootstrapLocator::new(&client_for(&server))
        .context(ctx)
        .runtime_config(&target())
        .await
        .unwrap();

    page.assert_hits(0);
    assert_eq!(cfg.api_key.as_deref(), Some("from-globals"));
}
