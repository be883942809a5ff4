use std::sync::Mutex;
use std::time::Duration;

use innertube_rs::{DomPoller, YtError};

const PANEL: &str = r#"<html><body><ytd-transcript-renderer><div class="segment"> <b>00:01</b> hello </div></ytd-transcript-renderer></body></html>"#;

#[tokio::test]
async fn element_present_immediately() {
    let found = DomPoller::new()
        .wait_for(PANEL, "div.segment")
        .await
        .unwrap();
    assert_eq!(found.text, "00:01 hello");
    assert_eq!(found.inner_html, " <b>00:01</b> hello ");
    assert!(found.html.starts_with("<div class=\"segment\">"));
}

#[tokio::test]
async fn waits_for_lazily_rendered_element() {
    let calls = Mutex::new(0u32);
    let source = || {
        let mut n = calls.lock().unwrap();
        *n += 1;
        if *n < 3 {
            Some("<html><body><div id=\"spinner\"></div></body></html>".to_string())
        } else {
            Some(PANEL.to_string())
        }
    };

    let found = DomPoller::new()
        .interval(Duration::from_millis(5))
        .timeout(Duration::from_secs(2))
        .wait_for(&source, "ytd-transcript-renderer .segment b")
        .await
        .unwrap();

    assert_eq!(found.text, "00:01");
    assert_eq!(*calls.lock().unwrap(), 3);
}

#[tokio::test]
async fn missing_snapshots_are_retried() {
    let calls = Mutex::new(0u32);
    let source = || {
        let mut n = calls.lock().unwrap();
        *n += 1;
        (*n > 1).then(|| PANEL.to_string())
    };

    let found = DomPoller::new()
        .interval(Duration::from_millis(5))
        .wait_for(&source, "b")
        .await
        .unwrap();
    assert_eq!(found.text, "00:01");
}

#[tokio::test]
async fn times_out_with_element_not_found() {
    let err = DomPoller::new()
        .interval(Duration::from_millis(10))
        .timeout(Duration::from_millis(50))
        .wait_for("<html><body></body></html>", "#comments")
        .await
        .unwrap_err();

    match err {
        YtError::ElementNotFound { selector, waited_ms } => {
            assert_eq!(selector, "#comments");
            assert!(waited_ms >= 50);
        }
        other => panic!("expected ElementNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_selector_is_rejected() {
    let err = DomPoller::new().wait_for(PANEL, "div[").await.unwrap_err();
    assert!(matches!(err, YtError::InvalidSelector(_)), "got {err:?}");
}
