use serde_json::{Map, json};

use innertube_rs::{RuntimeConfig, YtError};

use crate::common::{API_KEY, CLIENT_VERSION, ytcfg_script};

#[test]
fn reads_set_block_and_maps_numeric_client_name() {
    let cfg = RuntimeConfig::from_html(&ytcfg_script()).unwrap();
    assert_eq!(cfg.api_key.as_deref(), Some(API_KEY));
    assert_eq!(cfg.client_name.as_deref(), Some("WEB"));
    assert_eq!(cfg.client_version.as_deref(), Some(CLIENT_VERSION));
    assert_eq!(cfg.visitor_data.as_deref(), Some("CgtWaXNpdG9y"));

    let id = cfg.identity().unwrap();
    assert_eq!(id.api_key, API_KEY);
    assert_eq!(id.client_name, "WEB");
}

#[test]
fn later_set_calls_override_earlier_ones() {
    let html = r#"<script>ytcfg.set({"INNERTUBE_API_KEY":"old","HL":"en"});</script>
<script>ytcfg.set({"INNERTUBE_API_KEY":"new","INNERTUBE_CLIENT_VERSION":"2.1"});</script>"#;
    let cfg = RuntimeConfig::from_html(html).unwrap();
    assert_eq!(cfg.api_key.as_deref(), Some("new"));
    assert_eq!(cfg.hl.as_deref(), Some("en"));
    assert_eq!(cfg.client_version.as_deref(), Some("2.1"));
}

#[test]
fn falls_back_to_key_matches_outside_set_blocks() {
    let html = r#"<script>var cfg = {"INNERTUBE_API_KEY": "loose", "INNERTUBE_CONTEXT_CLIENT_VERSION":"2.9", "INNERTUBE_CONTEXT_CLIENT_NAME": 1, broken</script>"#;
    let cfg = RuntimeConfig::from_html(html).unwrap();
    assert_eq!(cfg.api_key.as_deref(), Some("loose"));
    assert_eq!(cfg.client_version.as_deref(), Some("2.9"));
    assert_eq!(cfg.client_name.as_deref(), Some("WEB"));
}

#[test]
fn nothing_found_is_none() {
    assert!(RuntimeConfig::from_html("<html><body>no config</body></html>").is_none());
}

#[test]
fn globals_with_data_wrapper() {
    let mut globals = Map::new();
    globals.insert(
        "ytcfg".into(),
        json!({"data_": {
            "INNERTUBE_API_KEY": "g",
            "INNERTUBE_CONTEXT": {"client": {"clientName": "WEB", "clientVersion": "2.5", "hl": "vi"}}
        }}),
    );
    let cfg = RuntimeConfig::from_globals(&globals).unwrap();
    assert_eq!(cfg.client_version.as_deref(), Some("2.5"));
    assert_eq!(cfg.hl.as_deref(), Some("vi"));
}

#[test]
fn identity_requires_key_and_version() {
    let cfg = RuntimeConfig {
        client_version: Some("2.0".into()),
        ..Default::default()
    };
    assert!(matches!(cfg.identity(), Err(YtError::CommentApiInit(_))));

    let cfg = RuntimeConfig {
        api_key: Some("k".into()),
        ..Default::default()
    };
    assert!(matches!(cfg.identity(), Err(YtError::CommentApiInit(_))));

    let cfg = RuntimeConfig {
        api_key: Some("k".into()),
        client_version: Some("2.0".into()),
        ..Default::default()
    };
    assert_eq!(cfg.identity().unwrap().client_name, "WEB");
}
