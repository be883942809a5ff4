//! Runtime configuration (`ytcfg`) the web front-end ships with every page:
//! the Innertube API key and the client identity it presents.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::utils::find_matching_brace;
use crate::core::{YtError, json_path};

const API_KEY: &[&str] = &[
    "INNERTUBE_API_KEY",
    "WEB_PLAYER_CONTEXT_CONFIGS.*.innertubeApiKey",
];
const CLIENT_NAME: &[&str] = &[
    "INNERTUBE_CLIENT_NAME",
    "INNERTUBE_CONTEXT.client.clientName",
    "INNERTUBE_CONTEXT_CLIENT_NAME",
];
const CLIENT_VERSION: &[&str] = &[
    "INNERTUBE_CONTEXT_CLIENT_VERSION",
    "INNERTUBE_CLIENT_VERSION",
    "INNERTUBE_CONTEXT.client.clientVersion",
];
const VISITOR_DATA: &[&str] = &["VISITOR_DATA", "INNERTUBE_CONTEXT.client.visitorData"];
const HL: &[&str] = &["HL", "INNERTUBE_CONTEXT.client.hl"];

static KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(INNERTUBE_API_KEY|INNERTUBE_CLIENT_NAME|INNERTUBE_CONTEXT_CLIENT_NAME|INNERTUBE_CONTEXT_CLIENT_VERSION|INNERTUBE_CLIENT_VERSION|VISITOR_DATA)"\s*:\s*("([^"]*)"|\d+)"#)
        .expect("static regex")
});

/// Identity fields read from the page's `ytcfg` object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub api_key: Option<String>,
    pub client_name: Option<String>,
    pub client_version: Option<String>,
    pub visitor_data: Option<String>,
    pub hl: Option<String>,
}

/// Client identity presented to authenticated-by-key Innertube endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub api_key: String,
    pub client_name: String,
    pub client_version: String,
    pub visitor_data: Option<String>,
    pub hl: Option<String>,
}

// `INNERTUBE_CONTEXT_CLIENT_NAME` is numeric in ytcfg.
fn client_name_from_number(n: u64) -> Option<&'static str> {
    match n {
        1 => Some("WEB"),
        2 => Some("MWEB"),
        3 => Some("ANDROID"),
        5 => Some("IOS"),
        56 => Some("WEB_EMBEDDED_PLAYER"),
        67 => Some("WEB_REMIX"),
        _ => None,
    }
}

fn client_name_of(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => n.as_u64().and_then(client_name_from_number).map(str::to_string),
        _ => None,
    }
}

impl RuntimeConfig {
    /// Reads the fields from a ytcfg data object. Accepts both the bare data
    /// map and the live `ytcfg` global, which keeps it under `data_`.
    pub fn from_value(v: &Value) -> Self {
        let data = v.get("data_").unwrap_or(v);
        let owned = |c: &[&str]| json_path::get_str(data, c).map(str::to_string);
        Self {
            api_key: owned(API_KEY),
            client_name: CLIENT_NAME
                .iter()
                .find_map(|p| json_path::resolve(data, p).and_then(client_name_of)),
            client_version: owned(CLIENT_VERSION),
            visitor_data: owned(VISITOR_DATA),
            hl: owned(HL),
        }
    }

    /// Collects config from every `ytcfg.set({...})` call in the page (later
    /// calls win, like in the browser), then fills gaps from per-key text
    /// matches anywhere in the document.
    pub fn from_html(html: &str) -> Option<Self> {
        let mut merged = Map::new();
        let mut rest = html;
        while let Some(at) = rest.find("ytcfg.set(") {
            let window = &rest[at + "ytcfg.set(".len()..];
            if let Some(end) = window.starts_with('{').then(|| find_matching_brace(window, 0)).flatten()
                && let Ok(Value::Object(m)) = serde_json::from_str::<Value>(&window[..=end])
            {
                merged.extend(m);
            }
            rest = window;
        }

        let mut cfg = Self::from_value(&Value::Object(merged));

        for caps in KEY_RE.captures_iter(html) {
            let key = &caps[1];
            let raw = caps.get(3).map(|m| m.as_str().to_string());
            let num = caps.get(2).and_then(|m| m.as_str().parse::<u64>().ok());
            match key {
                "INNERTUBE_API_KEY" if cfg.api_key.is_none() => cfg.api_key = raw,
                "INNERTUBE_CLIENT_NAME" if cfg.client_name.is_none() => {
                    cfg.client_name = raw.filter(|s| !s.is_empty());
                }
                "INNERTUBE_CONTEXT_CLIENT_NAME" if cfg.client_name.is_none() => {
                    cfg.client_name = num
                        .and_then(client_name_from_number)
                        .map(str::to_string)
                        .or(raw);
                }
                "INNERTUBE_CONTEXT_CLIENT_VERSION" | "INNERTUBE_CLIENT_VERSION"
                    if cfg.client_version.is_none() =>
                {
                    cfg.client_version = raw;
                }
                "VISITOR_DATA" if cfg.visitor_data.is_none() => cfg.visitor_data = raw,
                _ => {}
            }
        }

        (!cfg.is_empty()).then_some(cfg)
    }

    /// Reads the `ytcfg` global (or its `data_` map) from a page context.
    pub fn from_globals(globals: &Map<String, Value>) -> Option<Self> {
        let cfg = Self::from_value(globals.get("ytcfg")?);
        (!cfg.is_empty()).then_some(cfg)
    }

    pub fn is_empty(&self) -> bool {
        self.api_key.is_none()
            && self.client_name.is_none()
            && self.client_version.is_none()
            && self.visitor_data.is_none()
            && self.hl.is_none()
    }

    /// Fills any missing field from `other`.
    pub(crate) fn merge_missing(&mut self, other: Self) {
        self.api_key = self.api_key.take().or(other.api_key);
        self.client_name = self.client_name.take().or(other.client_name);
        self.client_version = self.client_version.take().or(other.client_version);
        self.visitor_data = self.visitor_data.take().or(other.visitor_data);
        self.hl = self.hl.take().or(other.hl);
    }

    /// The identity needed by keyed endpoints. The API key and client version
    /// are mandatory; the client name falls back to `WEB`.
    ///
    /// # Errors
    ///
    /// Returns [`YtError::CommentApiInit`] naming the first missing field.
    pub fn identity(&self) -> Result<ClientIdentity, YtError> {
        let api_key = self
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| YtError::CommentApiInit("INNERTUBE_API_KEY not found".into()))?;
        let client_version = self
            .client_version
            .clone()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                YtError::CommentApiInit("INNERTUBE_CONTEXT_CLIENT_VERSION not found".into())
            })?;
        Ok(ClientIdentity {
            api_key,
            client_name: self
                .client_name
                .clone()
                .unwrap_or_else(|| crate::core::client::DEFAULT_CLIENT_NAME.to_string()),
            client_version,
            visitor_data: self.visitor_data.clone(),
            hl: self.hl.clone(),
        })
    }
}
