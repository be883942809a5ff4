//! Small helpers for Innertube's recurring wire shapes.

use serde::Serialize;
use serde_json::Value;

/// Flattens an Innertube text node.
///
/// Accepts `{"simpleText": ".."}`, `{"runs": [{"text": ".."}, ..]}`,
/// view-model `{"content": ".."}` and bare strings.
pub fn text_of(v: &Value) -> Option<String> {
    if let Some(s) = v.as_str() {
        return Some(s.to_string());
    }
    if let Some(s) = v.get("simpleText").and_then(Value::as_str) {
        return Some(s.to_string());
    }
    if let Some(runs) = v.get("runs").and_then(Value::as_array) {
        let joined: String = runs
            .iter()
            .filter_map(|r| r.get("text").and_then(Value::as_str))
            .collect();
        return Some(joined);
    }
    v.get("content").and_then(Value::as_str).map(str::to_string)
}

/// Parses the abbreviated counts the web UI renders: `"17"`, `"1,234"`,
/// `"1.2K"`, `"3M"`, `"2.5B"`. Trailing words (`"12 replies"`) are ignored.
pub fn parse_count(raw: &str) -> Option<u64> {
    let token = raw.split_whitespace().next()?;
    let token = token.replace(',', "");
    let (num, mult) = match token.chars().last()? {
        'K' | 'k' => (&token[..token.len() - 1], 1_000f64),
        'M' | 'm' => (&token[..token.len() - 1], 1_000_000f64),
        'B' | 'b' => (&token[..token.len() - 1], 1_000_000_000f64),
        _ => (token.as_str(), 1f64),
    };
    let value: f64 = num.parse().ok()?;
    if value < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some((value * mult).round() as u64)
}

/* --------- Request-side context shared by every Innertube call --------- */

#[derive(Serialize)]
pub(crate) struct RequestContext<'a> {
    pub(crate) client: ClientContext<'a>,
}

#[derive(Serialize)]
pub(crate) struct ClientContext<'a> {
    #[serde(rename = "clientName")]
    pub(crate) client_name: &'a str,
    #[serde(rename = "clientVersion")]
    pub(crate) client_version: &'a str,
    #[serde(rename = "visitorData", skip_serializing_if = "Option::is_none")]
    pub(crate) visitor_data: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) hl: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub(crate) fn new(client_name: &'a str, client_version: &'a str) -> Self {
        Self {
            client: ClientContext {
                client_name,
                client_version,
                visitor_data: None,
                hl: None,
            },
        }
    }

    pub(crate) fn visitor_data(mut self, v: Option<&'a str>) -> Self {
        self.client.visitor_data = v;
        self
    }

    pub(crate) fn hl(mut self, v: Option<&'a str>) -> Self {
        self.client.hl = v;
        self
    }
}
