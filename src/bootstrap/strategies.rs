//! The individual extraction strategies. Each one is a pure function over a
//! page snapshot so it can be exercised against fixture HTML on its own; the
//! network-facing orchestration lives in the parent module.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::utils::{find_matching_brace, object_after_marker, script_texts, truncate};

/// Global the watch page assigns its player state to.
pub const PLAYER_RESPONSE_VAR: &str = "ytInitialPlayerResponse";

// `var ytInitialPlayerResponse = {...};` followed by another statement, a
// closing tag or a newline. Also matches `window["ytInitialPlayerResponse"] =`.
static ASSIGNMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)ytInitialPlayerResponse["']?\]?\s*=\s*(\{.+?\})\s*;\s*(?:var\s+(?:meta|head)\b|</script|\n|$)"#,
    )
    .expect("static regex")
});

fn parse_object(candidate: &str, strategy: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(v @ Value::Object(_)) => Some(v),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(
                strategy,
                error = %e,
                preview = %truncate(candidate, 120),
                "candidate is not valid JSON"
            );
            None
        }
    }
}

/// Strategy 1 (and 4): pattern-match the global assignment in served HTML and
/// parse its object literal.
///
/// The lazy pattern can stop early when the payload itself contains `};` plus
/// a newline; when that capture fails to parse, a balanced-brace scan from
/// the same marker is tried before giving up.
pub fn from_html_assignment(html: &str) -> Option<Value> {
    for caps in ASSIGNMENT_RE.captures_iter(html) {
        if let Some(m) = caps.get(1)
            && let Some(v) = parse_object(m.as_str(), "watch_page")
        {
            return Some(v);
        }
    }

    let mut rest = html;
    while let Some(at) = rest.find(PLAYER_RESPONSE_VAR) {
        let window = &rest[at..];
        if let Some(obj) = object_after_marker(window, PLAYER_RESPONSE_VAR)
            && let Some(v) = parse_object(obj, "watch_page")
        {
            return Some(v);
        }
        rest = &window[PLAYER_RESPONSE_VAR.len()..];
    }
    None
}

/// Strategy 2: inspect script elements of an already-parsed document.
///
/// For the first script mentioning the marker, the object starts at the
/// first `{` after it; the end is found by trying, in order, each `};`
/// statement terminator, the end of the script element, and finally a
/// balanced-brace scan.
pub fn from_dom_scripts(dom_html: &str) -> Option<Value> {
    for text in script_texts(dom_html) {
        let Some(at) = text.find(PLAYER_RESPONSE_VAR) else {
            continue;
        };
        let Some(brace_rel) = text[at..].find('{') else {
            continue;
        };
        let start = at + brace_rel;
        let body = &text[start..];

        let terminators = body.match_indices("};").map(|(i, _)| i).take(64);
        for end in terminators {
            if let Some(v) = parse_object(&body[..=end], "dom_scripts") {
                return Some(v);
            }
        }

        let tail = body.trim_end().trim_end_matches(';').trim_end();
        if let Some(v) = parse_object(tail, "dom_scripts") {
            return Some(v);
        }

        if let Some(end) = find_matching_brace(&text, start)
            && let Some(v) = parse_object(&text[start..=end], "dom_scripts")
        {
            return Some(v);
        }
    }
    None
}

/// Strategy 3: the page may already have executed the assignment.
///
/// Checks `ytInitialPlayerResponse` (object or serialized JSON), then the
/// classic `ytplayer.config.args.player_response` string.
pub fn from_globals(globals: &Map<String, Value>) -> Option<Value> {
    match globals.get(PLAYER_RESPONSE_VAR) {
        Some(v @ Value::Object(_)) => return Some(v.clone()),
        Some(Value::String(s)) => {
            if let Some(v) = parse_object(s, "global_object") {
                return Some(v);
            }
        }
        _ => {}
    }

    globals
        .get("ytplayer")
        .and_then(|p| p.pointer("/config/args/player_response"))
        .and_then(Value::as_str)
        .and_then(|s| parse_object(s, "global_object"))
}
