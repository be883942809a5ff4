//! Ordered-candidate lookups into weakly-typed JSON trees.
//!
//! Innertube payloads are reshaped without notice, so every lookup goes
//! through a list of path candidates tried in order. New shapes are added as
//! new candidates; older candidates stay so older responses keep parsing.
//!
//! Path syntax: dot-separated segments. A segment is an object key, an array
//! index (`0` or `[0]`), or `*` / `[*]` meaning "the first element of the
//! array (or value of the object) for which the rest of the path resolves".
//! Brackets may follow a key directly: `actions[0].foo`, `items[*].bar`.
//!
//! JSON `null` counts as unresolved.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
    Any,
}

fn parse_path(path: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    for raw in path.split('.').filter(|s| !s.is_empty()) {
        let (head, mut rest) = match raw.find('[') {
            Some(i) => (&raw[..i], &raw[i..]),
            None => (raw, ""),
        };
        if !head.is_empty() {
            out.push(match head {
                "*" => Segment::Any,
                h => match h.parse::<usize>() {
                    Ok(i) => Segment::Index(i),
                    Err(_) => Segment::Key(h.to_string()),
                },
            });
        }
        while let Some(stripped) = rest.strip_prefix('[') {
            let Some(close) = stripped.find(']') else {
                // Unbalanced bracket: keep the remainder as a literal key.
                out.push(Segment::Key(rest.to_string()));
                break;
            };
            let inner = &stripped[..close];
            out.push(match inner {
                "*" => Segment::Any,
                i => match i.parse::<usize>() {
                    Ok(n) => Segment::Index(n),
                    Err(_) => Segment::Key(i.trim_matches(|c| c == '"' || c == '\'').to_string()),
                },
            });
            rest = &stripped[close + 1..];
        }
    }
    out
}

fn walk<'a>(node: &'a Value, segs: &[Segment]) -> Option<&'a Value> {
    let Some((first, rest)) = segs.split_first() else {
        return (!node.is_null()).then_some(node);
    };
    match first {
        Segment::Key(k) => walk(node.as_object()?.get(k)?, rest),
        Segment::Index(i) => match node {
            Value::Array(arr) => walk(arr.get(*i)?, rest),
            // Numeric-looking object keys.
            Value::Object(map) => walk(map.get(&i.to_string())?, rest),
            _ => None,
        },
        Segment::Any => match node {
            Value::Array(arr) => arr.iter().find_map(|child| walk(child, rest)),
            Value::Object(map) => map.values().find_map(|child| walk(child, rest)),
            _ => None,
        },
    }
}

/// Resolve a single path against `tree`.
pub fn resolve<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    walk(tree, &parse_path(path))
}

/// Evaluate each candidate in order and return the first one that resolves.
pub fn get<'a>(tree: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    candidates.iter().find_map(|path| resolve(tree, path))
}

/// Like [`get`], but only accepts string values; non-string hits fall through
/// to the next candidate.
pub fn get_str<'a>(tree: &'a Value, candidates: &[&str]) -> Option<&'a str> {
    candidates
        .iter()
        .find_map(|path| resolve(tree, path).and_then(Value::as_str))
}

/// Like [`get`], but only accepts arrays.
pub fn get_array<'a>(tree: &'a Value, candidates: &[&str]) -> Option<&'a Vec<Value>> {
    candidates
        .iter()
        .find_map(|path| resolve(tree, path).and_then(Value::as_array))
}

/// Like [`get`], but only accepts booleans.
pub fn get_bool(tree: &Value, candidates: &[&str]) -> Option<bool> {
    candidates
        .iter()
        .find_map(|path| resolve(tree, path).and_then(Value::as_bool))
}

/// Integer lookup that also accepts numeric strings (`"1520"`), which is how
/// Innertube encodes most millisecond offsets.
pub fn get_i64(tree: &Value, candidates: &[&str]) -> Option<i64> {
    candidates.iter().find_map(|path| match resolve(tree, path)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}
