use scraper::{Html, Selector};

pub fn truncate(s: &str, n: usize) -> String {
    if s.len() <= n {
        s.to_string()
    } else {
        let mut cut = n;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        let mut out = String::with_capacity(cut + 16);
        out.push_str(&s[..cut]);
        out.push_str(" …[trunc]");
        out
    }
}

/// Index of the `}` closing the object that opens at `start`, skipping braces
/// inside string literals.
pub(crate) fn find_matching_brace(s: &str, start: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.get(start).copied()? != b'{' {
        return None;
    }

    let mut depth = 0usize;
    let mut in_str = false;
    let mut j = start;

    while j < bytes.len() {
        let c = bytes[j];

        if in_str {
            if c == b'\\' {
                j += 2;
                continue;
            } else if c == b'"' {
                in_str = false;
            }
            j += 1;
            continue;
        }

        match c {
            b'"' => in_str = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(j);
                }
            }
            _ => {}
        }
        j += 1;
    }
    None
}

/// Text of every inline `<script>` element, in document order.
pub(crate) fn script_texts(html: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let Ok(sel) = Selector::parse("script") else {
        return Vec::new();
    };
    doc.select(&sel)
        .map(|el| el.text().collect::<String>())
        .filter(|t| !t.trim().is_empty())
        .collect()
}

/// The object literal assigned right after `marker`, e.g. the `{...}` in
/// `var ytInitialPlayerResponse = {...};`. Balanced-brace scan, so trailing
/// statements on the same line do not leak into the result.
pub(crate) fn object_after_marker<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let at = text.find(marker)?;
    let after = &text[at + marker.len()..];
    let eq = after.find('=')?;
    let brace_rel = after[eq..].find('{')?;
    let start = at + marker.len() + eq + brace_rel;
    // Nothing but whitespace may sit between `=` and `{`.
    if !text[at + marker.len() + eq + 1..start].trim().is_empty() {
        return None;
    }
    let end = find_matching_brace(text, start)?;
    Some(&text[start..=end])
}
