//! Debug dump helpers for development / troubleshooting.

use serde_json::Value;
use std::io::Write;

use super::strategies::PLAYER_RESPONSE_VAR;
use super::utils::script_texts;

pub fn debug_dump_html(video_id: &str, label: &str, html: &str) -> std::io::Result<()> {
    let tmp = std::env::temp_dir();
    let path = tmp.join(format!("innertube_rs-{video_id}-{label}.html"));
    let mut f = std::fs::File::create(&path)?;
    f.write_all(html.as_bytes())?;

    // Side file with just the scripts that mention the player state, which is
    // usually all that matters when a strategy misses.
    let scripts_path = tmp.join(format!("innertube_rs-{video_id}-{label}-scripts.txt"));
    let mut s = std::fs::File::create(&scripts_path)?;
    for (i, text) in script_texts(html)
        .iter()
        .enumerate()
        .filter(|(_, t)| t.contains(PLAYER_RESPONSE_VAR) || t.contains("ytcfg.set"))
    {
        writeln!(s, "---- script #{i} ({} bytes) ----", text.len())?;
        s.write_all(text.as_bytes())?;
        writeln!(s)?;
    }

    tracing::debug!(path = %path.display(), "wrote watch page dump");
    Ok(())
}

pub fn debug_dump_state(video_id: &str, state: &Value) -> std::io::Result<()> {
    let path = std::env::temp_dir().join(format!("innertube_rs-{video_id}-state.json"));
    let mut f = std::fs::File::create(&path)?;
    let pretty = serde_json::to_string_pretty(state).unwrap_or_else(|_| state.to_string());
    f.write_all(pretty.as_bytes())?;
    tracing::debug!(path = %path.display(), "wrote bootstrap state dump");
    Ok(())
}
