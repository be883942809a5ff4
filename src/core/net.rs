#[cfg(feature = "test-mode")]
use std::env;

/// Read the response body as text.
/// In `test-mode`, if `YT_RECORD=1`, the body is saved as a fixture via `core::fixtures`.
pub(crate) async fn get_text(
    resp: reqwest::Response,
    _endpoint: &str,
    _video_id: &str,
    _ext: &str,
) -> Result<String, reqwest::Error> {
    let text = resp.text().await?;

    #[cfg(feature = "test-mode")]
    {
        if env::var("YT_RECORD").ok().as_deref() == Some("1")
            && let Err(e) =
                crate::core::fixtures::record_fixture(_endpoint, _video_id, _ext, &text)
        {
            tracing::warn!(video_id = _video_id, error = %e, "YT_RECORD: failed to write fixture");
        }
    }

    Ok(text)
}
