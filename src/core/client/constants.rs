//! Centralized constants for default endpoints, client identity and UA.

/// Default desktop UA to avoid trivial bot blocking.
pub(crate) const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (X11; Linux x86_64) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) ",
    "Chrome/131.0.0.0 Safari/537.36"
);

/// Web origin; watch pages and Innertube endpoints are joined onto it.
pub(crate) const DEFAULT_BASE_URL: &str = "https://www.youtube.com/";

/// Accept-Language sent with watch-page fetches.
pub(crate) const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Innertube client name of the desktop web front-end.
pub(crate) const DEFAULT_CLIENT_NAME: &str = "WEB";

/// WEB client version used when the page runtime config does not provide one.
pub(crate) const DEFAULT_CLIENT_VERSION: &str = "2.20250101.01.00";

/// Transcript endpoint, relative to the base URL.
pub(crate) const TRANSCRIPT_PATH: &str = "youtubei/v1/get_transcript";

/// Watch-next endpoint (comments), relative to the base URL.
pub(crate) const NEXT_PATH: &str = "youtubei/v1/next";

/// Watch page path, relative to the base URL.
pub(crate) const WATCH_PATH: &str = "watch";
