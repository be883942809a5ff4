use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum YtError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A response body could not be parsed as JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The data received was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// The input could not be resolved to a non-empty video id.
    #[error("invalid video id or URL: {0:?}")]
    InvalidVideoId(String),

    /// Every bootstrap extraction strategy was tried and none produced a state object.
    #[error("bootstrap state not found for video {video_id} (tried: {})", attempted.join(", "))]
    BootstrapNotFound {
        /// The video whose watch page was inspected.
        video_id: String,
        /// Names of the strategies attempted, in order.
        attempted: Vec<&'static str>,
    },

    /// The bootstrap state was located but lists no caption tracks.
    #[error("video {video_id} has no caption tracks")]
    NoCaptionTracks {
        /// The video without captions.
        video_id: String,
    },

    /// Client identity fields (API key, client name/version) could not be obtained.
    #[error("comment API init failed: {0}")]
    CommentApiInit(String),

    /// The first comment page could not be fetched.
    #[error("comment fetch failed: {source}")]
    CommentFetch {
        /// The underlying failure.
        #[source]
        source: Box<YtError>,
    },

    /// No element matched the selector before the poll timeout elapsed.
    #[error("no element matched `{selector}` within {waited_ms}ms")]
    ElementNotFound {
        /// The CSS selector that was polled for.
        selector: String,
        /// How long the poller waited, in milliseconds.
        waited_ms: u64,
    },

    /// A CSS selector could not be parsed.
    #[error("invalid CSS selector: {0}")]
    InvalidSelector(String),

    /// The caller cancelled the operation before any result was available.
    #[error("operation cancelled")]
    Cancelled,
}

impl YtError {
    /// Wraps a first-page failure of the comment client.
    pub(crate) fn comment_fetch(source: YtError) -> Self {
        Self::CommentFetch {
            source: Box::new(source),
        }
    }
}
