use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("blocked by upstream (HTTP 403) at {url}")]
    Blocked { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Structural failure to read the embedded data block of a page.
///
/// `context` names the page: the search keyword or the listing URL.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no embedded data block found for {context}")]
    MissingDataBlock { context: String },

    #[error("malformed embedded data for {context}: {source}")]
    MalformedPayload {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no offer data in embedded block for {context}")]
    MissingOffer { context: String },
}
