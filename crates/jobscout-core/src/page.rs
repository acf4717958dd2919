//! Opaque continuation tokens for paged reads.
//!
//! A token is issued by the storage layer that produced a page and is only
//! ever interpreted by that same layer. Everything else treats it as an
//! uninterpreted string that must round-trip exactly, including through a
//! URL query parameter.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Characters left as-is when a token is embedded in a URL (RFC 3986 unreserved).
const URL_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    /// Wraps a raw token exactly as the issuing store produced it.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_raw(&self) -> &str {
        &self.0
    }

    /// Percent-encodes the token so it can be carried in a query string.
    #[must_use]
    pub fn to_url_param(&self) -> String {
        utf8_percent_encode(&self.0, URL_SAFE).to_string()
    }

    /// Reverses [`Self::to_url_param`]. Returns `None` if the decoded bytes
    /// are not valid UTF-8.
    #[must_use]
    pub fn from_url_param(param: &str) -> Option<Self> {
        percent_decode_str(param)
            .decode_utf8()
            .ok()
            .map(|raw| Self(raw.into_owned()))
    }
}

impl std::fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
