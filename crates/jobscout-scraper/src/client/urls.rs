use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::ScraperError;

/// Characters escaped in a keyword path segment. `;` and `,` are
/// delimiters in the board's own path syntax (`/praca/{kw};kw`).
const KEYWORD_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'/')
    .add(b';')
    .add(b',')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Normalizes a configured base URL: trims whitespace and trailing slashes,
/// then checks it parses as an absolute URL.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if the result is not an absolute URL.
pub(super) fn normalize_base_url(base_url: &str) -> Result<String, ScraperError> {
    let trimmed = base_url.trim().trim_end_matches('/');
    reqwest::Url::parse(trimmed).map_err(|e| ScraperError::InvalidUrl {
        url: base_url.to_owned(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_owned())
}

/// Builds `{base}/praca/{keyword};kw?pn={page}`.
pub(super) fn search_url(base_url: &str, keyword: &str, page: u32) -> String {
    let encoded = utf8_percent_encode(keyword.trim(), KEYWORD_SEGMENT);
    format!("{base_url}/praca/{encoded};kw?pn={page}")
}

/// Returns `scheme://host[:port]` of `url`, or `url` unchanged when it
/// does not parse.
pub(super) fn origin_of(url: &str) -> String {
    reqwest::Url::parse(url).map_or_else(
        |_| url.to_owned(),
        |u| u.origin().ascii_serialization(),
    )
}
