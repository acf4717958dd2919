//! Search-results page parsing.
//!
//! See [`crate::types`] for the payload shape and [`crate::detail`] for the
//! single-listing counterpart.

use jobscout_core::{ListingSummary, NOT_AVAILABLE, SALARY_NOT_PROVIDED};
use serde::Deserialize;

use crate::error::ParseError;
use crate::parse_helpers::{extract_next_data, summarize_list_items};
use crate::types::{NextData, SearchData};

/// Decodes the `__NEXT_DATA__` envelope of a page.
///
/// `context` identifies the page in errors (a keyword or a URL).
///
/// # Errors
///
/// - [`ParseError::MissingDataBlock`] when the page has no data script.
/// - [`ParseError::MalformedPayload`] when the script is not valid JSON.
pub(crate) fn decode_next_data(body: &str, context: &str) -> Result<NextData, ParseError> {
    let raw = extract_next_data(body).ok_or_else(|| ParseError::MissingDataBlock {
        context: context.to_owned(),
    })?;
    serde_json::from_str(raw).map_err(|source| ParseError::MalformedPayload {
        context: context.to_owned(),
        source,
    })
}

/// Extracts one [`ListingSummary`] per offer link on a search-results page.
///
/// Every dehydrated query whose data is an object is scanned for
/// `groupedOffers`; each offer inside a group becomes its own record sharing
/// the group's title, company, salary text and requirements summary. Offers
/// without a link are dropped. A page with no offers yields an empty list.
///
/// # Errors
///
/// Returns a [`ParseError`] when the data block is missing or malformed.
/// Callers treat this as zero results for the page.
pub fn parse_search_results(body: &str, keyword: &str) -> Result<Vec<ListingSummary>, ParseError> {
    let next_data = decode_next_data(body, keyword)?;
    let mut listings = Vec::new();

    for data in next_data.query_data() {
        if !data.is_object() {
            continue;
        }
        let Ok(search) = SearchData::deserialize(data) else {
            continue;
        };

        for group in search.grouped_offers {
            let title = non_blank(group.job_title).unwrap_or_else(|| NOT_AVAILABLE.to_owned());
            let company =
                non_blank(group.company_name).unwrap_or_else(|| NOT_AVAILABLE.to_owned());
            let salary_text = non_blank(group.salary_display_text)
                .unwrap_or_else(|| SALARY_NOT_PROVIDED.to_owned());
            let requirements_summary = group
                .ai_summary
                .as_deref()
                .map(summarize_list_items)
                .unwrap_or_default();

            for offer in group.offers {
                let Some(link) = non_blank(offer.offer_absolute_uri) else {
                    tracing::debug!(keyword, title = %title, "skipping offer without link");
                    continue;
                };
                listings.push(ListingSummary {
                    keyword: keyword.to_owned(),
                    title: title.clone(),
                    company: company.clone(),
                    salary_text: salary_text.clone(),
                    location: non_blank(offer.display_workplace)
                        .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
                    link,
                    requirements_summary: requirements_summary.clone(),
                });
            }
        }
    }

    Ok(listings)
}

/// Trims `value` and discards it when nothing is left.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
