//! Single-listing page parsing into a [`ListingDetail`].

use jobscout_core::{ListingDetail, NOT_AVAILABLE, SALARY_NOT_PROVIDED};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseError;
use crate::parse::{decode_next_data, non_blank};
use crate::types::{Category, ContractType, Named, OfferData, OfferSection};

const SECTION_RESPONSIBILITIES: &str = "responsibilities";
const SECTION_REQUIREMENTS: &str = "requirements";
const SUBSECTION_REQUIREMENTS_EXPECTED: &str = "requirements-expected";
const SECTION_OFFERED: &str = "offered";
const SECTION_BENEFITS: &str = "benefits";
const SECTION_ABOUT_COMPANY: &str = "about-hr-consulting-agency-client";

/// Parses a listing page into a [`ListingDetail`].
///
/// Only the first dehydrated query is read. Missing scalar fields become
/// `"N/A"`, missing lists stay empty, and missing flags are `false`. The
/// search-phase fields (`keyword`, `requirements_summary`, `salary_text`) are
/// left empty for
/// [`ListingDetail::with_summary`] to fill in.
///
/// # Errors
///
/// - [`ParseError::MissingDataBlock`] / [`ParseError::MalformedPayload`] as
///   for search pages.
/// - [`ParseError::MissingOffer`] when there is no query, or its data is not
///   a non-empty object.
pub fn parse_listing_detail(body: &str, url: &str) -> Result<ListingDetail, ParseError> {
    let next_data = decode_next_data(body, url)?;

    let data = next_data
        .query_data()
        .into_iter()
        .next()
        .filter(|d| d.as_object().is_some_and(|o| !o.is_empty()))
        .ok_or_else(|| ParseError::MissingOffer {
            context: url.to_owned(),
        })?;

    let offer = OfferData::deserialize(data).map_err(|source| ParseError::MalformedPayload {
        context: url.to_owned(),
        source,
    })?;

    Ok(build_detail(offer, url))
}

fn build_detail(offer: OfferData, url: &str) -> ListingDetail {
    let OfferData {
        job_offer_web_id,
        publication_details,
        attributes,
        sections,
    } = offer;
    let employment = attributes.employment;
    let first_workplace = attributes.workplaces.into_iter().next();

    let (location, region) = match first_workplace {
        Some(w) => (
            or_na(w.display_address),
            or_na(w.region.and_then(|r| r.name)),
        ),
        None => (NOT_AVAILABLE.to_owned(), NOT_AVAILABLE.to_owned()),
    };

    let mut detail = ListingDetail {
        keyword: String::new(),
        title: or_na(attributes.job_title),
        company: or_na(attributes.display_employer_name),
        location,
        link: url.to_owned(),
        requirements_summary: String::new(),
        salary_text: String::new(),
        offer_id: scalar_text(&job_offer_web_id).unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
        publication_date: or_na(publication_details.date_of_initial_publication_utc),
        expiration_date: or_na(publication_details.expiration_date_utc),
        is_active: publication_details.is_active,
        region,
        position_levels: names(employment.position_levels),
        work_schedules: names(employment.work_schedules),
        contract_types: employment
            .types_of_contracts
            .iter()
            .filter_map(|c| non_blank(c.name.clone()))
            .collect(),
        work_modes: names(employment.work_modes),
        remote_work: employment.entirely_remote_work,
        categories: attributes.categories.into_iter().filter_map(category_path).collect(),
        responsibilities: Vec::new(),
        requirements: Vec::new(),
        offered: Vec::new(),
        benefits: Vec::new(),
        about_company: Vec::new(),
        salary: salary_text(&employment.types_of_contracts),
    };

    for section in sections {
        apply_section(&mut detail, section);
    }

    detail
}

fn apply_section(detail: &mut ListingDetail, section: OfferSection) {
    let Some(kind) = section.section_type.as_deref() else {
        return;
    };
    match kind {
        SECTION_RESPONSIBILITIES => detail.responsibilities = section.model.bullets,
        SECTION_REQUIREMENTS => {
            if let Some(expected) = section
                .sub_sections
                .into_iter()
                .find(|s| s.section_type.as_deref() == Some(SUBSECTION_REQUIREMENTS_EXPECTED))
            {
                detail.requirements = expected.model.bullets;
            }
        }
        SECTION_OFFERED => detail.offered = section.model.bullets,
        SECTION_BENEFITS => detail.benefits = names(section.model.items),
        SECTION_ABOUT_COMPANY => detail.about_company = section.model.paragraphs,
        _ => {}
    }
}

/// `"{contract}: {salary}"` for every contract type that states a salary.
fn salary_text(contracts: &[ContractType]) -> String {
    let entries: Vec<String> = contracts
        .iter()
        .filter_map(|c| {
            let salary = salary_value(&c.salary)?;
            let name = c.name.as_deref().unwrap_or(NOT_AVAILABLE);
            Some(format!("{name}: {salary}"))
        })
        .collect();

    if entries.is_empty() {
        SALARY_NOT_PROVIDED.to_owned()
    } else {
        entries.join(", ")
    }
}

fn salary_value(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Object(map) if map.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(_) | Value::Array(_) => Some(value.to_string()),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_blank(Some(s.clone())),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn category_path(category: Category) -> Option<String> {
    let name = non_blank(category.name)?;
    match category.parent.and_then(|p| non_blank(p.name)) {
        Some(parent) => Some(format!("{parent} > {name}")),
        None => Some(name),
    }
}

fn names(items: Vec<Named>) -> Vec<String> {
    items.into_iter().filter_map(|n| non_blank(n.name)).collect()
}

fn or_na(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}

#[cfg(test)]
#[path = "detail_test.rs"]
mod tests;
