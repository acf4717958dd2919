//! Shapes of the `__NEXT_DATA__` document embedded in job-board pages.
//!
//! ## Observed shape
//!
//! Both search-results and listing pages carry the same envelope:
//! `props.pageProps.dehydratedState.queries[*].state.data`. What `data`
//! holds depends on the page, so it is kept as a raw [`serde_json::Value`]
//! and decoded per page type.
//!
//! ### Search results
//! `data.groupedOffers` is a list of groups, one per logical posting. A group
//! shares its title, company, salary text and `aiSummary` (an HTML fragment
//! with `<li>` items) across one or more `offers`, each with its own
//! `offerAbsoluteUri` and `displayWorkplace`. A posting advertised in three
//! cities is one group with three offers.
//!
//! ### Listing page
//! `queries[0].state.data` is the offer itself: `jobOfferWebId`,
//! `publicationDetails`, `attributes` and a list of `sections`. Salary lives
//! under each entry of `attributes.employment.typesOfContracts` and is
//! sometimes a string, sometimes an object.
//!
//! ## Tolerance
//!
//! Every field is decoded through [`lenient`]: a missing, `null`, or
//! mistyped value becomes the field's default instead of failing the page.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Decodes `T` from whatever value is present, falling back to
/// `T::default()` when the value has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

#[derive(Debug, Default, Deserialize)]
pub struct NextData {
    #[serde(default, deserialize_with = "lenient")]
    pub props: Props,
}

impl NextData {
    /// The `state.data` value of every dehydrated query, in page order.
    #[must_use]
    pub fn query_data(&self) -> Vec<&Value> {
        self.props
            .page_props
            .dehydrated_state
            .queries
            .iter()
            .map(|q| &q.state.data)
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Props {
    #[serde(default, deserialize_with = "lenient")]
    pub page_props: PageProps,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProps {
    #[serde(default, deserialize_with = "lenient")]
    pub dehydrated_state: DehydratedState,
}

#[derive(Debug, Default, Deserialize)]
pub struct DehydratedState {
    #[serde(default, deserialize_with = "lenient")]
    pub queries: Vec<DehydratedQuery>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DehydratedQuery {
    #[serde(default, deserialize_with = "lenient")]
    pub state: QueryState,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryState {
    #[serde(default)]
    pub data: Value,
}

// ---------------------------------------------------------------------------
// Search results
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    #[serde(default, deserialize_with = "lenient")]
    pub grouped_offers: Vec<OfferGroup>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferGroup {
    #[serde(default, deserialize_with = "lenient")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub salary_display_text: Option<String>,
    /// HTML fragment, typically a `<ul>` of requirement bullets.
    #[serde(default, deserialize_with = "lenient")]
    pub ai_summary: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub offers: Vec<GroupOffer>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupOffer {
    #[serde(default, deserialize_with = "lenient")]
    pub offer_absolute_uri: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub display_workplace: Option<String>,
}

// ---------------------------------------------------------------------------
// Listing page
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferData {
    /// Numeric on most pages, occasionally a string.
    #[serde(default)]
    pub job_offer_web_id: Value,
    #[serde(default, deserialize_with = "lenient")]
    pub publication_details: PublicationDetails,
    #[serde(default, deserialize_with = "lenient")]
    pub attributes: OfferAttributes,
    #[serde(default, deserialize_with = "lenient")]
    pub sections: Vec<OfferSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationDetails {
    #[serde(default, deserialize_with = "lenient")]
    pub date_of_initial_publication_utc: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub expiration_date_utc: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferAttributes {
    #[serde(default, deserialize_with = "lenient")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub display_employer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub workplaces: Vec<Workplace>,
    #[serde(default, deserialize_with = "lenient")]
    pub employment: Employment,
    #[serde(default, deserialize_with = "lenient")]
    pub categories: Vec<Category>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workplace {
    #[serde(default, deserialize_with = "lenient")]
    pub display_address: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub region: Option<Named>,
}

/// Any `{ "name": ... }` object.
#[derive(Debug, Default, Deserialize)]
pub struct Named {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employment {
    #[serde(default, deserialize_with = "lenient")]
    pub position_levels: Vec<Named>,
    #[serde(default, deserialize_with = "lenient")]
    pub work_schedules: Vec<Named>,
    #[serde(default, deserialize_with = "lenient")]
    pub types_of_contracts: Vec<ContractType>,
    #[serde(default, deserialize_with = "lenient")]
    pub work_modes: Vec<Named>,
    #[serde(default, deserialize_with = "lenient")]
    pub entirely_remote_work: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContractType {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// String or structured object depending on the listing.
    #[serde(default)]
    pub salary: Value,
}

#[derive(Debug, Default, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub parent: Option<Named>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSection {
    #[serde(default, deserialize_with = "lenient")]
    pub section_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub model: SectionModel,
    #[serde(default, deserialize_with = "lenient")]
    pub sub_sections: Vec<OfferSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SectionModel {
    #[serde(default, deserialize_with = "lenient")]
    pub bullets: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub items: Vec<Named>,
    #[serde(default, deserialize_with = "lenient")]
    pub paragraphs: Vec<String>,
}
