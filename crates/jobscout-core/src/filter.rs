//! Cheap string-containment checks run before a listing earns a deep fetch.

use crate::hunt::FilterConfig;
use crate::listing::ListingSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    WrongLocation,
    ExcludedTitleKeyword,
    MissingRequiredTitleKeyword,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::WrongLocation => write!(f, "wrong location"),
            RejectReason::ExcludedTitleKeyword => write!(f, "excluded title keyword"),
            RejectReason::MissingRequiredTitleKeyword => {
                write!(f, "missing required seniority/level token")
            }
        }
    }
}

/// Applies the location, exclusion and seniority rules in that order and
/// stops at the first one that fails.
///
/// All comparisons are case-insensitive substring matches.
///
/// # Errors
///
/// Returns the [`RejectReason`] of the first failing rule.
pub fn pre_filter(listing: &ListingSummary, filters: &FilterConfig) -> Result<(), RejectReason> {
    let title = listing.title.to_lowercase();
    let location = listing.location.to_lowercase();

    if !contains_any(&location, &filters.allowed_locations) {
        return Err(RejectReason::WrongLocation);
    }
    if contains_any(&title, &filters.excluded_title_keywords) {
        return Err(RejectReason::ExcludedTitleKeyword);
    }
    if !contains_any(&title, &filters.required_title_keywords) {
        return Err(RejectReason::MissingRequiredTitleKeyword);
    }
    Ok(())
}

/// `monthly == 0` means the salary is unknown and always passes.
#[must_use]
pub fn passes_salary_floor(monthly: u32, floor: u32) -> bool {
    monthly == 0 || monthly >= floor
}

fn contains_any(haystack_lower: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .map(|n| n.trim().to_lowercase())
        .filter(|n| !n.is_empty())
        .any(|n| haystack_lower.contains(&n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters() -> FilterConfig {
        FilterConfig {
            allowed_locations: vec!["Warszawa".to_string(), "zdalna".to_string()],
            excluded_title_keywords: vec!["junior".to_string()],
            required_title_keywords: vec!["dyrektor".to_string(), "head".to_string()],
            min_salary_monthly: 15000,
        }
    }

    fn listing(title: &str, location: &str) -> ListingSummary {
        ListingSummary {
            keyword: "sprzedaż".to_string(),
            title: title.to_string(),
            company: "Acme".to_string(),
            salary_text: "Nie podano".to_string(),
            location: location.to_string(),
            link: "https://www.pracuj.pl/praca/x,oferta,1".to_string(),
            requirements_summary: String::new(),
        }
    }

    #[test]
    fn passes_when_all_rules_hold() {
        let l = listing("Dyrektor Sprzedaży", "Warszawa, Mokotów");
        assert_eq!(pre_filter(&l, &filters()), Ok(()));
    }

    #[test]
    fn location_match_is_case_insensitive() {
        let l = listing("Head of Sales", "Praca ZDALNA");
        assert_eq!(pre_filter(&l, &filters()), Ok(()));
    }

    #[test]
    fn rejects_wrong_location() {
        let l = listing("Dyrektor Sprzedaży", "Kraków");
        assert_eq!(pre_filter(&l, &filters()), Err(RejectReason::WrongLocation));
    }

    #[test]
    fn location_failure_is_reported_before_title_exclusion() {
        let l = listing("Junior Dyrektor", "Gdańsk");
        assert_eq!(pre_filter(&l, &filters()), Err(RejectReason::WrongLocation));
    }

    #[test]
    fn rejects_excluded_title_keyword() {
        let l = listing("Junior Head of Sales", "Warszawa");
        assert_eq!(
            pre_filter(&l, &filters()),
            Err(RejectReason::ExcludedTitleKeyword)
        );
    }

    #[test]
    fn rejects_missing_seniority_token() {
        let l = listing("Specjalista ds. sprzedaży", "Warszawa");
        let err = pre_filter(&l, &filters()).unwrap_err();
        assert_eq!(err, RejectReason::MissingRequiredTitleKeyword);
        assert_eq!(err.to_string(), "missing required seniority/level token");
    }

    #[test]
    fn salary_floor_exempts_unknown() {
        assert!(passes_salary_floor(0, 15000));
        assert!(passes_salary_floor(15000, 15000));
        assert!(!passes_salary_floor(9000, 15000));
    }
}
