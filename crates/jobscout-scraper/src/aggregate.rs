use std::collections::HashMap;

use jobscout_core::ListingSummary;

/// Flattens per-keyword results into one list with a single record per link.
///
/// When the same link appears more than once, the record seen last wins, but
/// it keeps the position of the first occurrence.
#[must_use]
pub fn aggregate<I>(per_keyword: I) -> Vec<ListingSummary>
where
    I: IntoIterator<Item = Vec<ListingSummary>>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<ListingSummary> = Vec::new();

    for listing in per_keyword.into_iter().flatten() {
        match positions.get(&listing.link) {
            Some(&idx) => unique[idx] = listing,
            None => {
                positions.insert(listing.link.clone(), unique.len());
                unique.push(listing);
            }
        }
    }

    unique
}
