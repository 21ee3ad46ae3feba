use std::collections::HashSet;

use crate::covid::CountryStat;
use crate::model::CountryOption;

/// Dropdown entries, one per country that carries an ISO code. Entries
/// without one are dropped, not reported. A code seen twice keeps its first
/// entry.
pub fn build_options(stats: &[CountryStat]) -> Vec<CountryOption> {
    let mut seen = HashSet::new();
    stats
        .iter()
        .filter_map(|stat| {
            let code = stat.code()?;
            seen.insert(code).then(|| CountryOption {
                name: stat.country.clone(),
                code: code.to_string(),
            })
        })
        .collect()
}

/// Table rows ordered by cumulative cases, highest first. Equal counts keep
/// their input order.
pub fn sort_by_cases(stats: &[CountryStat]) -> Vec<CountryStat> {
    let mut sorted = stats.to_vec();
    // `sort_by` is stable
    sorted.sort_by(|a, b| b.counters.cases.cmp(&a.counters.cases));
    sorted
}
