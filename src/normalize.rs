//! Reshape the `/countries` response for the picker, the table and the map.

use crate::models::{CountryStat, SelectionOption};
use std::cmp::Reverse;

/// Everything derived from one `/countries` response.
///
/// Built fresh for every fetch; the previous list is replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryList {
    /// Records in API order (map layer).
    pub map: Vec<CountryStat>,
    /// Records sorted by cumulative confirmed cases, descending (table).
    pub table: Vec<CountryStat>,
    /// Picker entries, one per record, API order.
    pub options: Vec<SelectionOption>,
}

/// One picker option per record, order preserved.
///
/// Records without an ISO2 code use the country name as their code; the
/// single-country endpoint accepts names as well.
pub fn selection_options(countries: &[CountryStat]) -> Vec<SelectionOption> {
    countries
        .iter()
        .map(|c| SelectionOption {
            name: c.country.clone(),
            code: c.iso2().unwrap_or(c.country.as_str()).to_string(),
        })
        .collect()
}

/// New vector sorted by cumulative confirmed cases, largest first.
///
/// The sort is stable, so equal counts keep their input order. Missing counts
/// rank as zero.
pub fn sort_by_cases(countries: &[CountryStat]) -> Vec<CountryStat> {
    let mut sorted = countries.to_vec();
    sorted.sort_by_key(|c| Reverse(c.cases.unwrap_or(0)));
    sorted
}

pub fn normalize(countries: Vec<CountryStat>) -> CountryList {
    let table = sort_by_cases(&countries);
    let options = selection_options(&countries);
    CountryList {
        map: countries,
        table,
        options,
    }
}
