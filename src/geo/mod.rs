// src/geo/mod.rs

mod divisions;

pub use divisions::{division_of, Division};

use once_cell::sync::Lazy;
use regex::Regex;

/// A comma, optional spacing, then a two-character state token ("ALBANY, NY").
static COUNTY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*\w{2}\b").expect("county pattern is a valid regex"));

/// True when `area_name` carries a trailing state abbreviation, i.e. the row
/// describes a county rather than a state or national aggregate.
pub fn is_county(area_name: &str) -> bool {
    COUNTY_PATTERN.is_match(area_name)
}
