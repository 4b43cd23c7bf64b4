// src/geo/divisions.rs

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// US Census Bureau division, plus the `Unmatched` sentinel ("ERROR") given
/// to area names that are not a recognised state, such as national totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Division {
    #[serde(rename = "New England")]
    NewEngland,
    #[serde(rename = "Mid-Atlantic")]
    MidAtlantic,
    #[serde(rename = "East North Central")]
    EastNorthCentral,
    #[serde(rename = "West North Central")]
    WestNorthCentral,
    #[serde(rename = "South Atlantic")]
    SouthAtlantic,
    #[serde(rename = "East South Central")]
    EastSouthCentral,
    #[serde(rename = "West South Central")]
    WestSouthCentral,
    #[serde(rename = "Mountain")]
    Mountain,
    #[serde(rename = "Pacific")]
    Pacific,
    #[serde(rename = "ERROR")]
    Unmatched,
}

impl Division {
    pub fn as_str(self) -> &'static str {
        match self {
            Division::NewEngland => "New England",
            Division::MidAtlantic => "Mid-Atlantic",
            Division::EastNorthCentral => "East North Central",
            Division::WestNorthCentral => "West North Central",
            Division::SouthAtlantic => "South Atlantic",
            Division::EastSouthCentral => "East South Central",
            Division::WestSouthCentral => "West South Central",
            Division::Mountain => "Mountain",
            Division::Pacific => "Pacific",
            Division::Unmatched => "ERROR",
        }
    }

    /// Inverse of [`Division::as_str`].
    pub fn from_label(label: &str) -> Option<Division> {
        ALL.iter().copied().find(|d| d.as_str() == label)
    }

    pub fn is_unmatched(self) -> bool {
        self == Division::Unmatched
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const ALL: [Division; 10] = [
    Division::NewEngland,
    Division::MidAtlantic,
    Division::EastNorthCentral,
    Division::WestNorthCentral,
    Division::SouthAtlantic,
    Division::EastSouthCentral,
    Division::WestSouthCentral,
    Division::Mountain,
    Division::Pacific,
    Division::Unmatched,
];

const MEMBERS: &[(Division, &[&str])] = &[
    (
        Division::NewEngland,
        &[
            "CONNECTICUT",
            "MAINE",
            "MASSACHUSETTS",
            "NEW HAMPSHIRE",
            "RHODE ISLAND",
            "VERMONT",
        ],
    ),
    (
        Division::MidAtlantic,
        &["NEW JERSEY", "NEW YORK", "PENNSYLVANIA"],
    ),
    (
        Division::EastNorthCentral,
        &["ILLINOIS", "INDIANA", "MICHIGAN", "OHIO", "WISCONSIN"],
    ),
    (
        Division::WestNorthCentral,
        &[
            "IOWA",
            "KANSAS",
            "MINNESOTA",
            "MISSOURI",
            "NEBRASKA",
            "NORTH DAKOTA",
            "SOUTH DAKOTA",
        ],
    ),
    (
        Division::SouthAtlantic,
        &[
            "DELAWARE",
            "DISTRICT OF COLUMBIA",
            "FLORIDA",
            "GEORGIA",
            "MARYLAND",
            "NORTH CAROLINA",
            "SOUTH CAROLINA",
            "VIRGINIA",
            "WEST VIRGINIA",
        ],
    ),
    (
        Division::EastSouthCentral,
        &["ALABAMA", "KENTUCKY", "MISSISSIPPI", "TENNESSEE"],
    ),
    (
        Division::WestSouthCentral,
        &["ARKANSAS", "LOUISIANA", "OKLAHOMA", "TEXAS"],
    ),
    (
        Division::Mountain,
        &[
            "ARIZONA",
            "COLORADO",
            "IDAHO",
            "MONTANA",
            "NEVADA",
            "NEW MEXICO",
            "UTAH",
            "WYOMING",
        ],
    ),
    (
        Division::Pacific,
        &["ALASKA", "CALIFORNIA", "HAWAII", "OREGON", "WASHINGTON"],
    ),
];

static LOOKUP: Lazy<HashMap<&'static str, Division>> = Lazy::new(|| {
    MEMBERS
        .iter()
        .flat_map(|(division, names)| names.iter().map(move |name| (*name, *division)))
        .collect()
});

/// Exact, case-sensitive lookup of an uppercase state name.
pub fn division_of(state_name: &str) -> Division {
    LOOKUP
        .get(state_name)
        .copied()
        .unwrap_or(Division::Unmatched)
}
