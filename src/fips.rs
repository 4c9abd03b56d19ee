// src/fips.rs

use once_cell::sync::Lazy;
use std::{collections::HashMap, fmt};

use crate::error::{CensusError, Result};

/// Upper-case state name → two-digit FIPS code, as used by the `in=state:` scope.
static STATE_FIPS: &[(&str, &str)] = &[
    ("ALABAMA", "01"),
    ("ALASKA", "02"),
    ("ARIZONA", "04"),
    ("ARKANSAS", "05"),
    ("CALIFORNIA", "06"),
    ("COLORADO", "08"),
    ("CONNECTICUT", "09"),
    ("DELAWARE", "10"),
    ("DISTRICT OF COLUMBIA", "11"),
    ("FLORIDA", "12"),
    ("GEORGIA", "13"),
    ("HAWAII", "15"),
    ("IDAHO", "16"),
    ("ILLINOIS", "17"),
    ("INDIANA", "18"),
    ("IOWA", "19"),
    ("KANSAS", "20"),
    ("KENTUCKY", "21"),
    ("LOUISIANA", "22"),
    ("MAINE", "23"),
    ("MARYLAND", "24"),
    ("MASSACHUSETTS", "25"),
    ("MICHIGAN", "26"),
    ("MINNESOTA", "27"),
    ("MISSISSIPPI", "28"),
    ("MISSOURI", "29"),
    ("MONTANA", "30"),
    ("NEBRASKA", "31"),
    ("NEVADA", "32"),
    ("NEW HAMPSHIRE", "33"),
    ("NEW JERSEY", "34"),
    ("NEW MEXICO", "35"),
    ("NEW YORK", "36"),
    ("NORTH CAROLINA", "37"),
    ("NORTH DAKOTA", "38"),
    ("OHIO", "39"),
    ("OKLAHOMA", "40"),
    ("OREGON", "41"),
    ("PENNSYLVANIA", "42"),
    ("RHODE ISLAND", "44"),
    ("SOUTH CAROLINA", "45"),
    ("SOUTH DAKOTA", "46"),
    ("TENNESSEE", "47"),
    ("TEXAS", "48"),
    ("UTAH", "49"),
    ("VERMONT", "50"),
    ("VIRGINIA", "51"),
    ("WASHINGTON", "53"),
    ("WEST VIRGINIA", "54"),
    ("WISCONSIN", "55"),
    ("WYOMING", "56"),
    ("PUERTO RICO", "72"),
];

static BY_NAME: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| STATE_FIPS.iter().copied().collect());

static BY_CODE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| STATE_FIPS.iter().map(|&(name, code)| (code, name)).collect());

/// A validated two-digit state code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateFips(&'static str);

impl StateFips {
    /// Accept `code` only if it belongs to a known state.
    pub fn parse(code: &str) -> Result<Self> {
        BY_CODE
            .get_key_value(code)
            .map(|(&code, _)| StateFips(code))
            .ok_or_else(|| CensusError::InvalidStateCode(code.to_string()))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Full upper-case name for this code.
    pub fn name(&self) -> &'static str {
        state_name(self)
    }
}

impl fmt::Display for StateFips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Exact lookup of an upper-case state name. No normalisation, no fuzzy match.
pub fn lookup_state(name: &str) -> Result<StateFips> {
    BY_NAME
        .get(name)
        .map(|&code| StateFips(code))
        .ok_or_else(|| CensusError::StateNotFound(name.to_string()))
}

/// Reverse lookup: the upper-case name of a validated code.
pub fn state_name(state: &StateFips) -> &'static str {
    // every StateFips was built from a key of BY_CODE
    BY_CODE.get(state.0).copied().unwrap_or_default()
}

/// Accept either a two-digit code or a state name in any case.
pub fn resolve_state(input: &str) -> Result<StateFips> {
    let input = input.trim();
    if input.len() == 2 && input.bytes().all(|b| b.is_ascii_digit()) {
        StateFips::parse(input)
    } else {
        lookup_state(&input.to_uppercase())
    }
}

/// `(name, code)` pairs ordered by code.
pub fn all_states() -> impl Iterator<Item = (&'static str, StateFips)> {
    let mut sorted: Vec<_> = STATE_FIPS.to_vec();
    sorted.sort_by_key(|&(_, code)| code);
    sorted
        .into_iter()
        .map(|(name, code)| (name, StateFips(code)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_resolves_to_its_code() {
        for &(name, code) in STATE_FIPS {
            let fips = lookup_state(name).unwrap();
            assert_eq!(fips.as_str(), code);
            assert_eq!(fips.name(), name);
            assert_eq!(state_name(&fips), name);
        }
        assert_eq!(lookup_state("CALIFORNIA").unwrap().to_string(), "06");
    }

    #[test]
    fn unknown_names_are_not_found() {
        for bad in ["california", "CALIFORNIA ", "GUAM", ""] {
            match lookup_state(bad) {
                Err(CensusError::StateNotFound(name)) => assert_eq!(name, bad),
                other => panic!("expected StateNotFound for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn codes_must_be_known() {
        assert_eq!(StateFips::parse("72").unwrap().name(), "PUERTO RICO");
        assert!(matches!(
            StateFips::parse("03"),
            Err(CensusError::InvalidStateCode(_))
        ));
        assert!(matches!(
            StateFips::parse("6"),
            Err(CensusError::InvalidStateCode(_))
        ));
    }

    #[test]
    fn resolve_accepts_codes_and_names() {
        assert_eq!(resolve_state("06").unwrap().name(), "CALIFORNIA");
        assert_eq!(resolve_state(" new york ").unwrap().as_str(), "36");
        assert!(matches!(
            resolve_state("99"),
            Err(CensusError::InvalidStateCode(_))
        ));
        assert!(matches!(
            resolve_state("Atlantis"),
            Err(CensusError::StateNotFound(name)) if name == "ATLANTIS"
        ));
    }

    #[test]
    fn table_is_consistent() {
        assert_eq!(STATE_FIPS.len(), 52);
        assert_eq!(BY_NAME.len(), STATE_FIPS.len());
        assert_eq!(BY_CODE.len(), STATE_FIPS.len());

        let codes: Vec<_> = all_states().map(|(_, c)| c.as_str()).collect();
        assert_eq!(codes.first(), Some(&"01"));
        assert_eq!(codes.last(), Some(&"72"));
        assert!(codes.windows(2).all(|w| w[0] < w[1]));
    }
}
