//! Station reference data.

use serde::{Deserialize, Serialize};

/// A ground station from the SUADA reference tables.
///
/// Immutable for the duration of a run. Per-time-step grid placement
/// is carried separately as a `GridCell`, never written back here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: i32,
    pub name: String,
    pub sensor_id: i32,
    pub country: Option<String>,
    /// Geographic longitude (degrees east)
    pub longitude: f64,
    /// Geographic latitude (degrees north)
    pub latitude: f64,
    /// Altitude above mean sea level (meters)
    pub altitude: f64,
}

/// Country selection applied after grid placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryFilter {
    All,
    Only(String),
}

impl CountryFilter {
    /// Parse the CLI value; the literal `All` (any case) selects all
    /// countries, anything else is an exact country-code match.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("all") {
            CountryFilter::All
        } else {
            CountryFilter::Only(value.to_string())
        }
    }

    pub fn matches(&self, station: &Station) -> bool {
        match self {
            CountryFilter::All => true,
            CountryFilter::Only(code) => station.country.as_deref() == Some(code.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(country: Option<&str>) -> Station {
        Station {
            id: 1,
            name: "SOFI".to_string(),
            sensor_id: 10,
            country: country.map(|c| c.to_string()),
            longitude: 23.38,
            latitude: 42.65,
            altitude: 1164.0,
        }
    }

    #[test]
    fn test_filter_all_matches_everything() {
        let filter = CountryFilter::parse("All");
        assert!(filter.matches(&station(Some("BG"))));
        assert!(filter.matches(&station(None)));
    }

    #[test]
    fn test_filter_only_exact_match() {
        let filter = CountryFilter::parse("BG");
        assert!(filter.matches(&station(Some("BG"))));
        assert!(!filter.matches(&station(Some("GR"))));
        assert!(!filter.matches(&station(None)));
    }
}
