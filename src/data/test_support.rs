//! Shared builders for unit tests.

use super::model::TbRecord;

/// A record with the given key columns and all measures null.
pub(crate) fn record(region: &str, country: &str, year: i32) -> TbRecord {
    TbRecord {
        country: country.to_string(),
        iso3: String::new(),
        region: region.to_string(),
        year,
        population: None,
        incidence_per_100k: None,
        incident_cases: None,
        prevalence_per_100k: None,
        mortality_per_100k: None,
        deaths_excl_hiv: None,
        detection_rate_pct: None,
        hiv_incidence: None,
        hiv_mortality_per_100k: None,
        hiv_mortality_per_100k_lo: None,
        hiv_mortality_per_100k_hi: None,
    }
}

/// A record carrying a death count, the measure most tests reduce over.
pub(crate) fn record_with_deaths(
    region: &str,
    country: &str,
    year: i32,
    deaths: Option<f64>,
) -> TbRecord {
    TbRecord {
        deaths_excl_hiv: deaths,
        ..record(region, country, year)
    }
}
