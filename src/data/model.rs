use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::DataError;

// ---------------------------------------------------------------------------
// TbRecord – one row of the WHO burden table
// ---------------------------------------------------------------------------

/// A single country/year observation from `TB_Burden_Country.csv`.
///
/// Every measurement column is nullable in the source file; empty CSV cells
/// decode to `None`. Columns not listed here are ignored by the reader.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TbRecord {
    #[serde(rename = "Country or territory name")]
    pub country: String,

    #[serde(rename = "ISO 3-character country/territory code")]
    pub iso3: String,

    /// WHO geographic grouping code (AFR, AMR, EMR, EUR, SEA, WPR).
    #[serde(rename = "Region")]
    pub region: String,

    #[serde(rename = "Year")]
    pub year: i32,

    #[serde(rename = "Estimated total population number")]
    pub population: Option<f64>,

    #[serde(rename = "Estimated incidence (all forms) per 100 000 population")]
    pub incidence_per_100k: Option<f64>,

    #[serde(rename = "Estimated number of incident cases (all forms)")]
    pub incident_cases: Option<f64>,

    #[serde(rename = "Estimated prevalence of TB (all forms) per 100 000 population")]
    pub prevalence_per_100k: Option<f64>,

    #[serde(
        rename = "Estimated mortality of TB cases (all forms, excluding HIV) per 100 000 population"
    )]
    pub mortality_per_100k: Option<f64>,

    #[serde(rename = "Estimated number of deaths from TB (all forms, excluding HIV)")]
    pub deaths_excl_hiv: Option<f64>,

    #[serde(rename = "Case detection rate (all forms), percent")]
    pub detection_rate_pct: Option<f64>,

    #[serde(rename = "Estimated incidence of TB cases who are HIV-positive")]
    pub hiv_incidence: Option<f64>,

    #[serde(
        rename = "Estimated mortality of TB cases who are HIV-positive, per 100 000 population"
    )]
    pub hiv_mortality_per_100k: Option<f64>,

    #[serde(
        rename = "Estimated mortality of TB cases who are HIV-positive, per 100 000 population, low bound"
    )]
    pub hiv_mortality_per_100k_lo: Option<f64>,

    #[serde(
        rename = "Estimated mortality of TB cases who are HIV-positive, per 100 000 population, high bound"
    )]
    pub hiv_mortality_per_100k_hi: Option<f64>,
}

// ---------------------------------------------------------------------------
// Measure – the numeric measurement columns
// ---------------------------------------------------------------------------

/// One of the numeric measurement columns of the burden table.
///
/// Each variant knows its exact CSV header and a short key used on the
/// command line (`incidence`, `deaths`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Population,
    IncidencePer100k,
    IncidentCases,
    PrevalencePer100k,
    MortalityPer100k,
    DeathsExclHiv,
    DetectionRatePct,
    HivIncidence,
    HivMortalityPer100k,
    HivMortalityPer100kLow,
    HivMortalityPer100kHigh,
}

impl Measure {
    pub const ALL: [Measure; 11] = [
        Measure::Population,
        Measure::IncidencePer100k,
        Measure::IncidentCases,
        Measure::PrevalencePer100k,
        Measure::MortalityPer100k,
        Measure::DeathsExclHiv,
        Measure::DetectionRatePct,
        Measure::HivIncidence,
        Measure::HivMortalityPer100k,
        Measure::HivMortalityPer100kLow,
        Measure::HivMortalityPer100kHigh,
    ];

    /// Exact column header in the source CSV.
    pub fn column_name(self) -> &'static str {
        match self {
            Measure::Population => "Estimated total population number",
            Measure::IncidencePer100k => {
                "Estimated incidence (all forms) per 100 000 population"
            }
            Measure::IncidentCases => "Estimated number of incident cases (all forms)",
            Measure::PrevalencePer100k => {
                "Estimated prevalence of TB (all forms) per 100 000 population"
            }
            Measure::MortalityPer100k => {
                "Estimated mortality of TB cases (all forms, excluding HIV) per 100 000 population"
            }
            Measure::DeathsExclHiv => {
                "Estimated number of deaths from TB (all forms, excluding HIV)"
            }
            Measure::DetectionRatePct => "Case detection rate (all forms), percent",
            Measure::HivIncidence => {
                "Estimated incidence of TB cases who are HIV-positive"
            }
            Measure::HivMortalityPer100k => {
                "Estimated mortality of TB cases who are HIV-positive, per 100 000 population"
            }
            Measure::HivMortalityPer100kLow => {
                "Estimated mortality of TB cases who are HIV-positive, per 100 000 population, low bound"
            }
            Measure::HivMortalityPer100kHigh => {
                "Estimated mortality of TB cases who are HIV-positive, per 100 000 population, high bound"
            }
        }
    }

    /// Short key for CLI flags and chart labels.
    pub fn key(self) -> &'static str {
        match self {
            Measure::Population => "population",
            Measure::IncidencePer100k => "incidence",
            Measure::IncidentCases => "incident-cases",
            Measure::PrevalencePer100k => "prevalence",
            Measure::MortalityPer100k => "mortality",
            Measure::DeathsExclHiv => "deaths",
            Measure::DetectionRatePct => "detection-rate",
            Measure::HivIncidence => "hiv-incidence",
            Measure::HivMortalityPer100k => "hiv-mortality",
            Measure::HivMortalityPer100kLow => "hiv-mortality-low",
            Measure::HivMortalityPer100kHigh => "hiv-mortality-high",
        }
    }

    /// Read this measure from a record. `None` when the cell was empty.
    pub fn extract(self, record: &TbRecord) -> Option<f64> {
        match self {
            Measure::Population => record.population,
            Measure::IncidencePer100k => record.incidence_per_100k,
            Measure::IncidentCases => record.incident_cases,
            Measure::PrevalencePer100k => record.prevalence_per_100k,
            Measure::MortalityPer100k => record.mortality_per_100k,
            Measure::DeathsExclHiv => record.deaths_excl_hiv,
            Measure::DetectionRatePct => record.detection_rate_pct,
            Measure::HivIncidence => record.hiv_incidence,
            Measure::HivMortalityPer100k => record.hiv_mortality_per_100k,
            Measure::HivMortalityPer100kLow => record.hiv_mortality_per_100k_lo,
            Measure::HivMortalityPer100kHigh => record.hiv_mortality_per_100k_hi,
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Measure {
    type Err = DataError;

    /// Accepts either the short key or the full CSV header.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Measure::ALL
            .iter()
            .copied()
            .find(|m| m.key() == s || m.column_name() == s)
            .ok_or_else(|| DataError::UnknownColumn(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// GroupKey / AggregateOp
// ---------------------------------------------------------------------------

/// Categorical column used as the grouping key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Region,
    Country,
}

impl GroupKey {
    pub fn extract(self, record: &TbRecord) -> &str {
        match self {
            GroupKey::Region => &record.region,
            GroupKey::Country => &record.country,
        }
    }
}

impl FromStr for GroupKey {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "region" | "Region" => Ok(GroupKey::Region),
            "country" | "Country" | "Country or territory name" => Ok(GroupKey::Country),
            other => Err(DataError::UnknownColumn(other.to_string())),
        }
    }
}

/// How to reduce a group's non-null values to a single number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Sum,
    Mean,
}

impl FromStr for AggregateOp {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sum" => Ok(AggregateOp::Sum),
            "mean" | "avg" => Ok(AggregateOp::Mean),
            other => Err(DataError::UnknownColumn(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// TbDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed distinct values.
///
/// Immutable after construction; wrap in `Arc` to share across sessions.
#[derive(Debug, Clone)]
pub struct TbDataset {
    /// All rows in file order.
    pub records: Vec<TbRecord>,
    /// Sorted distinct region codes.
    pub regions: BTreeSet<String>,
    /// Sorted distinct country names.
    pub countries: BTreeSet<String>,
    /// Observed (min, max) of the Year column.
    pub year_span: (i32, i32),
}

impl TbDataset {
    /// Build the distinct-value indices from loaded rows.
    pub fn from_records(records: Vec<TbRecord>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::EmptyDataset);
        }

        let mut regions = BTreeSet::new();
        let mut countries = BTreeSet::new();
        let mut min_year = i32::MAX;
        let mut max_year = i32::MIN;

        for rec in &records {
            if !rec.region.is_empty() {
                regions.insert(rec.region.clone());
            }
            if !rec.country.is_empty() {
                countries.insert(rec.country.clone());
            }
            min_year = min_year.min(rec.year);
            max_year = max_year.max(rec.year);
        }

        Ok(TbDataset {
            records,
            regions,
            countries,
            year_span: (min_year, max_year),
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
