use std::collections::BTreeSet;

use super::model::{TbDataset, TbRecord};

// ---------------------------------------------------------------------------
// FilterCriteria – the sidebar selections as an explicit value
// ---------------------------------------------------------------------------

/// User-selected constraints narrowing the dataset before aggregation.
///
/// Semantics follow the dashboard sidebar:
/// * `regions` is literal membership — an empty set selects nothing.
/// * `years` is inclusive on both ends.
/// * `countries` is an optional narrowing — an empty set means "no country
///   filter", not "select none".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub regions: BTreeSet<String>,
    pub years: (i32, i32),
    pub countries: BTreeSet<String>,
}

impl FilterCriteria {
    /// The default sidebar state: every region, the full year span, no
    /// country narrowing.
    pub fn select_all(dataset: &TbDataset) -> Self {
        FilterCriteria {
            regions: dataset.regions.clone(),
            years: dataset.year_span,
            countries: BTreeSet::new(),
        }
    }

    /// Restrict the year range. Both bounds are clamped into the dataset's
    /// observed span, so the stored range never leaves it.
    pub fn with_years(mut self, dataset: &TbDataset, lo: i32, hi: i32) -> Self {
        let (min, max) = dataset.year_span;
        self.years = (lo.clamp(min, max), hi.clamp(min, max));
        self
    }

    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Whether a single record passes all active filters.
    pub fn matches(&self, rec: &TbRecord) -> bool {
        let (lo, hi) = self.years;
        self.regions.contains(&rec.region)
            && rec.year >= lo
            && rec.year <= hi
            && (self.countries.is_empty() || self.countries.contains(&rec.country))
    }
}

/// Return the records passing all active filters, in dataset order.
///
/// An empty result is not an error; the caller decides whether to render
/// a chart or a "no data" notice.
pub fn filter_records<'a>(
    dataset: &'a TbDataset,
    criteria: &FilterCriteria,
) -> Vec<&'a TbRecord> {
    dataset
        .records
        .iter()
        .filter(|rec| criteria.matches(rec))
        .collect()
}
