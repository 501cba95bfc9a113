use std::sync::Arc;

use crate::data::filter::FilterCriteria;
use crate::data::model::{TbDataset, TbRecord};

// ---------------------------------------------------------------------------
// Per-session state
// ---------------------------------------------------------------------------

/// One user session: a shared handle on the immutable dataset plus that
/// user's own filter selections. The dataset is never copied per session;
/// only the criteria and the cached match list are.
pub struct Session {
    dataset: Arc<TbDataset>,
    criteria: FilterCriteria,
    /// Indices into `dataset.records` passing the current criteria.
    matched: Vec<usize>,
}

impl Session {
    /// Start a session with everything selected.
    ///
    /// The match list is computed from the criteria even here: rows with a
    /// blank Region cell are outside every region selection, so a fresh
    /// session must already exclude them.
    pub fn new(dataset: Arc<TbDataset>) -> Self {
        let criteria = FilterCriteria::select_all(&dataset);
        let mut session = Session {
            dataset,
            criteria,
            matched: Vec::new(),
        };
        session.refilter();
        session
    }

    pub fn dataset(&self) -> &TbDataset {
        &self.dataset
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The records passing the current criteria, in dataset order.
    pub fn selected_records(&self) -> Vec<&TbRecord> {
        self.matched
            .iter()
            .map(|&i| &self.dataset.records[i])
            .collect()
    }

    /// Replace the criteria wholesale and recompute the match list.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refilter();
    }

    /// Replace the region selection.
    pub fn set_regions<I, S>(&mut self, regions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.criteria.regions = regions.into_iter().map(Into::into).collect();
        self.refilter();
    }

    /// Replace the year range, clamped to the dataset's span.
    pub fn set_years(&mut self, lo: i32, hi: i32) {
        let (min, max) = self.dataset.year_span;
        self.criteria.years = (lo.clamp(min, max), hi.clamp(min, max));
        self.refilter();
    }

    /// Replace the country narrowing; an empty iterator clears it.
    pub fn set_countries<I, S>(&mut self, countries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.criteria.countries = countries.into_iter().map(Into::into).collect();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.matched = self
            .dataset
            .records
            .iter()
            .enumerate()
            .filter(|(_, rec)| self.criteria.matches(rec))
            .map(|(i, _)| i)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::filter_records;
    use crate::data::test_support::record;

    fn dataset() -> Arc<TbDataset> {
        Arc::new(
            TbDataset::from_records(vec![
                record("Afr", "Angola", 1990),
                record("Eur", "France", 1995),
                record("Afr", "Benin", 2000),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn new_session_selects_everything() {
        let session = Session::new(dataset());
        assert_eq!(session.selected_records().len(), 3);
    }

    #[test]
    fn new_session_agrees_with_its_criteria_on_blank_regions() {
        let ds = Arc::new(
            TbDataset::from_records(vec![
                record("Afr", "Angola", 1990),
                record("", "Nowhere", 1995),
                record("Eur", "France", 2000),
            ])
            .unwrap(),
        );
        let session = Session::new(Arc::clone(&ds));

        // The blank-Region row is outside every region selection, so the
        // fresh session and a direct filter must both drop it.
        let direct = filter_records(&ds, session.criteria());
        assert_eq!(session.selected_records(), direct);
        assert_eq!(session.selected_records().len(), 2);
    }

    #[test]
    fn sessions_filter_independently_over_one_dataset() {
        let ds = dataset();
        let mut a = Session::new(Arc::clone(&ds));
        let mut b = Session::new(ds);

        a.set_regions(["Afr"]);
        b.set_years(1995, 2000);

        assert_eq!(a.selected_records().len(), 2);
        assert_eq!(b.selected_records().len(), 2);
        assert!(a.selected_records().iter().all(|r| r.region == "Afr"));
        assert!(b.selected_records().iter().all(|r| r.year >= 1995));
    }

    #[test]
    fn clearing_countries_restores_the_region_year_selection() {
        let mut session = Session::new(dataset());
        session.set_countries(["Angola"]);
        assert_eq!(session.selected_records().len(), 1);
        session.set_countries(Vec::<String>::new());
        assert_eq!(session.selected_records().len(), 3);
    }
}
