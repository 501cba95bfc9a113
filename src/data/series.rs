//! Year-keyed series feeding the line and trend charts.

use super::model::{Measure, TbRecord};

/// `(year, value)` points for one country and one measure, sorted by year.
/// Null cells produce no point, so the chart draws gaps instead of zeros.
pub fn country_year_series(
    records: &[&TbRecord],
    country: &str,
    measure: Measure,
) -> Vec<(i32, f64)> {
    let mut points: Vec<(i32, f64)> = records
        .iter()
        .filter(|rec| rec.country == country)
        .filter_map(|rec| measure.extract(rec).map(|v| (rec.year, v)))
        .collect();
    points.sort_by_key(|&(year, _)| year);
    points
}

/// Unpivot several measures into long `(year, label, value)` form.
///
/// This is the shape the multi-line charts consume (one line per measure,
/// e.g. the HIV-mortality estimate with its low/high bounds). Row order
/// follows the input records, with the measures in the order given.
pub fn melt_measures(
    records: &[&TbRecord],
    measures: &[Measure],
) -> Vec<(i32, &'static str, f64)> {
    let mut rows = Vec::new();
    for rec in records {
        for &measure in measures {
            if let Some(v) = measure.extract(rec) {
                rows.push((rec.year, measure.key(), v));
            }
        }
    }
    rows
}
