//! Grouped reductions feeding the categorical charts.

use std::collections::BTreeMap;

use super::model::{AggregateOp, GroupKey, Measure, TbRecord};

/// Group records by `key` and reduce `measure` with `op`.
///
/// Null cells are skipped, never treated as zero. A group whose cells are
/// all null still appears in the result, with `None` as its value; this is
/// what lets the chart layer distinguish "no estimate" from "zero".
pub fn group_aggregate(
    records: &[&TbRecord],
    key: GroupKey,
    measure: Measure,
    op: AggregateOp,
) -> BTreeMap<String, Option<f64>> {
    let mut sums: BTreeMap<String, (f64, u64)> = BTreeMap::new();

    for rec in records {
        let entry = sums.entry(key.extract(rec).to_string()).or_insert((0.0, 0));
        if let Some(v) = measure.extract(rec) {
            entry.0 += v;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(group, (sum, count))| {
            let value = match (op, count) {
                (_, 0) => None,
                (AggregateOp::Sum, _) => Some(sum),
                (AggregateOp::Mean, n) => Some(sum / n as f64),
            };
            (group, value)
        })
        .collect()
}

/// Flatten an aggregate into `(group, value)` pairs sorted by value,
/// highest first. All-null groups are dropped; the horizontal bar charts
/// have no bar to draw for them.
pub fn sorted_desc(aggregate: &BTreeMap<String, Option<f64>>) -> Vec<(String, f64)> {
    let mut rows: Vec<(String, f64)> = aggregate
        .iter()
        .filter_map(|(group, value)| value.map(|v| (group.clone(), v)))
        .collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));
    rows
}

/// Total each listed measure over the whole slice, labelled by its short
/// key. Feeds the incidence-vs-mortality pie: one slice per measure.
pub fn measure_totals(records: &[&TbRecord], measures: &[Measure]) -> Vec<(&'static str, f64)> {
    measures
        .iter()
        .map(|&m| {
            let total: f64 = records.iter().filter_map(|rec| m.extract(rec)).sum();
            (m.key(), total)
        })
        .collect()
}

/// Two-level Region → Country sum of `measure`, the sunburst hierarchy.
/// Countries with no non-null cell are omitted from their region's map.
pub fn region_country_rollup(
    records: &[&TbRecord],
    measure: Measure,
) -> BTreeMap<String, BTreeMap<String, f64>> {
    let mut rollup: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for rec in records {
        if let Some(v) = measure.extract(rec) {
            *rollup
                .entry(rec.region.clone())
                .or_default()
                .entry(rec.country.clone())
                .or_insert(0.0) += v;
        }
    }
    rollup
}
