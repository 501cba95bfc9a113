use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};

use super::model::{TbDataset, TbRecord};
use super::normalize::normalize_record;

/// Load the WHO burden table from a CSV file.
///
/// The first row must be a header; rows are matched to [`TbRecord`] by
/// column name, extra columns are ignored. Region and country labels are
/// normalized (trim + title-case) as rows come in, so the returned dataset
/// already carries canonical keys.
///
/// A missing or unreadable file, a header without the required columns, or
/// a row that fails to decode are all fatal; there is no partial load.
pub fn load_csv(path: &Path) -> Result<TbDataset> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening burden CSV {}", path.display()))?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<TbRecord>().enumerate() {
        let mut rec = result.with_context(|| format!("CSV row {row_no}"))?;
        normalize_record(&mut rec);
        records.push(rec);
    }
    debug!("decoded {} rows from {}", records.len(), path.display());

    let dataset = TbDataset::from_records(records)
        .with_context(|| format!("{} holds no data rows", path.display()))?;

    info!(
        "loaded {} rows, {} regions, {} countries, years {}..={}",
        dataset.len(),
        dataset.regions.len(),
        dataset.countries.len(),
        dataset.year_span.0,
        dataset.year_span.1
    );
    Ok(dataset)
}
