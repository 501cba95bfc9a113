//! End-to-end: CSV on disk → load → filter → grouped aggregate.

use std::io::Write;

use tb_burden::data::aggregate::{group_aggregate, sorted_desc};
use tb_burden::data::cache::DatasetCache;
use tb_burden::data::loader::load_csv;
use tb_burden::{filter_records, AggregateOp, FilterCriteria, GroupKey, Measure};

const HEADER: &str = "Country or territory name,ISO 3-character country/territory code,Region,Year,Estimated total population number,Estimated incidence (all forms) per 100 000 population,Estimated number of incident cases (all forms),Estimated prevalence of TB (all forms) per 100 000 population,\"Estimated mortality of TB cases (all forms, excluding HIV) per 100 000 population\",\"Estimated number of deaths from TB (all forms, excluding HIV)\",\"Case detection rate (all forms), percent\",Estimated incidence of TB cases who are HIV-positive,\"Estimated mortality of TB cases who are HIV-positive, per 100 000 population\",\"Estimated mortality of TB cases who are HIV-positive, per 100 000 population, low bound\",\"Estimated mortality of TB cases who are HIV-positive, per 100 000 population, high bound\"";

fn fixture(rows: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "{HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}

// Deaths live in column 10; the three rows mirror the worked example:
// two AFR rows (10 + 20 deaths) and one EUR row (5 deaths).
const WORKED_EXAMPLE: &[&str] = &[
    "Angola,AGO,AFR,1995,,,,,,10,,,,,",
    "Angola,AGO,AFR,2000,,,,,,20,,,,,",
    "France,FRA,EUR,1995,,,,,,5,,,,,",
];

#[test]
fn filter_then_sum_deaths_by_region() {
    let file = fixture(WORKED_EXAMPLE);
    let dataset = load_csv(file.path()).unwrap();

    // Region codes are title-cased at load, so select "Afr", not "AFR".
    let criteria = FilterCriteria::select_all(&dataset)
        .with_regions(["Afr"])
        .with_years(&dataset, 1990, 2013);
    let selected = filter_records(&dataset, &criteria);
    assert_eq!(selected.len(), 2);

    let sums = group_aggregate(
        &selected,
        GroupKey::Region,
        Measure::DeathsExclHiv,
        AggregateOp::Sum,
    );
    assert_eq!(sums.len(), 1);
    assert_eq!(sums["Afr"], Some(30.0));
}

#[test]
fn null_cells_never_become_zeros_end_to_end() {
    let file = fixture(&[
        "Angola,AGO,AFR,1995,,,,,,10,,,,,",
        "Angola,AGO,AFR,1996,,,,,,,,,,,",
        "Angola,AGO,AFR,1997,,,,,,20,,,,,",
        "France,FRA,EUR,1995,,,,,,,,,,,",
    ]);
    let dataset = load_csv(file.path()).unwrap();
    let selected = filter_records(&dataset, &FilterCriteria::select_all(&dataset));

    let means = group_aggregate(
        &selected,
        GroupKey::Region,
        Measure::DeathsExclHiv,
        AggregateOp::Mean,
    );
    // Mean over {10, null, 20} is 15, not 10.
    assert_eq!(means["Afr"], Some(15.0));
    // EUR has only a null cell: absent value, present group.
    assert_eq!(means["Eur"], None);

    // And the bar-chart ordering drops the all-null group entirely.
    assert_eq!(sorted_desc(&means), vec![("Afr".to_string(), 15.0)]);
}

#[test]
fn cached_dataset_is_shared_until_cleared() {
    let file = fixture(WORKED_EXAMPLE);
    let cache = DatasetCache::new(file.path());

    let first = cache.get().unwrap();
    let second = cache.get().unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    cache.clear();
    let third = cache.get().unwrap();
    assert!(!std::sync::Arc::ptr_eq(&first, &third));
    assert_eq!(first.len(), third.len());
}

#[test]
fn messy_labels_collapse_to_one_canonical_country() {
    let file = fixture(&[
        " viet nam ,VNM,WPR,1995,,,,,,10,,,,,",
        "VIET NAM,VNM,WPR,1996,,,,,,20,,,,,",
    ]);
    let dataset = load_csv(file.path()).unwrap();
    assert_eq!(dataset.countries.len(), 1);

    let criteria = FilterCriteria::select_all(&dataset).with_countries(["Viet Nam"]);
    let selected = filter_records(&dataset, &criteria);
    assert_eq!(selected.len(), 2);

    let sums = group_aggregate(
        &selected,
        GroupKey::Country,
        Measure::DeathsExclHiv,
        AggregateOp::Sum,
    );
    assert_eq!(sums["Viet Nam"], Some(30.0));
}
