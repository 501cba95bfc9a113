use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use log::info;

use tb_burden::data::aggregate::{group_aggregate, sorted_desc};
use tb_burden::data::cache::DatasetCache;
use tb_burden::data::normalize::clean_label;
use tb_burden::{filter_records, AggregateOp, FilterCriteria, GroupKey, Measure};

const USAGE: &str = "\
Usage: tb-burden <CSV> [options]

Options:
  --regions A,B,...     region codes to keep (default: all)
  --years LO:HI         inclusive year range (default: full span)
  --countries X,Y,...   country names to keep (default: no narrowing)
  --group-by KEY        region | country (default: region)
  --measure KEY         measurement column, e.g. deaths, incidence,
                        prevalence, mortality, population (default: deaths)
  --op OP               sum | mean (default: sum)
  --json                print the aggregate as JSON instead of a table
";

struct Args {
    csv_path: String,
    regions: Option<Vec<String>>,
    years: Option<(i32, i32)>,
    countries: Vec<String>,
    group_by: GroupKey,
    measure: Measure,
    op: AggregateOp,
    json: bool,
}

fn parse_args(mut argv: std::env::Args) -> Result<Args> {
    argv.next(); // program name

    let mut csv_path = None;
    let mut args = Args {
        csv_path: String::new(),
        regions: None,
        years: None,
        countries: Vec::new(),
        group_by: GroupKey::Region,
        measure: Measure::DeathsExclHiv,
        op: AggregateOp::Sum,
        json: false,
    };

    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--regions" => {
                let list = argv.next().context("--regions needs a value")?;
                args.regions = Some(split_list(&list));
            }
            "--years" => {
                let range = argv.next().context("--years needs a value")?;
                let (lo, hi) = range
                    .split_once(':')
                    .with_context(|| format!("--years expects LO:HI, got '{range}'"))?;
                args.years = Some((
                    lo.parse().with_context(|| format!("bad year '{lo}'"))?,
                    hi.parse().with_context(|| format!("bad year '{hi}'"))?,
                ));
            }
            "--countries" => {
                let list = argv.next().context("--countries needs a value")?;
                args.countries = split_list(&list);
            }
            "--group-by" => {
                args.group_by = argv.next().context("--group-by needs a value")?.parse()?;
            }
            "--measure" => {
                args.measure = argv.next().context("--measure needs a value")?.parse()?;
            }
            "--op" => {
                args.op = argv.next().context("--op needs a value")?.parse()?;
            }
            "--json" => args.json = true,
            "--help" | "-h" => {
                print!("{USAGE}");
                std::process::exit(0);
            }
            other if csv_path.is_none() && !other.starts_with('-') => {
                csv_path = Some(other.to_string());
            }
            other => bail!("unrecognized argument '{other}'\n\n{USAGE}"),
        }
    }

    args.csv_path = csv_path.with_context(|| format!("missing CSV path\n\n{USAGE}"))?;
    Ok(args)
}

/// Comma-separated CLI values, cleaned the same way the dataset labels are
/// so "AFR" and " afr " both match the canonical "Afr".
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(clean_label)
        .filter(|s| !s.is_empty())
        .collect()
}

fn run(args: Args) -> Result<()> {
    let cache = DatasetCache::new(&args.csv_path);
    let dataset = cache.get()?;

    let mut criteria = FilterCriteria::select_all(&dataset);
    if let Some(regions) = args.regions {
        criteria = criteria.with_regions(regions);
    }
    if let Some((lo, hi)) = args.years {
        criteria = criteria.with_years(&dataset, lo, hi);
    }
    criteria = criteria.with_countries(args.countries);

    let selected = filter_records(&dataset, &criteria);
    info!("{} of {} rows match the filters", selected.len(), dataset.len());

    if selected.is_empty() {
        println!("no data matches the selected filters");
        return Ok(());
    }

    let aggregate = group_aggregate(&selected, args.group_by, args.measure, args.op);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&aggregate)?);
        return Ok(());
    }

    for (group, value) in sorted_desc(&aggregate) {
        println!("{group:<40} {value:>16.2}");
    }
    for (group, value) in &aggregate {
        if value.is_none() {
            println!("{group:<40} {:>16}", "n/a");
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args(std::env::args()) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
