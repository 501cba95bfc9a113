//! Writes a synthetic `TB_Burden_Country.sample.csv` so the CLI and tests
//! have a fixture without shipping the real WHO extract. Deterministic for
//! a fixed seed.

use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// (region, country, ISO3, base population, base incidence per 100k)
const COUNTRIES: &[(&str, &str, &str, f64, f64)] = &[
    ("AFR", "Angola", "AGO", 12_000_000.0, 320.0),
    ("AFR", "Nigeria", "NGA", 120_000_000.0, 290.0),
    ("AFR", "South Africa", "ZAF", 45_000_000.0, 520.0),
    ("AMR", "Brazil", "BRA", 170_000_000.0, 60.0),
    ("AMR", "Peru", "PER", 26_000_000.0, 150.0),
    ("EMR", "Egypt", "EGY", 70_000_000.0, 25.0),
    ("EMR", "Pakistan", "PAK", 140_000_000.0, 230.0),
    ("EUR", "France", "FRA", 58_000_000.0, 12.0),
    ("EUR", "Romania", "ROU", 22_000_000.0, 110.0),
    ("SEA", "India", "IND", 1_000_000_000.0, 210.0),
    ("SEA", "Indonesia", "IDN", 210_000_000.0, 280.0),
    ("WPR", "Viet Nam", "VNM", 78_000_000.0, 190.0),
    ("WPR", "Philippines", "PHL", 76_000_000.0, 310.0),
];

const YEARS: std::ops::RangeInclusive<i32> = 1990..=2013;

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.1}")).unwrap_or_default()
}

/// Write the full synthetic table to `out`. Byte-identical output for the
/// same seed. Returns the number of data rows written.
fn write_sample<W: std::io::Write>(out: W, seed: u64) -> Result<u32> {
    let mut rng = SimpleRng::new(seed);
    let mut writer = csv::Writer::from_writer(out);

    writer.write_record([
        "Country or territory name",
        "ISO 3-character country/territory code",
        "Region",
        "Year",
        "Estimated total population number",
        "Estimated incidence (all forms) per 100 000 population",
        "Estimated number of incident cases (all forms)",
        "Estimated prevalence of TB (all forms) per 100 000 population",
        "Estimated mortality of TB cases (all forms, excluding HIV) per 100 000 population",
        "Estimated number of deaths from TB (all forms, excluding HIV)",
        "Case detection rate (all forms), percent",
        "Estimated incidence of TB cases who are HIV-positive",
        "Estimated mortality of TB cases who are HIV-positive, per 100 000 population",
        "Estimated mortality of TB cases who are HIV-positive, per 100 000 population, low bound",
        "Estimated mortality of TB cases who are HIV-positive, per 100 000 population, high bound",
    ])?;

    let mut rows = 0u32;
    for &(region, country, iso3, base_pop, base_incidence) in COUNTRIES {
        for year in YEARS {
            let t = (year - 1990) as f64;

            // Population grows ~1.5%/yr; incidence drifts slowly downward.
            let population = base_pop * (1.0 + 0.015 * t) * (1.0 + rng.gauss(0.0, 0.005));
            let incidence =
                (base_incidence * (1.0 - 0.008 * t) * (1.0 + rng.gauss(0.0, 0.05))).max(1.0);
            let prevalence = incidence * (1.8 + rng.gauss(0.0, 0.1));
            let mortality = incidence * (0.15 + rng.gauss(0.0, 0.02)).max(0.01);
            let incident_cases = incidence * population / 100_000.0;
            let deaths = mortality * population / 100_000.0;
            let detection = (40.0 + 2.0 * t + rng.gauss(0.0, 4.0)).clamp(10.0, 99.0);
            let hiv_incidence = incident_cases * (0.08 + rng.gauss(0.0, 0.02)).max(0.0);
            let hiv_mortality = mortality * (0.2 + rng.gauss(0.0, 0.03)).max(0.0);
            let spread = hiv_mortality * 0.3;

            // Roughly one cell in twenty-five is missing, like the real file.
            let mut cell = |v: f64| -> Option<f64> {
                if rng.next_f64() < 0.04 {
                    None
                } else {
                    Some(v)
                }
            };

            let record = [
                country.to_string(),
                iso3.to_string(),
                region.to_string(),
                year.to_string(),
                fmt_opt(Some(population.round())),
                fmt_opt(cell(incidence)),
                fmt_opt(cell(incident_cases.round())),
                fmt_opt(cell(prevalence)),
                fmt_opt(cell(mortality)),
                fmt_opt(cell(deaths.round())),
                fmt_opt(cell(detection)),
                fmt_opt(cell(hiv_incidence.round())),
                fmt_opt(cell(hiv_mortality)),
                fmt_opt(cell((hiv_mortality - spread).max(0.0))),
                fmt_opt(cell(hiv_mortality + spread)),
            ];
            writer.write_record(&record)?;
            rows += 1;
        }
    }

    writer.flush().context("flushing CSV")?;
    Ok(rows)
}

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "TB_Burden_Country.sample.csv".to_string());

    let file = std::fs::File::create(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    let rows = write_sample(file, 42)?;

    println!(
        "Wrote {rows} rows ({} countries × {} years) to {output_path}",
        COUNTRIES.len(),
        YEARS.count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_deterministic_for_a_fixed_seed() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        let rows = write_sample(&mut first, 42).unwrap();
        write_sample(&mut second, 42).unwrap();

        assert_eq!(rows as usize, COUNTRIES.len() * YEARS.count());
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn different_seeds_produce_different_tables() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        write_sample(&mut a, 42).unwrap();
        write_sample(&mut b, 43).unwrap();
        assert_ne!(a, b);
    }
}
