use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use contaminant_explorer::data::model::Column;

const CONTAMINANTS: [&str; 10] = [
    "Aflatoxin",
    "Arsenic",
    "Cadmium",
    "Deoxynivalenol",
    "Histamine",
    "Lead",
    "Mercury",
    "Patulin",
    "Polychlorinated Biphenyls",
    "Radionuclides",
];

const COMMODITIES: [&str; 12] = [
    "Apple Juice",
    "Brazil Nuts",
    "Candy",
    "Ceramicware",
    "Corn",
    "Finished Wheat Products",
    "Fish",
    "Infant Rice Cereal",
    "Milk",
    "Peanuts",
    "Rice",
    "Tuna",
];

const DEFAULT_OUTPUT: &str = "sample-contaminant-levels.csv";

const LEVEL_TYPES: [&str; 3] = ["Action Level", "Guidance Level", "Tolerance"];

const UNITS: [&str; 4] = ["ppm", "ppb", "mg/kg", "ug/kg"];

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn level(&mut self) -> f64 {
        let hundredths = self.next_u64() % 5000 + 1;
        hundredths as f64 / 100.0
    }
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let path = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string()));
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid row count {n:?}"))?,
        None => 250,
    };

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    write_sample(file, rows)?;

    println!("Wrote {rows} records to {}", path.display());
    Ok(())
}

/// Write the header and `rows` records; the same `rows` always yields the
/// same bytes.
fn write_sample<W: Write>(out: W, rows: usize) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(Column::ALL.map(Column::header))?;

    let mut rng = SimpleRng::new(42);
    for i in 0..rows {
        let contaminant = rng.pick(&CONTAMINANTS);
        let commodity = rng.pick(&COMMODITIES);
        let level_type = rng.pick(&LEVEL_TYPES);
        let level = format!("{} {}", rng.level(), rng.pick(&UNITS));
        let reference = format!("CPG Sec. {}.{}", 500 + i % 90, 100 + (i * 7) % 400);
        let link = format!(
            "https://www.fda.gov/regulatory-information/search-fda-guidance-documents/cpg-{}",
            500 + i % 90
        );
        writer.write_record([
            contaminant,
            commodity,
            level_type,
            level.as_str(),
            reference.as_str(),
            link.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contaminant_explorer::data::filter::numeric_level;
    use contaminant_explorer::data::loader::parse_csv;

    fn sample(rows: usize) -> String {
        let mut buf = Vec::new();
        write_sample(&mut buf, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn output_parses_with_the_fixed_header() {
        let dataset = parse_csv(&sample(40)).unwrap();
        let headers: Vec<&str> = Column::ALL.iter().map(|c| c.header()).collect();
        assert_eq!(dataset.columns, headers);
        assert_eq!(dataset.len(), 40);
        for record in &dataset.records {
            assert!(CONTAMINANTS.contains(&record.get(Column::Contaminant)));
            assert!(COMMODITIES.contains(&record.get(Column::Commodity)));
            assert!(numeric_level(record.get(Column::Level)).is_some());
            assert!(record.get(Column::Link).starts_with("https://"));
        }
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(sample(25), sample(25));
        assert!(sample(25).starts_with(&sample(10)));
    }

    #[test]
    fn zero_rows_is_header_only() {
        let dataset = parse_csv(&sample(0)).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.columns.len(), 6);
    }
}
