use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use clap::Parser;

/// Column order of the Louisville Metro foreclosures export.
const HEADERS: [&str; 18] = [
    "House_Nr",
    "Dir",
    "Street_Name",
    "St_Type",
    "Post_Dir",
    "Zip",
    "L_S",
    "CD",
    "Neighborhood",
    "Full_Parcel_ID",
    "Census_Tract",
    "Action_Filed",
    "Case_",
    "Case_Style",
    "Sale_Date",
    "Sale_Price",
    "Purchaser",
    "ObjectId",
];

/// (zip, neighborhood, relative weight)
const ZIPS: [(&str, &str, u64); 8] = [
    ("40211", "SHAWNEE", 9),
    ("40212", "PORTLAND", 8),
    ("40210", "CALIFORNIA", 7),
    ("40215", "BEECHMONT", 6),
    ("40216", "SHIVELY", 5),
    ("40214", "IROQUOIS", 4),
    ("40202", "DOWNTOWN", 2),
    ("40205", "HIGHLANDS", 1),
];

const STREETS: [(&str, &str); 8] = [
    ("MAIN", "ST"),
    ("BROADWAY", ""),
    ("DIXIE", "HWY"),
    ("TAYLOR", "BLVD"),
    ("BARDSTOWN", "RD"),
    ("MARKET", "ST"),
    ("PRESTON", "HWY"),
    ("BANK", "ST"),
];

const PURCHASERS: [&str; 6] = [
    "PLAINTIFF",
    "FEDERAL NATIONAL MORTGAGE ASSOCIATION",
    "WELLS FARGO BANK NA",
    "LOUISVILLE METRO GOVERNMENT",
    "RIVER CITY PROPERTIES LLC",
    "BANK OF AMERICA NA",
];

const PLAINTIFFS: [&str; 4] = ["US BANK NA", "WELLS FARGO BANK NA", "MIDFIRST BANK", "LOUISVILLE METRO"];

/// Write a synthetic foreclosures CSV in the export's schema.
#[derive(Debug, Parser)]
#[command(name = "generate_sample", about = "Generate a synthetic foreclosures CSV")]
struct Args {
    /// Number of cases to generate.
    #[arg(long, default_value_t = 5000)]
    rows: usize,

    /// PRNG seed; the same seed always writes the same file.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output path.
    #[arg(long, default_value = "data/Louisville_Metro_KY_-_Property_Foreclosures.csv")]
    out: PathBuf,
}

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

    /// Uniform integer in `0..n`.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }

    fn chance(&mut self, percent: u64) -> bool {
        self.below(100) < percent
    }
}

fn weighted_zip(rng: &mut SimpleRng) -> (&'static str, &'static str) {
    let total: u64 = ZIPS.iter().map(|(_, _, w)| w).sum();
    let mut roll = rng.below(total);
    for (zip, hood, weight) in ZIPS {
        if roll < weight {
            return (zip, hood);
        }
        roll -= weight;
    }
    (ZIPS[0].0, ZIPS[0].1)
}

/// `2020/03/15 00:00:00+00`, the export's timestamp layout.
fn export_date(date: NaiveDate) -> String {
    date.format("%Y/%m/%d 00:00:00+00").to_string()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let first_day = NaiveDate::from_ymd_opt(2010, 1, 1).context("invalid start date")?;
    let span_days = 14 * 365;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    writer.write_record(HEADERS).context("writing CSV header")?;

    let mut sold = 0usize;
    for object_id in 1..=args.rows {
        let (zip, hood) = weighted_zip(&mut rng);
        let (street, st_type) = *rng.pick(&STREETS);
        let filed = first_day + Duration::days(rng.below(span_days) as i64);
        let case_no = format!("{}CI{:06}", filed.format("%y"), rng.below(1_000_000));
        let plaintiff = *rng.pick(&PLAINTIFFS);

        let (sale_date, sale_price, purchaser) = if rng.chance(80) {
            sold += 1;
            let sale = filed + Duration::days(60 + rng.below(400) as i64);
            let price = 5_000 + rng.below(240) * 1_000;
            (export_date(sale), price.to_string(), rng.pick(&PURCHASERS).to_string())
        } else {
            (String::new(), String::new(), String::new())
        };

        let row = [
            (100 + rng.below(9900)).to_string(),
            if rng.chance(15) { "S".to_string() } else { String::new() },
            street.to_string(),
            st_type.to_string(),
            String::new(),
            zip.to_string(),
            format!("{}", 1 + rng.below(3)),
            format!("{}", 1 + rng.below(26)),
            hood.to_string(),
            format!("{:03}F{:04}{:04}", rng.below(200), rng.below(10_000), rng.below(10_000)),
            format!("{}", 1 + rng.below(150)),
            export_date(filed),
            case_no,
            format!("{plaintiff} VS. UNKNOWN HEIRS"),
            sale_date,
            sale_price,
            purchaser,
            object_id.to_string(),
        ];
        writer.write_record(&row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!(
        "Wrote {} foreclosure cases ({sold} sold) to {}",
        args.rows,
        args.out.display()
    );
    Ok(())
}
