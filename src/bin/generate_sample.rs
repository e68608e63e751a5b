//! Writes a deterministic synthetic launch-records dataset shaped like the
//! real source file, so the dashboard can be tried without it.
//!
//! Usage: `cargo run --bin generate_sample [output-path]`
//! The output format follows the extension: `.csv` (default) or `.parquet`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"];

/// Booster categories in rough chronological order of introduction.
const BOOSTER_CATEGORIES: [&str; 5] = ["v1.0", "v1.1", "FT", "B4", "B5"];

const FLIGHTS: u32 = 56;
const SEED: u64 = 42;

#[derive(Serialize)]
struct SampleRow {
    #[serde(rename = "Flight Number")]
    flight_number: u32,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass: f64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

fn main() -> Result<()> {
    let path: PathBuf = std::env::args()
        .nth(1)
        .map(Into::into)
        .unwrap_or_else(|| PathBuf::from("spacex_launch_dash.csv"));

    let rows = generate_rows(FLIGHTS, SEED);

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "parquet" | "pq" => write_parquet(&path, &rows)?,
        _ => write_csv(&path, &rows)?,
    }

    println!("Wrote {} launches to {}", rows.len(), path.display());
    Ok(())
}

/// Deterministic synthetic launches: payload masses spread over the real
/// dataset's range, booster categories advancing with flight number, and a
/// success probability that improves over the campaign.
fn generate_rows(flights: u32, seed: u64) -> Vec<SampleRow> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(flights as usize);

    let mut year = 2010u32;
    let mut month = 6u32;

    for flight in 1..=flights {
        let progress = f64::from(flight - 1) / f64::from(flights.max(2) - 1);

        let site = SITES[rng.gen_range(0..SITES.len())];
        let category_idx = ((progress * BOOSTER_CATEGORIES.len() as f64) as usize)
            .min(BOOSTER_CATEGORIES.len() - 1);
        let payload_mass = (rng.gen_range(0.0..9600.0_f64)).round();
        let success = rng.gen_bool(0.4 + 0.5 * progress);

        let day = rng.gen_range(1..=28);
        rows.push(SampleRow {
            flight_number: flight,
            date: format!("{year:04}-{month:02}-{day:02}"),
            launch_site: site.to_string(),
            class: i64::from(success),
            payload_mass,
            booster_category: BOOSTER_CATEGORIES[category_idx].to_string(),
        });

        month += rng.gen_range(1..=3);
        while month > 12 {
            month -= 12;
            year += 1;
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[SampleRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::UInt32, false),
        Field::new("Date", DataType::Utf8, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(UInt32Array::from_iter_values(
                rows.iter().map(|r| r.flight_number),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.date.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.launch_site.as_str()),
            )),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(
                rows.iter().map(|r| r.payload_mass),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_category.as_str()),
            )),
        ],
    )
    .context("assembling parquet batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("opening parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}
