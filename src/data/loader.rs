use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{DetailValue, LaunchDataset, LaunchRecord, Outcome};

// ---------------------------------------------------------------------------
// Required columns
// ---------------------------------------------------------------------------

/// Column holding the launch-site identifier.
pub const SITE_COLUMN: &str = "Launch Site";
/// Column holding the payload mass in kilograms.
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
/// Column holding the binary outcome (1 = success, 0 = failure).
pub const OUTCOME_COLUMN: &str = "class";
/// Column holding the booster version category.
pub const BOOSTER_COLUMN: &str = "Booster Version Category";

const REQUIRED_COLUMNS: [&str; 4] = [SITE_COLUMN, PAYLOAD_COLUMN, OUTCOME_COLUMN, BOOSTER_COLUMN];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch-records dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the required columns (primary format)
/// * `.json`    – records-oriented array of objects with the same keys
/// * `.parquet` – flat scalar columns with the same names
///
/// Every other column of the source is kept as a display-only detail
/// column.  A source without all four required columns, with a cell that
/// fails to parse, or without a single record is rejected.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    if dataset.is_empty() {
        bail!("{} contains no launch records", path.display());
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row naming the columns, one launch per row.
fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let columns = required_indices(&headers)?;
    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let site = row.get(columns.site).unwrap_or("").to_string();
        let payload_mass = parse_payload(row.get(columns.payload).unwrap_or(""), row_no)?;
        let outcome = parse_outcome(row.get(columns.outcome).unwrap_or(""), row_no)?;
        let booster_category = row.get(columns.booster).unwrap_or("").to_string();

        let mut details = BTreeMap::new();
        for (col_idx, value) in row.iter().enumerate() {
            if columns.covers(col_idx) {
                continue;
            }
            details.insert(headers[col_idx].clone(), guess_detail_value(value));
        }

        records.push(LaunchRecord {
            site,
            payload_mass,
            outcome,
            booster_category,
            details,
        });
    }

    Ok(LaunchDataset::from_records(records))
}

struct ColumnIndices {
    site: usize,
    payload: usize,
    outcome: usize,
    booster: usize,
}

impl ColumnIndices {
    fn covers(&self, idx: usize) -> bool {
        idx == self.site || idx == self.payload || idx == self.outcome || idx == self.booster
    }
}

fn required_indices(headers: &[String]) -> Result<ColumnIndices> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .with_context(|| format!("source is missing the '{name}' column"))
    };
    Ok(ColumnIndices {
        site: find(SITE_COLUMN)?,
        payload: find(PAYLOAD_COLUMN)?,
        outcome: find(OUTCOME_COLUMN)?,
        booster: find(BOOSTER_COLUMN)?,
    })
}

fn parse_payload(cell: &str, row: usize) -> Result<f64> {
    cell.trim()
        .parse::<f64>()
        .with_context(|| format!("Row {row}: '{cell}' is not a valid payload mass"))
}

fn parse_outcome(cell: &str, row: usize) -> Result<Outcome> {
    let trimmed = cell.trim();
    let class = trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(exact_i64))
        .with_context(|| format!("Row {row}: '{cell}' is not a valid outcome"))?;
    Outcome::from_class(class).with_context(|| format!("Row {row}"))
}

/// Accept integral floats (`1.0`) the way number-typed exports write them.
fn exact_i64(v: f64) -> Option<i64> {
    (v.fract() == 0.0 && v.abs() <= i64::MAX as f64).then(|| v as i64)
}

/// Infer a display value for an optional column cell.
fn guess_detail_value(s: &str) -> DetailValue {
    if s.is_empty() {
        return DetailValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return DetailValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return DetailValue::Float(f);
    }
    if s == "true" || s == "false" {
        return DetailValue::Bool(s == "true");
    }
    if is_iso_date(s) {
        return DetailValue::Date(s.to_string());
    }
    DetailValue::String(s.to_string())
}

/// `YYYY-MM-DD`, the shape launch dates take in the source exports.
fn is_iso_date(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 2296.0,
///     "class": 1,
///     "Booster Version Category": "FT",
///     "Flight Number": 23
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let site = json_string(obj, SITE_COLUMN, i)?;
        let payload_mass = obj
            .get(PAYLOAD_COLUMN)
            .and_then(JsonValue::as_f64)
            .with_context(|| format!("Row {i}: missing or invalid '{PAYLOAD_COLUMN}'"))?;
        let outcome = json_outcome(obj, i)?;
        let booster_category = json_string(obj, BOOSTER_COLUMN, i)?;

        let mut details = BTreeMap::new();
        for (key, val) in obj {
            if REQUIRED_COLUMNS.contains(&key.as_str()) {
                continue;
            }
            details.insert(key.clone(), json_to_detail(val));
        }

        records.push(LaunchRecord {
            site,
            payload_mass,
            outcome,
            booster_category,
            details,
        });
    }

    Ok(LaunchDataset::from_records(records))
}

fn json_string(
    obj: &serde_json::Map<String, JsonValue>,
    column: &str,
    row: usize,
) -> Result<String> {
    obj.get(column)
        .and_then(JsonValue::as_str)
        .map(str::to_string)
        .with_context(|| format!("Row {row}: missing or invalid '{column}'"))
}

fn json_outcome(obj: &serde_json::Map<String, JsonValue>, row: usize) -> Result<Outcome> {
    let value = obj
        .get(OUTCOME_COLUMN)
        .with_context(|| format!("Row {row}: missing '{OUTCOME_COLUMN}'"))?;
    let class = value
        .as_i64()
        .or_else(|| value.as_f64().and_then(exact_i64))
        .with_context(|| format!("Row {row}: '{OUTCOME_COLUMN}' is not a number"))?;
    Outcome::from_class(class).with_context(|| format!("Row {row}"))
}

fn json_to_detail(val: &JsonValue) -> DetailValue {
    match val {
        JsonValue::String(s) if is_iso_date(s) => DetailValue::Date(s.clone()),
        JsonValue::String(s) => DetailValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                DetailValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                DetailValue::Float(f)
            } else {
                DetailValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => DetailValue::Bool(*b),
        JsonValue::Null => DetailValue::Null,
        other => DetailValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Expected schema: flat scalar columns — `Launch Site` (Utf8),
/// `Payload Mass (kg)` (Float64 or integer), `class` (integer or integral
/// Float64), `Booster Version Category` (Utf8).  Any other column is kept
/// as a detail column.  Works with files written by both **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let index_of = |name: &str| {
            schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
        };
        let site_idx = index_of(SITE_COLUMN)?;
        let payload_idx = index_of(PAYLOAD_COLUMN)?;
        let outcome_idx = index_of(OUTCOME_COLUMN)?;
        let booster_idx = index_of(BOOSTER_COLUMN)?;

        // Collect detail column indices (everything except the required four)
        let detail_cols: Vec<(usize, String)> = schema
            .fields()
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                *i != site_idx && *i != payload_idx && *i != outcome_idx && *i != booster_idx
            })
            .map(|(i, f)| (i, f.name().clone()))
            .collect();

        for row in 0..batch.num_rows() {
            let site = string_cell(batch.column(site_idx), row)
                .with_context(|| format!("Row {row}: failed to read '{SITE_COLUMN}'"))?;
            let payload_mass = f64_cell(batch.column(payload_idx), row)
                .with_context(|| format!("Row {row}: failed to read '{PAYLOAD_COLUMN}'"))?;
            let class = i64_cell(batch.column(outcome_idx), row)
                .with_context(|| format!("Row {row}: failed to read '{OUTCOME_COLUMN}'"))?;
            let outcome = Outcome::from_class(class).with_context(|| format!("Row {row}"))?;
            let booster_category = string_cell(batch.column(booster_idx), row)
                .with_context(|| format!("Row {row}: failed to read '{BOOSTER_COLUMN}'"))?;

            let mut details = BTreeMap::new();
            for (col_idx, col_name) in &detail_cols {
                details.insert(col_name.clone(), detail_cell(batch.column(*col_idx), row));
            }

            records.push(LaunchRecord {
                site,
                payload_mass,
                outcome,
                booster_category,
                details,
            });
        }
    }

    Ok(LaunchDataset::from_records(records))
}

// -- Parquet / Arrow helpers --

fn string_cell(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            Ok(arr.value(row).to_string())
        }
        other => bail!("expected a string column, got {other:?}"),
    }
}

fn f64_cell(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Float64 => Ok(col
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row)),
        DataType::Float32 => Ok(f64::from(
            col.as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?
                .value(row),
        )),
        DataType::Int64 => Ok(col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row) as f64),
        DataType::Int32 => Ok(f64::from(
            col.as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?
                .value(row),
        )),
        other => bail!("expected a numeric column, got {other:?}"),
    }
}

fn i64_cell(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null value");
    }
    match col.data_type() {
        DataType::Int64 => Ok(col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row)),
        DataType::Int32 => Ok(i64::from(
            col.as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?
                .value(row),
        )),
        DataType::Float64 => {
            let v = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?
                .value(row);
            exact_i64(v).with_context(|| format!("{v} is not an integral value"))
        }
        other => bail!("expected an integer column, got {other:?}"),
    }
}

/// Extract a single detail value from an Arrow column at a given row.
fn detail_cell(col: &Arc<dyn Array>, row: usize) -> DetailValue {
    if col.is_null(row) {
        return DetailValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 => {
            let text = if let Some(s) = col.as_any().downcast_ref::<StringArray>() {
                s.value(row).to_string()
            } else {
                // LargeStringArray
                col.as_string::<i64>().value(row).to_string()
            };
            if is_iso_date(&text) {
                DetailValue::Date(text)
            } else {
                DetailValue::String(text)
            }
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            DetailValue::Integer(i64::from(arr.value(row)))
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            DetailValue::Integer(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            DetailValue::Float(f64::from(arr.value(row)))
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            DetailValue::Float(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>().unwrap();
            DetailValue::Bool(arr.value(row))
        }
        _ => DetailValue::String(format!("{:?}", col.data_type())),
    }
}
