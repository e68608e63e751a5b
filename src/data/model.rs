use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// DetailValue – a single cell from an optional descriptive column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell from one of the optional descriptive columns
/// (flight number, booster version, …). Carried through for display only;
/// nothing is ever computed from these.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text for simplicity.
    Date(String),
    Null,
}

impl fmt::Display for DetailValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailValue::String(s) => write!(f, "{s}"),
            DetailValue::Integer(i) => write!(f, "{i}"),
            DetailValue::Float(v) => write!(f, "{v}"),
            DetailValue::Bool(b) => write!(f, "{b}"),
            DetailValue::Date(d) => write!(f, "{d}"),
            DetailValue::Null => write!(f, "–"),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome – the binary launch result
// ---------------------------------------------------------------------------

/// The outcome column held something other than 0 or 1.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("launch outcome must be 0 or 1, got {0}")]
pub struct InvalidOutcome(pub i64);

/// Binary launch result, the `class` column of the source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Parse the numeric `class` cell: 1 = success, 0 = failure.
    pub fn from_class(class: i64) -> Result<Self, InvalidOutcome> {
        match class {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(InvalidOutcome(other)),
        }
    }

    /// Numeric encoding used on the scatter y-axis.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch attempt (one row of the source table).
#[derive(Debug, Clone)]
pub struct LaunchRecord {
    /// Launch site identifier, e.g. `CCAFS LC-40`.
    pub site: String,
    /// Payload mass in kilograms.
    pub payload_mass: f64,
    /// Binary mission outcome.
    pub outcome: Outcome,
    /// Booster version category, the scatter color encoding.
    pub booster_category: String,
    /// Remaining descriptive columns: column name → value.
    pub details: BTreeMap<String, DetailValue>,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full record table plus the derived summaries that seed the controls.
/// Immutable after load.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launch records (rows).
    pub records: Vec<LaunchRecord>,
    /// Sorted distinct launch sites.
    pub sites: Vec<String>,
    /// Sorted distinct booster version categories.
    pub booster_categories: Vec<String>,
    /// Sorted distinct names of the optional detail columns.
    pub detail_columns: Vec<String>,
    /// Smallest payload mass in the dataset (kg).
    pub payload_min: f64,
    /// Largest payload mass in the dataset (kg).
    pub payload_max: f64,
}

impl LaunchDataset {
    /// Build the derived summaries from the loaded records.
    ///
    /// The payload bounds are only meaningful for a non-empty record set;
    /// the loaders reject empty sources before constructing a dataset.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites = BTreeSet::new();
        let mut booster_categories = BTreeSet::new();
        let mut detail_columns = BTreeSet::new();
        let mut payload_min = f64::INFINITY;
        let mut payload_max = f64::NEG_INFINITY;

        for rec in &records {
            sites.insert(rec.site.clone());
            booster_categories.insert(rec.booster_category.clone());
            for col in rec.details.keys() {
                detail_columns.insert(col.clone());
            }
            payload_min = payload_min.min(rec.payload_mass);
            payload_max = payload_max.max(rec.payload_mass);
        }

        LaunchDataset {
            records,
            sites: sites.into_iter().collect(),
            booster_categories: booster_categories.into_iter().collect(),
            detail_columns: detail_columns.into_iter().collect(),
            payload_min,
            payload_max,
        }
    }

    /// Number of launch records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
