use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

/// Keys tried in order when resolving the funded percentage.
pub const PERCENTAGE_KEYS: [&str; 2] = ["percentage_funded", "percentage.funded"];
/// Keys tried in order when resolving the pledged amount.
pub const PLEDGED_KEYS: [&str; 2] = ["amt_pledged", "amt.pledged"];

/// An unvalidated project entry as delivered by the data provider.
pub type RawRecord = Value;

/// A normalized project row. Both values are finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Record {
    percentage_funded: f64,
    amount_pledged: f64,
}

impl Record {
    /// Builds a record, replacing non-finite or negative inputs with 0.
    pub fn new(percentage_funded: f64, amount_pledged: f64) -> Self {
        Self {
            percentage_funded: usable(percentage_funded).unwrap_or(0.0),
            amount_pledged: usable(amount_pledged).unwrap_or(0.0),
        }
    }

    pub fn percentage_funded(&self) -> f64 {
        self.percentage_funded
    }

    pub fn amount_pledged(&self) -> f64 {
        self.amount_pledged
    }
}

/// Ordered, immutable set of records from one successful load.
///
/// Cloning shares the underlying slice; a refresh installs a new `Dataset`
/// instead of mutating the old one.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset(Arc<[Record]>);

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self(Arc::from(records))
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.0
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("no projects data received")]
    EmptyDataset,
}

/// Maps raw provider entries onto [`Record`]s, preserving order.
///
/// Each field takes the first usable value along its key chain and falls back
/// to 0. A literal 0 is not usable, so it is indistinguishable from a missing
/// key; entries that are not JSON objects become all-zero records.
pub fn normalize(raw: &[RawRecord]) -> Result<Dataset, NormalizeError> {
    if raw.is_empty() {
        return Err(NormalizeError::EmptyDataset);
    }
    let records = raw.iter().map(normalize_one).collect::<Vec<_>>();
    Ok(Dataset::new(records))
}

fn normalize_one(raw: &RawRecord) -> Record {
    Record {
        percentage_funded: first_usable(raw, &PERCENTAGE_KEYS),
        amount_pledged: first_usable(raw, &PLEDGED_KEYS),
    }
}

fn first_usable(raw: &RawRecord, keys: &[&str]) -> f64 {
    keys.iter()
        .filter_map(|key| raw.get(*key))
        .find_map(coerce)
        .unwrap_or(0.0)
}

fn coerce(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    usable(number)
}

fn usable(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}
