use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product attributes whose changes are recorded in the history.
///
/// Full replacement tracks the first five in declaration order; the
/// remaining ones are recorded by their dedicated partial updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackedField {
    Name,
    Description,
    Price,
    Category,
    Stock,
    Discount,
    Featured,
}

impl TrackedField {
    /// Fields compared by a full replacement, in recording order.
    pub const REPLACE_ORDER: [TrackedField; 5] = [
        Self::Name,
        Self::Description,
        Self::Price,
        Self::Category,
        Self::Stock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Price => "price",
            Self::Category => "category",
            Self::Stock => "stock",
            Self::Discount => "discount",
            Self::Featured => "featured",
        }
    }
}

impl fmt::Display for TrackedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value recorded on either side of a history entry.
///
/// Serialized untagged, so JSON carries the raw string, number, or boolean.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistoryValue {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<bool> for HistoryValue {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<u32> for HistoryValue {
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<i64> for HistoryValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for HistoryValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for HistoryValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for HistoryValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl fmt::Display for HistoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// One recorded change of a single product field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub field: TrackedField,
    pub old_value: HistoryValue,
    pub new_value: HistoryValue,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        field: TrackedField,
        old_value: impl Into<HistoryValue>,
        new_value: impl Into<HistoryValue>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            field,
            old_value: old_value.into(),
            new_value: new_value.into(),
            timestamp,
        }
    }
}
