// ============================================================
// COLUMN VALUE
// ============================================================
// Classification of raw cells into Numeric / Text / Missing.
// Every consumer goes through `coerce` so the classification
// never diverges between charts.

use serde::{Deserialize, Serialize};

/// A raw cell after classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnValue {
    Numeric(f64),
    Text(String),
    Missing,
}

impl ColumnValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ColumnValue::Numeric(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ColumnValue::Missing)
    }
}

/// Whitespace handling applied before a cell is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionPolicy {
    /// Cells are classified exactly as they appear in the source
    #[default]
    Exact,
    /// Leading and trailing whitespace is stripped first
    Trim,
}

impl CoercionPolicy {
    /// The view of `raw` that classification and emptiness checks see
    pub fn normalize<'a>(&self, raw: &'a str) -> &'a str {
        match self {
            CoercionPolicy::Exact => raw,
            CoercionPolicy::Trim => raw.trim(),
        }
    }

    pub fn coerce(&self, raw: &str) -> ColumnValue {
        coerce(self.normalize(raw))
    }

    /// Shortcut for consumers that only care about numbers
    pub fn numeric(&self, raw: &str) -> Option<f64> {
        self.coerce(raw).as_number()
    }

    pub fn is_missing(&self, raw: &str) -> bool {
        self.normalize(raw).is_empty()
    }
}

/// Classify a raw cell.
///
/// Empty input and parses that yield NaN or infinity are `Missing`; any other
/// successful decimal float parse is `Numeric`; everything else is `Text`.
pub fn coerce(raw: &str) -> ColumnValue {
    if raw.is_empty() {
        return ColumnValue::Missing;
    }

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => ColumnValue::Numeric(value),
        Ok(_) => ColumnValue::Missing,
        Err(_) => ColumnValue::Text(raw.to_string()),
    }
}
