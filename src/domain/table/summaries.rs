// ============================================================
// SUMMARY TYPES
// ============================================================
// Read-only results handed to the chart sink

use serde::{Deserialize, Serialize};

/// Occurrences of one exact raw value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
}

/// One equal-width histogram bin. Closed-open, except the last bin which
/// also includes its upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub count: usize,
}

/// Quartiles and the IQR fence derived from them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
}

impl Quartiles {
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_fence || value > self.upper_fence
    }
}

/// Statistics of a single feature (column)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub feature: String,
    pub row_count: usize,
    pub missing_count: usize,
    pub filled_count: usize,
    /// Sorted by descending count, ties by value
    pub frequency_table: Vec<FrequencyEntry>,
    pub histogram: Vec<HistogramBin>,
    /// Outlying numeric values in input order
    pub outliers: Vec<f64>,
    pub quartiles: Option<Quartiles>,
}

impl FeatureSummary {
    pub fn frequency_of(&self, value: &str) -> usize {
        self.frequency_table
            .iter()
            .find(|entry| entry.value == value)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }

    pub fn histogram_total(&self) -> usize {
        self.histogram.iter().map(|bin| bin.count).sum()
    }
}

/// A hexagonal cell of the pairwise lattice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HexBin {
    pub center_x: f64,
    pub center_y: f64,
    pub count: usize,
    /// Contributing raw pairs, for tooltips
    pub points: Vec<(String, String)>,
}

/// Relationship between two numeric columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseSummary {
    pub column_a: String,
    pub column_b: String,
    pub pair_count: usize,
    /// `None` when either column has zero variance
    pub correlation: Option<f64>,
    pub bins: Vec<HexBin>,
}

/// Result for one combination of a multi-column request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairOutcome {
    Analyzed(PairwiseSummary),
    InsufficientData {
        column_a: String,
        column_b: String,
        found: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Per-category row count and, when requested, the mean of a target column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAggregate {
    pub category: String,
    pub count: usize,
    pub mean: Option<f64>,
}

/// Every `i < j` combination of a multi-column request, in caller order
pub type PairMatrix = Vec<PairOutcome>;
