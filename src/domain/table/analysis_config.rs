// ============================================================
// ANALYSIS CONFIGURATION
// ============================================================
// Tunable constants for loading, summarizing and binning

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::CoercionPolicy;
use crate::domain::error::{AppError, Result};

/// Field delimiter used by the tabular loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Tab,
    Pipe,
    /// Sniff the delimiter from the first lines of the source
    Auto,
}

impl Delimiter {
    /// The delimiter byte, or `None` when it must be detected
    pub fn byte(&self) -> Option<u8> {
        match self {
            Delimiter::Comma => Some(b','),
            Delimiter::Semicolon => Some(b';'),
            Delimiter::Tab => Some(b'\t'),
            Delimiter::Pipe => Some(b'|'),
            Delimiter::Auto => None,
        }
    }
}

/// Configuration for one analysis session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of equal-width histogram bins (default: 20)
    #[validate(range(min = 1, max = 1000))]
    pub histogram_bins: usize,

    /// Hexagon radius for pairwise binning, in data units (default: 10)
    #[validate(range(exclusive_min = 0.0))]
    pub hex_radius: f64,

    /// Multiplier applied to the IQR when fencing outliers (default: 1.5)
    #[validate(range(exclusive_min = 0.0))]
    pub iqr_multiplier: f64,

    /// Numeric values required before outliers are computed (default: 4)
    #[validate(range(min = 4))]
    pub min_outlier_values: usize,

    /// Whitespace policy applied before coercion
    pub coercion: CoercionPolicy,

    pub delimiter: Delimiter,

    #[validate(length(min = 1))]
    pub latitude_column: String,

    #[validate(length(min = 1))]
    pub longitude_column: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            histogram_bins: 20,
            hex_radius: 10.0,
            iqr_multiplier: 1.5,
            min_outlier_values: 4,
            coercion: CoercionPolicy::Exact,
            delimiter: Delimiter::Comma,
            latitude_column: "Latitude".to_string(),
            longitude_column: "Longitude".to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field ranges plus the checks that span more than one field
    pub fn ensure_valid(&self) -> Result<()> {
        Validate::validate(self)?;

        if self.latitude_column == self.longitude_column {
            return Err(AppError::ValidationError(
                "latitude_column and longitude_column must differ".to_string(),
            ));
        }
        Ok(())
    }
}
