// ============================================================
// PAIRWISE RELATIONSHIP ANALYZER
// ============================================================
// Pearson correlation and hex binning of two numeric columns

use tracing::debug;

use super::hexbin::{HexBinner, PairPoint};
use super::statistics::pearson;
use crate::domain::error::{AppError, Result};
use crate::domain::table::{
    AnalysisConfig, ColumnId, Dataset, PairMatrix, PairOutcome, PairwiseSummary, Schema,
};

/// Minimum number of numeric pairs for a correlation
const MIN_PAIRS: usize = 2;

pub struct PairwiseAnalyzer {
    config: AnalysisConfig,
}

impl PairwiseAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Relationship between `column_a` and `column_b`.
    ///
    /// Rows where either cell is not numeric are left out of both the
    /// correlation and the bins. Fewer than two remaining pairs is reported
    /// as `InsufficientData`.
    pub fn analyze_pair(
        &self,
        dataset: &Dataset,
        column_a: &str,
        column_b: &str,
    ) -> Result<PairwiseSummary> {
        let (a, b) = resolve_pair(dataset.schema(), column_a, column_b)?;
        let policy = self.config.coercion;

        let points: Vec<PairPoint<'_>> = dataset
            .rows()
            .iter()
            .filter_map(|row| {
                let raw_x = row.get(a);
                let raw_y = row.get(b);
                Some(PairPoint {
                    x: policy.numeric(raw_x)?,
                    y: policy.numeric(raw_y)?,
                    raw_x,
                    raw_y,
                })
            })
            .collect();

        if points.len() < MIN_PAIRS {
            return Err(AppError::InsufficientData {
                required: MIN_PAIRS,
                found: points.len(),
                context: format!("correlation of \"{}\" and \"{}\"", column_a, column_b),
            });
        }

        let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        let correlation = pearson(&xs, &ys);
        let bins = HexBinner::new(self.config.hex_radius).bin(&points);

        debug!(
            column_a = column_a,
            column_b = column_b,
            pairs = points.len(),
            bins = bins.len(),
            correlation = ?correlation,
            "Pair analyzed"
        );

        Ok(PairwiseSummary {
            column_a: column_a.to_string(),
            column_b: column_b.to_string(),
            pair_count: points.len(),
            correlation,
            bins,
        })
    }

    /// Analyze every `i < j` combination of `columns` in caller order.
    ///
    /// A pair without enough data is recorded in the matrix; unknown columns
    /// fail the whole request.
    pub fn analyze_all_pairs<S: AsRef<str>>(
        &self,
        dataset: &Dataset,
        columns: &[S],
    ) -> Result<PairMatrix> {
        let ids = dataset.schema().resolve_all(columns)?;
        let names: Vec<&str> = ids.iter().map(|&id| dataset.schema().name(id)).collect();

        let mut matrix = Vec::new();
        for (i, column_a) in names.iter().enumerate() {
            for column_b in &names[i + 1..] {
                let outcome = match self.analyze_pair(dataset, column_a, column_b) {
                    Ok(summary) => PairOutcome::Analyzed(summary),
                    Err(AppError::InsufficientData { found, .. }) => {
                        PairOutcome::InsufficientData {
                            column_a: column_a.to_string(),
                            column_b: column_b.to_string(),
                            found,
                        }
                    }
                    Err(other) => return Err(other),
                };
                matrix.push(outcome);
            }
        }

        Ok(matrix)
    }
}

impl Default for PairwiseAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

fn resolve_pair(schema: &Schema, column_a: &str, column_b: &str) -> Result<(ColumnId, ColumnId)> {
    schema.resolve_all(&[column_a, column_b])?;

    match (schema.resolve(column_a), schema.resolve(column_b)) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(AppError::UnknownColumn(vec![
            column_a.to_string(),
            column_b.to_string(),
        ])),
    }
}
