// ============================================================
// FEATURE SUMMARIZER
// ============================================================
// Missing/filled counts, frequency table, histogram and outliers
// for a single feature

use std::collections::HashMap;

use tracing::debug;

use super::column_projector::project_column;
use super::statistics::{quartiles, sorted};
use crate::domain::error::Result;
use crate::domain::table::{
    AnalysisConfig, Dataset, FeatureSummary, FrequencyEntry, HistogramBin, Quartiles,
};

/// Per-feature statistics. Never fails on small inputs; degenerate inputs
/// produce empty histograms and outlier sets.
pub struct FeatureSummarizer {
    config: AnalysisConfig,
}

impl FeatureSummarizer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Summarize raw cell values of one feature
    pub fn summarize<S: AsRef<str>>(&self, values: &[S], feature: &str) -> FeatureSummary {
        self.summarize_cells(values.iter().map(|v| Some(v.as_ref())), feature)
    }

    /// Like `summarize`, but absent cells (`None`) are accepted and counted
    /// as missing
    pub fn summarize_cells<'a, I>(&self, cells: I, feature: &str) -> FeatureSummary
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let policy = self.config.coercion;

        let mut row_count = 0usize;
        let mut missing_count = 0usize;
        let mut frequencies: HashMap<&str, usize> = HashMap::new();
        let mut numeric = Vec::new();

        for cell in cells {
            row_count += 1;
            let raw = cell.unwrap_or("");

            // Missing cells share the "" entry whatever their raw text
            let key = if policy.is_missing(raw) {
                missing_count += 1;
                ""
            } else {
                raw
            };
            *frequencies.entry(key).or_insert(0) += 1;

            if let Some(value) = policy.numeric(raw) {
                numeric.push(value);
            }
        }

        let histogram = self.histogram(&numeric);
        let (quartiles, outliers) = self.outliers(&numeric);

        debug!(
            feature = feature,
            rows = row_count,
            missing = missing_count,
            distinct = frequencies.len(),
            numeric = numeric.len(),
            outliers = outliers.len(),
            "Feature summarized"
        );

        FeatureSummary {
            feature: feature.to_string(),
            row_count,
            missing_count,
            filled_count: row_count - missing_count,
            frequency_table: Self::frequency_table(frequencies),
            histogram,
            outliers,
            quartiles,
        }
    }

    /// Look up `column` and summarize its values
    pub fn summarize_column(&self, dataset: &Dataset, column: &str) -> Result<FeatureSummary> {
        let values = project_column(dataset, column)?;
        Ok(self.summarize(&values, column))
    }

    fn frequency_table(frequencies: HashMap<&str, usize>) -> Vec<FrequencyEntry> {
        let mut table: Vec<FrequencyEntry> = frequencies
            .into_iter()
            .map(|(value, count)| FrequencyEntry {
                value: value.to_string(),
                count,
            })
            .collect();

        table.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
        table
    }

    /// Equal-width bins over `[min, max]`; the maximum lands in the last bin
    fn histogram(&self, values: &[f64]) -> Vec<HistogramBin> {
        let (min, max) = match min_max(values) {
            Some(bounds) => bounds,
            None => return Vec::new(),
        };

        if min == max {
            return vec![HistogramBin {
                lower_bound: min,
                upper_bound: max,
                count: values.len(),
            }];
        }

        let bin_count = self.config.histogram_bins.max(1);
        let edge = |i: usize| {
            let t = i as f64 / bin_count as f64;
            min * (1.0 - t) + max * t
        };

        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                lower_bound: edge(i),
                upper_bound: if i + 1 == bin_count { max } else { edge(i + 1) },
                count: 0,
            })
            .collect();

        // Halved so that max - min stays finite for extreme ranges
        let half_span = max / 2.0 - min / 2.0;
        for &value in values {
            let position = (value / 2.0 - min / 2.0) / half_span;
            let index = ((position * bin_count as f64).floor() as usize).min(bin_count - 1);
            bins[index].count += 1;
        }

        bins
    }

    /// IQR fencing; below `min_outlier_values` no fence is computed
    fn outliers(&self, values: &[f64]) -> (Option<Quartiles>, Vec<f64>) {
        if values.len() < self.config.min_outlier_values {
            return (None, Vec::new());
        }

        let quartiles = match quartiles(&sorted(values), self.config.iqr_multiplier) {
            Some(q) => q,
            None => return (None, Vec::new()),
        };

        let outliers = values
            .iter()
            .copied()
            .filter(|&v| quartiles.is_outlier(v))
            .collect();

        (Some(quartiles), outliers)
    }
}

impl Default for FeatureSummarizer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use crate::domain::table::CoercionPolicy;

    #[test]
    fn test_missing_and_frequency() {
        let summary = FeatureSummarizer::default().summarize(&["", "", "a", "b"], "Weather");

        assert_eq!(summary.missing_count, 2);
        assert_eq!(summary.filled_count, 2);
        assert_eq!(summary.frequency_table.len(), 3);
        assert_eq!(summary.frequency_of(""), 2);
        assert_eq!(summary.frequency_of("a"), 1);
        assert_eq!(summary.frequency_of("b"), 1);
        assert_eq!(summary.frequency_table[0].value, "");
    }

    #[test]
    fn test_absent_cells_count_as_missing() {
        let cells = vec![Some("1"), None, Some("")];
        let summary = FeatureSummarizer::default().summarize_cells(cells, "x");

        assert_eq!(summary.row_count, 3);
        assert_eq!(summary.missing_count, 2);
        assert_eq!(summary.frequency_of(""), 2);
    }

    #[test]
    fn test_empty_input() {
        let values: Vec<String> = Vec::new();
        let summary = FeatureSummarizer::default().summarize(&values, "x");

        assert_eq!(summary.row_count, 0);
        assert_eq!(summary.missing_count, 0);
        assert_eq!(summary.filled_count, 0);
        assert!(summary.frequency_table.is_empty());
        assert!(summary.histogram.is_empty());
        assert!(summary.outliers.is_empty());
        assert!(summary.quartiles.is_none());
    }

    #[test]
    fn test_histogram_counts_only_numeric_values() {
        let summary =
            FeatureSummarizer::default().summarize(&["0", "5", "10", "n/a", "", "2.5"], "Speed");

        assert_eq!(summary.histogram.len(), 20);
        assert_eq!(summary.histogram_total(), 4);
        assert_eq!(summary.histogram[0].lower_bound, 0.0);
        assert_eq!(summary.histogram[19].upper_bound, 10.0);
        // The maximum belongs to the last, closed bin
        assert_eq!(summary.histogram[19].count, 1);
        assert_eq!(summary.histogram[10].count, 1);
    }

    #[test]
    fn test_histogram_with_configured_bins() {
        let config = AnalysisConfig {
            histogram_bins: 2,
            ..Default::default()
        };
        let summary = FeatureSummarizer::new(config).summarize(&["1", "2", "3", "4"], "x");

        assert_eq!(summary.histogram.len(), 2);
        assert_eq!(summary.histogram[0].count, 2);
        assert_eq!(summary.histogram[1].count, 2);
        assert_eq!(summary.histogram[0].upper_bound, 2.5);
    }

    #[test]
    fn test_histogram_constant_values_single_bin() {
        let summary = FeatureSummarizer::default().summarize(&["7", "7", "7"], "x");

        assert_eq!(summary.histogram.len(), 1);
        assert_eq!(summary.histogram[0].count, 3);
    }

    #[test]
    fn test_outliers_flag_extreme_value() {
        let summary = FeatureSummarizer::default().summarize(&["1", "2", "3", "4", "100"], "x");

        assert_eq!(summary.outliers, vec![100.0]);
        let quartiles = summary.quartiles.unwrap();
        assert_eq!(quartiles.q1, 2.0);
        assert_eq!(quartiles.median, 3.0);
        assert_eq!(quartiles.q3, 4.0);
    }

    #[test]
    fn test_outliers_need_four_values() {
        let summary = FeatureSummarizer::default().summarize(&["1", "2", "1000"], "x");

        assert!(summary.outliers.is_empty());
        assert!(summary.quartiles.is_none());
    }

    #[test]
    fn test_trim_policy_changes_classification() {
        let config = AnalysisConfig {
            coercion: CoercionPolicy::Trim,
            ..Default::default()
        };
        let summary = FeatureSummarizer::new(config).summarize(&[" 1", "  ", "2 "], "x");

        assert_eq!(summary.missing_count, 1);
        assert_eq!(summary.histogram_total(), 2);
        // Filled cells keep their raw text, missing ones collapse onto ""
        assert_eq!(summary.frequency_of(" 1"), 1);
        assert_eq!(summary.frequency_of(""), 1);
        assert_eq!(summary.frequency_of("  "), 0);
    }

    #[test]
    fn test_histogram_over_extreme_range() {
        let summary = FeatureSummarizer::default().summarize(&["-1e308", "0", "1e308"], "x");

        assert!(summary
            .histogram
            .iter()
            .all(|bin| bin.lower_bound.is_finite() && bin.upper_bound.is_finite()));
        assert_eq!(summary.histogram[0].lower_bound, -1e308);
        assert_eq!(summary.histogram[19].upper_bound, 1e308);
        assert_eq!(summary.histogram[0].count, 1);
        assert_eq!(summary.histogram[10].count, 1);
        assert_eq!(summary.histogram[19].count, 1);
    }

    #[test]
    fn test_summarize_column_unknown() {
        let dataset = Dataset::from_records(&["a"], &[vec!["1"]]).unwrap();
        let err = FeatureSummarizer::default()
            .summarize_column(&dataset, "b")
            .unwrap_err();

        assert!(matches!(err, AppError::UnknownColumn(_)));
    }
}
