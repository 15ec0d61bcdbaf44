// ============================================================
// GROUP AGGREGATOR
// ============================================================
// Per-category counts and means for bar and line charts

use std::collections::HashMap;

use tracing::debug;

use super::statistics::mean;
use crate::domain::error::{AppError, Result};
use crate::domain::table::{AnalysisConfig, CategoryAggregate, ColumnId, Dataset};

pub struct GroupAggregator {
    config: AnalysisConfig,
}

impl GroupAggregator {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Rows per distinct value of `category`, in first-seen order
    pub fn count_by(&self, dataset: &Dataset, category: &str) -> Result<Vec<CategoryAggregate>> {
        let category_id = dataset
            .schema()
            .resolve(category)
            .ok_or_else(|| AppError::UnknownColumn(vec![category.to_string()]))?;

        Ok(self.aggregate(dataset, category_id, None))
    }

    /// Mean of the numeric cells of `target` for every value of `category`.
    /// Categories whose target cells are all non-numeric get no mean.
    pub fn mean_by(
        &self,
        dataset: &Dataset,
        category: &str,
        target: &str,
    ) -> Result<Vec<CategoryAggregate>> {
        let ids = dataset.schema().resolve_all(&[category, target])?;
        let category_id = ids[0];
        let target_id = ids.get(1).copied().unwrap_or(category_id);

        Ok(self.aggregate(dataset, category_id, Some(target_id)))
    }

    fn aggregate(
        &self,
        dataset: &Dataset,
        category: ColumnId,
        target: Option<ColumnId>,
    ) -> Vec<CategoryAggregate> {
        let policy = self.config.coercion;
        let mut order: Vec<&str> = Vec::new();
        let mut groups: HashMap<&str, (usize, Vec<f64>)> = HashMap::new();

        for row in dataset.rows() {
            let key = row.get(category);
            let group = groups.entry(key).or_insert_with(|| {
                order.push(key);
                (0, Vec::new())
            });
            group.0 += 1;

            if let Some(value) = target.and_then(|id| policy.numeric(row.get(id))) {
                group.1.push(value);
            }
        }

        debug!(
            category = dataset.schema().name(category),
            groups = order.len(),
            "Rows grouped"
        );

        order
            .into_iter()
            .map(|key| {
                let (count, values) = &groups[key];
                CategoryAggregate {
                    category: key.to_string(),
                    count: *count,
                    mean: target.and_then(|_| mean(values)),
                }
            })
            .collect()
    }
}

impl Default for GroupAggregator {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accidents() -> Dataset {
        Dataset::from_records(
            &["Weather", "Accident_Severity"],
            &[
                vec!["Fine", "3"],
                vec!["Raining", "2"],
                vec!["Fine", "1"],
                vec!["Snow", "unknown"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_count_by_first_seen_order() {
        let groups = GroupAggregator::default().count_by(&accidents(), "Weather").unwrap();

        let summary: Vec<(&str, usize)> = groups.iter().map(|g| (g.category.as_str(), g.count)).collect();
        assert_eq!(summary, vec![("Fine", 2), ("Raining", 1), ("Snow", 1)]);
        assert!(groups.iter().all(|g| g.mean.is_none()));
    }

    #[test]
    fn test_mean_by() {
        let groups = GroupAggregator::default()
            .mean_by(&accidents(), "Weather", "Accident_Severity")
            .unwrap();

        assert_eq!(groups[0].mean, Some(2.0));
        assert_eq!(groups[1].mean, Some(2.0));
        assert_eq!(groups[2].mean, None);
    }

    #[test]
    fn test_unknown_columns() {
        let err = GroupAggregator::default()
            .mean_by(&accidents(), "Road", "Speed")
            .unwrap_err();

        assert_eq!(
            err,
            AppError::UnknownColumn(vec!["Road".to_string(), "Speed".to_string()])
        );
    }
}
