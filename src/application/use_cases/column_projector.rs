// ============================================================
// COLUMN PROJECTOR
// ============================================================
// Validate requested columns and reduce a dataset to them

use std::collections::HashSet;

use tracing::debug;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{ColumnId, Dataset, Row, Schema};

/// Reduce `dataset` to `columns`, in caller order with duplicates collapsed.
///
/// Fails with `UnknownColumn` naming every requested column the dataset
/// lacks. The result owns its own rows.
pub fn project<S: AsRef<str>>(dataset: &Dataset, columns: &[S]) -> Result<Dataset> {
    let ids = dataset.schema().resolve_all(columns)?;
    let projected = rebuild(dataset, &ids, dataset.rows().iter())?;

    debug!(
        columns = projected.columns().len(),
        rows = projected.len(),
        "Projected dataset"
    );
    Ok(projected)
}

/// Raw values of a single column, in row order
pub fn project_column(dataset: &Dataset, column: &str) -> Result<Vec<String>> {
    let id = dataset
        .schema()
        .resolve(column)
        .ok_or_else(|| AppError::UnknownColumn(vec![column.to_string()]))?;

    Ok(dataset.values(id).map(str::to_string).collect())
}

/// Keep the first row for every distinct value of `key`, projected to
/// `columns`. Used for catalogue-style datasets where one entity is listed
/// several times.
pub fn distinct_by<S: AsRef<str>>(dataset: &Dataset, key: &str, columns: &[S]) -> Result<Dataset> {
    let mut requested: Vec<&str> = vec![key];
    requested.extend(columns.iter().map(|c| c.as_ref()));
    dataset.schema().resolve_all(&requested[..])?;

    let key_id = dataset
        .schema()
        .resolve(key)
        .ok_or_else(|| AppError::UnknownColumn(vec![key.to_string()]))?;
    let ids = dataset.schema().resolve_all(columns)?;

    let mut seen: HashSet<&str> = HashSet::new();
    let rows = dataset
        .rows()
        .iter()
        .filter(|row| seen.insert(row.get(key_id)));

    let distinct = rebuild(dataset, &ids, rows)?;
    debug!(
        key = key,
        rows = dataset.len(),
        distinct = distinct.len(),
        "Collapsed rows by key"
    );
    Ok(distinct)
}

fn rebuild<'a>(
    dataset: &Dataset,
    ids: &[ColumnId],
    rows: impl Iterator<Item = &'a Row>,
) -> Result<Dataset> {
    let names = ids
        .iter()
        .map(|&id| dataset.schema().name(id).to_string())
        .collect();
    let schema = Schema::new(names)?;

    let records = rows
        .map(|row| ids.iter().map(|&id| row.get(id).to_string()).collect())
        .collect();

    Ok(Dataset::new(schema, records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accidents() -> Dataset {
        Dataset::from_records(
            &["Severity", "Weather", "Speed_limit"],
            &[
                vec!["3", "Fine", "30"],
                vec!["2", "Raining", ""],
                vec!["3", "Fine", "60"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_project_full_column_set_is_identity() {
        let dataset = accidents();
        let projected = project(&dataset, dataset.columns()).unwrap();

        assert_eq!(projected.columns(), dataset.columns());
        assert_eq!(projected.len(), dataset.len());
        for (a, b) in projected.rows().iter().zip(dataset.rows()) {
            assert_eq!(a.cells(), b.cells());
        }
    }

    #[test]
    fn test_project_caller_order_and_duplicates() {
        let projected = project(&accidents(), &["Speed_limit", "Severity", "Speed_limit"]).unwrap();

        assert_eq!(projected.columns(), &["Speed_limit", "Severity"]);
        assert_eq!(projected.rows()[1].cells(), &["", "2"]);
    }

    #[test]
    fn test_project_reports_all_unknown_columns() {
        let err = project(&accidents(), &["Severity", "fake1", "fake2"]).unwrap_err();

        assert_eq!(
            err,
            AppError::UnknownColumn(vec!["fake1".to_string(), "fake2".to_string()])
        );
    }

    #[test]
    fn test_project_column_returns_raw_values() {
        let values = project_column(&accidents(), "Speed_limit").unwrap();
        assert_eq!(values, vec!["30", "", "60"]);

        let err = project_column(&accidents(), "Nope").unwrap_err();
        assert_eq!(err, AppError::UnknownColumn(vec!["Nope".to_string()]));
    }

    #[test]
    fn test_distinct_by_keeps_first_occurrence() {
        let phones = Dataset::from_records(
            &["Product Name", "Actual price", "Stars"],
            &[
                vec!["Pixel 8", "699", "4.5"],
                vec!["Galaxy S24", "799", "4.4"],
                vec!["Pixel 8", "649", "4.6"],
            ],
        )
        .unwrap();

        let distinct = distinct_by(&phones, "Product Name", &["Product Name", "Actual price"]).unwrap();

        assert_eq!(distinct.len(), 2);
        assert_eq!(distinct.rows()[0].cells(), &["Pixel 8", "699"]);
        assert_eq!(distinct.rows()[1].cells(), &["Galaxy S24", "799"]);
    }

    #[test]
    fn test_distinct_by_unknown_key_and_column() {
        let err = distinct_by(&accidents(), "Model", &["Severity", "Colour"]).unwrap_err();
        assert_eq!(
            err,
            AppError::UnknownColumn(vec!["Model".to_string(), "Colour".to_string()])
        );
    }
}
