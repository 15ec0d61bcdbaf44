// ============================================================
// DATASET TYPES
// ============================================================
// Parsed rows in source order plus the schema naming their cells

use std::sync::Arc;

use super::{ColumnId, Schema};
use crate::domain::error::Result;

/// A single parsed record. Cells are positional and always as many as the
/// schema has columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<String>,
}

impl Row {
    /// Raw cell for `id`; missing cells read as the empty string
    pub fn get(&self, id: ColumnId) -> &str {
        self.cells.get(id.index()).map(String::as_str).unwrap_or("")
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// Ordered rows sharing one schema
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: Arc<Schema>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset, padding short records with empty strings and
    /// dropping cells beyond the last column.
    pub fn new(schema: Schema, records: Vec<Vec<String>>) -> Self {
        let width = schema.len();
        let rows = records
            .into_iter()
            .map(|mut cells| {
                cells.resize(width, String::new());
                Row { cells }
            })
            .collect();

        Self {
            schema: Arc::new(schema),
            rows,
        }
    }

    /// Convenience constructor from a header and string records
    pub fn from_records<H, R, C>(headers: &[H], records: &[R]) -> Result<Self>
    where
        H: AsRef<str>,
        R: AsRef<[C]>,
        C: AsRef<str>,
    {
        let schema = Schema::new(headers.iter().map(|h| h.as_ref().to_string()).collect())?;
        let records = records
            .iter()
            .map(|r| r.as_ref().iter().map(|c| c.as_ref().to_string()).collect())
            .collect();

        Ok(Self::new(schema, records))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn columns(&self) -> &[String] {
        self.schema.names()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw values of one column in row order
    pub fn values(&self, id: ColumnId) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row.get(id))
    }

    /// Look up a column by name and return its raw values
    pub fn values_by_name(&self, name: &str) -> Option<Vec<&str>> {
        self.schema.resolve(name).map(|id| self.values(id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_rows_are_padded() {
        let dataset =
            Dataset::from_records(&["a", "b", "c"], &[vec!["1"], vec!["1", "2", "3", "4"]])
                .unwrap();

        let c = dataset.schema().resolve("c").unwrap();
        assert_eq!(dataset.rows()[0].get(c), "");
        assert_eq!(dataset.rows()[0].cells().len(), 3);
        assert_eq!(dataset.rows()[1].cells().len(), 3);
        assert_eq!(dataset.rows()[1].get(c), "3");
    }

    #[test]
    fn test_values_by_name() {
        let dataset = Dataset::from_records(&["x"], &[vec!["1"], vec!["2"]]).unwrap();

        assert_eq!(dataset.values_by_name("x"), Some(vec!["1", "2"]));
        assert_eq!(dataset.values_by_name("y"), None);
    }
}
