// ============================================================
// SCHEMA
// ============================================================
// Ordered column names of one dataset and the validated handles
// used to address cells

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::error::{AppError, Result};

/// Position of a column inside the schema that issued it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnId(usize);

impl ColumnId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Column names discovered from a header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    names: Vec<String>,
    lookup: HashMap<String, ColumnId>,
}

impl Schema {
    /// Build a schema, rejecting duplicate names
    pub fn new(names: Vec<String>) -> Result<Self> {
        let mut lookup = HashMap::with_capacity(names.len());
        let mut duplicates = Vec::new();

        for (idx, name) in names.iter().enumerate() {
            if lookup.insert(name.clone(), ColumnId(idx)).is_some() && !duplicates.contains(name) {
                duplicates.push(name.clone());
            }
        }

        if !duplicates.is_empty() {
            return Err(AppError::ParseError(format!(
                "Duplicate column name(s) in header: {}",
                duplicates.join(", ")
            )));
        }

        Ok(Self { names, lookup })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, id: ColumnId) -> &str {
        self.names.get(id.0).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    pub fn resolve(&self, name: &str) -> Option<ColumnId> {
        self.lookup.get(name).copied()
    }

    /// Resolve a request of column names.
    ///
    /// Duplicates collapse onto their first occurrence and caller order is
    /// kept. Fails with every unknown name, not only the first one.
    pub fn resolve_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<ColumnId>> {
        let mut resolved = Vec::with_capacity(names.len());
        let mut unknown: Vec<String> = Vec::new();

        for name in names {
            let name = name.as_ref();
            match self.resolve(name) {
                Some(id) => {
                    if !resolved.contains(&id) {
                        resolved.push(id);
                    }
                }
                None => {
                    if !unknown.iter().any(|n| n == name) {
                        unknown.push(name.to_string());
                    }
                }
            }
        }

        if unknown.is_empty() {
            Ok(resolved)
        } else {
            Err(AppError::UnknownColumn(unknown))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(names: &[&str]) -> Schema {
        Schema::new(names.iter().map(|n| n.to_string()).collect()).unwrap()
    }

    #[test]
    fn test_resolve_keeps_caller_order_and_collapses_duplicates() {
        let schema = schema(&["a", "b", "c"]);
        let ids = schema.resolve_all(&["c", "a", "c"]).unwrap();

        assert_eq!(ids.len(), 2);
        assert_eq!(schema.name(ids[0]), "c");
        assert_eq!(schema.name(ids[1]), "a");
    }

    #[test]
    fn test_resolve_reports_every_unknown_name() {
        let schema = schema(&["real"]);
        let err = schema.resolve_all(&["real", "fake1", "fake2", "fake1"]).unwrap_err();

        assert_eq!(
            err,
            AppError::UnknownColumn(vec!["fake1".to_string(), "fake2".to_string()])
        );
    }

    #[test]
    fn test_duplicate_header_is_rejected() {
        let result = Schema::new(vec!["x".to_string(), "y".to_string(), "x".to_string()]);
        assert!(matches!(result, Err(AppError::ParseError(_))));
    }
}
