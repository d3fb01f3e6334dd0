use std::collections::HashSet;

use crate::{column::ColumnSchema, errors::CatalogError};

/// Table schema definition: an ordered list of uniquely named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Create a schema without checking column names.
    ///
    /// Prefer [`TableSchema::try_new`] for caller-supplied definitions.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSchema>) -> Self {
        TableSchema { name: name.into(), columns }
    }

    /// Create a schema, rejecting duplicate column names (case-insensitive).
    pub fn try_new(
        name: impl Into<String>,
        columns: Vec<ColumnSchema>,
    ) -> Result<Self, CatalogError> {
        let schema = TableSchema::new(name, columns);
        schema.check_unique_columns()?;
        Ok(schema)
    }

    /// Fail with `DuplicateColumn` on the first name that repeats an earlier
    /// one, ignoring case.
    pub fn check_unique_columns(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::with_capacity(self.columns.len());
        for col in &self.columns {
            if !seen.insert(col.name.to_lowercase()) {
                return Err(CatalogError::DuplicateColumn {
                    table: self.name.clone(),
                    column: col.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Get column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnSchema> {
        self.get_column_index(name).map(|idx| &self.columns[idx])
    }

    /// Get column index by name.
    ///
    /// Tries an exact match first, then falls back to case-insensitive matching.
    pub fn get_column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name == name).or_else(|| {
            self.columns.iter().position(|col| col.name.eq_ignore_ascii_case(name))
        })
    }

    /// Get column index by name, or a `ColumnNotFound` error.
    pub fn column_index(&self, name: &str) -> Result<usize, CatalogError> {
        self.get_column_index(name).ok_or_else(|| CatalogError::ColumnNotFound {
            table: self.name.clone(),
            column: name.to_string(),
        })
    }

    /// Get number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in declaration order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|col| col.name.as_str()).collect()
    }
}
