//! Projection of join output into a plain relation

use reljoin_catalog::TableSchema;
use reljoin_storage::{Relation, Row};

use crate::{errors::ExecutorError, expression::ColumnRef, join::JoinOutput};

/// One output column of a projection: a side-qualified column, optionally renamed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    pub column: ColumnRef,
    pub alias: Option<String>,
}

impl SelectItem {
    /// Output name: the alias if given, the bare column name otherwise
    pub fn output_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.column.name)
    }
}

impl From<ColumnRef> for SelectItem {
    fn from(column: ColumnRef) -> Self {
        SelectItem { column, alias: None }
    }
}

impl ColumnRef {
    pub fn alias(self, alias: impl Into<String>) -> SelectItem {
        SelectItem { column: self, alias: Some(alias.into()) }
    }
}

impl JoinOutput {
    /// Project the listed columns, in order, into a new relation.
    ///
    /// Every item is resolved before any row is copied: a right-side column
    /// after a semi or anti join fails with `ColumnNotFound`, and two items
    /// with the same output name fail with a duplicate column error.
    pub fn select(&self, items: &[SelectItem]) -> Result<Relation, ExecutorError> {
        let mut indices = Vec::with_capacity(items.len());
        let mut columns = Vec::with_capacity(items.len());
        for item in items {
            let col_idx = self.schema().resolve(&item.column)?;
            let (_, column) = self.schema().column(col_idx).ok_or_else(|| {
                ExecutorError::ColumnNotFound { column: item.column.to_string(), available: vec![] }
            })?;
            indices.push(col_idx);
            columns.push(column.renamed(item.output_name()));
        }

        let schema = TableSchema::try_new(format!("{}_select", self.kind()), columns)?;
        let rows = self
            .rows()
            .iter()
            .map(|row| {
                row.project(&indices).ok_or_else(|| {
                    ExecutorError::StorageError(format!(
                        "row of width {} cannot be projected onto {:?}",
                        row.len(),
                        indices
                    ))
                })
            })
            .collect::<Result<Vec<Row>, _>>()?;

        Ok(Relation::from_rows(schema, rows)?)
    }
}
