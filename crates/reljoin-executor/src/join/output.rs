use reljoin_storage::{Relation, Row};
use reljoin_types::SqlValue;

use super::JoinKind;
use crate::{errors::ExecutorError, expression::ColumnRef, schema::JoinedSchema};

/// Result of one join evaluation.
///
/// Rows are freshly built for the output; they never alias input rows.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutput {
    kind: JoinKind,
    schema: JoinedSchema,
    rows: Vec<Row>,
}

impl JoinOutput {
    pub(crate) fn new(kind: JoinKind, schema: JoinedSchema, rows: Vec<Row>) -> Self {
        JoinOutput { kind, schema, rows }
    }

    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    pub fn schema(&self) -> &JoinedSchema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Output column names, qualified by side where a name occurs on both sides
    pub fn column_names(&self) -> Vec<String> {
        self.schema.column_names()
    }

    /// Value of a side-qualified column in output row `row`.
    ///
    /// Right-side references fail with `ColumnNotFound` for semi and anti joins.
    pub fn value(&self, row: usize, column: &ColumnRef) -> Result<&SqlValue, ExecutorError> {
        let col_idx = self.schema.resolve(column)?;
        let row = self.rows.get(row).ok_or_else(|| {
            ExecutorError::StorageError(format!(
                "Row index {} out of bounds (join output has {} rows)",
                row,
                self.rows.len()
            ))
        })?;
        Ok(row.get(col_idx).unwrap_or(&SqlValue::Null))
    }

    /// All values of one side-qualified column, in row order.
    pub fn column_values(&self, column: &ColumnRef) -> Result<Vec<&SqlValue>, ExecutorError> {
        let col_idx = self.schema.resolve(column)?;
        Ok(self.rows.iter().filter_map(|row| row.get(col_idx)).collect())
    }

    /// Flatten into a plain relation named after the join kind, using
    /// [`JoinedSchema::column_names`] as column names.
    pub fn into_relation(self) -> Result<Relation, ExecutorError> {
        let name = format!("{}_join", self.kind);
        let schema = self.schema.to_table_schema(name);
        Ok(Relation::from_rows(schema, self.rows)?)
    }
}
