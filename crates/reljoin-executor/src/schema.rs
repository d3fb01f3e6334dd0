use std::collections::HashSet;

use reljoin_catalog::{ColumnSchema, TableSchema};

use crate::{errors::ExecutorError, expression::ColumnRef, expression::Side, join::JoinKind};

/// Output schema of a join: the input schemas laid side by side, each column
/// remembering which input it came from.
///
/// For LeftSemi and LeftAnti there is no right segment at all, so a
/// right-side reference can never resolve to a left column of the same name.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedSchema {
    segments: Vec<Segment>,
    total_columns: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct Segment {
    side: Side,
    /// Index of this segment's first column in the combined row
    start: usize,
    schema: TableSchema,
}

impl JoinedSchema {
    /// Derive the output schema for `kind`.
    ///
    /// Columns of a side that may be null-extended become nullable.
    pub fn for_kind(kind: JoinKind, left: &TableSchema, right: &TableSchema) -> Self {
        let mut builder = JoinedSchemaBuilder::default();
        builder.add(Side::Left, left, kind.null_extends_left());
        if kind.exposes_right_columns() {
            builder.add(Side::Right, right, kind.null_extends_right());
        }
        builder.build()
    }

    /// Resolve a side-qualified column to its position in output rows.
    pub fn resolve(&self, column: &ColumnRef) -> Result<usize, ExecutorError> {
        self.segments
            .iter()
            .find(|segment| segment.side == column.side)
            .and_then(|segment| {
                segment.schema.get_column_index(&column.name).map(|idx| segment.start + idx)
            })
            .ok_or_else(|| ExecutorError::ColumnNotFound {
                column: column.to_string(),
                available: self.qualified_names(),
            })
    }

    /// Column at output position `index`, with the side it came from
    pub fn column(&self, index: usize) -> Option<(Side, &ColumnSchema)> {
        self.columns().nth(index)
    }

    /// All output columns in order
    pub fn columns(&self) -> impl Iterator<Item = (Side, &ColumnSchema)> {
        self.segments
            .iter()
            .flat_map(|segment| segment.schema.columns.iter().map(move |c| (segment.side, c)))
    }

    pub fn has_side(&self, side: Side) -> bool {
        self.segments.iter().any(|segment| segment.side == side)
    }

    pub fn len(&self) -> usize {
        self.total_columns
    }

    pub fn is_empty(&self) -> bool {
        self.total_columns == 0
    }

    /// Output column names: bare when unique, `left.X` / `right.X` when a
    /// name occurs on both sides.
    pub fn column_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut duplicated = HashSet::new();
        for (_, column) in self.columns() {
            let lower = column.name.to_lowercase();
            if !seen.insert(lower.clone()) {
                duplicated.insert(lower);
            }
        }

        self.columns()
            .map(|(side, column)| {
                if duplicated.contains(&column.name.to_lowercase()) {
                    format!("{}.{}", side, column.name)
                } else {
                    column.name.clone()
                }
            })
            .collect()
    }

    /// Flatten into a plain table schema using [`JoinedSchema::column_names`].
    pub fn to_table_schema(&self, name: impl Into<String>) -> TableSchema {
        let columns = self
            .columns()
            .zip(self.column_names())
            .map(|((_, column), output_name)| column.renamed(output_name))
            .collect();
        TableSchema::new(name, columns)
    }

    fn qualified_names(&self) -> Vec<String> {
        self.columns().map(|(side, column)| format!("{}.{}", side, column.name)).collect()
    }
}

/// Builds a JoinedSchema in one pass by tracking the column offset.
#[derive(Debug, Default)]
struct JoinedSchemaBuilder {
    segments: Vec<Segment>,
    column_offset: usize,
}

impl JoinedSchemaBuilder {
    fn add(&mut self, side: Side, schema: &TableSchema, null_extended: bool) -> &mut Self {
        let schema = if null_extended {
            TableSchema::new(
                schema.name.clone(),
                schema.columns.iter().map(ColumnSchema::as_nullable).collect(),
            )
        } else {
            schema.clone()
        };
        let num_columns = schema.columns.len();
        self.segments.push(Segment { side, start: self.column_offset, schema });
        self.column_offset += num_columns;
        self
    }

    fn build(self) -> JoinedSchema {
        JoinedSchema { segments: self.segments, total_columns: self.column_offset }
    }
}
