use reljoin_catalog::TableSchema;
use reljoin_types::SqlValue;

use crate::{error::StorageError, row::Row};

/// An ordered collection of rows sharing one schema.
///
/// Row order only matters for output determinism, never for join results.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    schema: TableSchema,
    rows: Vec<Row>,
}

impl Relation {
    /// Build a relation from raw values, validating `schema` and then every
    /// row against it.
    pub fn new(schema: TableSchema, rows: Vec<Vec<SqlValue>>) -> Result<Self, StorageError> {
        schema.check_unique_columns()?;
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, values)| {
                Row::try_new(&schema, values).map_err(|reason| StorageError::SchemaMismatch {
                    table: schema.name.clone(),
                    row: idx,
                    reason,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Relation { schema, rows })
    }

    /// Build a relation from existing rows, re-checking each one against `schema`.
    pub fn from_rows(schema: TableSchema, rows: Vec<Row>) -> Result<Self, StorageError> {
        schema.check_unique_columns()?;
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, row)| {
                Row::try_new(&schema, row.values().to_vec()).map_err(|reason| {
                    StorageError::SchemaMismatch { table: schema.name.clone(), row: idx, reason }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Relation { schema, rows })
    }

    pub fn schema(&self) -> &TableSchema {
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

    /// Look up a value by row position and column name.
    pub fn value(&self, row: usize, column: &str) -> Result<&SqlValue, StorageError> {
        let col_idx = self.schema.column_index(column)?;
        let row = self
            .rows
            .get(row)
            .ok_or(StorageError::RowIndexOutOfBounds { index: row, len: self.rows.len() })?;
        // Row width was checked against the schema on construction
        row.get(col_idx).ok_or(StorageError::RowIndexOutOfBounds { index: col_idx, len: row.len() })
    }

    /// All values of one column, in row order.
    pub fn column_values(&self, column: &str) -> Result<Vec<&SqlValue>, StorageError> {
        let col_idx = self.schema.column_index(column)?;
        Ok(self.rows.iter().filter_map(|row| row.get(col_idx)).collect())
    }

    /// Rebuild this relation with its rows in a new order.
    ///
    /// `order` must be a permutation of `0..len`; entries out of range are skipped.
    pub fn reordered(&self, order: &[usize]) -> Self {
        let rows = order.iter().filter_map(|&idx| self.rows.get(idx).cloned()).collect();
        Relation { schema: self.schema.clone(), rows }
    }
}

#[cfg(test)]
mod tests {
    use reljoin_catalog::{CatalogError, ColumnSchema};
    use reljoin_types::DataType;

    use super::*;
    use crate::error::RowError;

    fn location_schema() -> TableSchema {
        TableSchema::new(
            "location",
            vec![
                ColumnSchema::new("CityCode", DataType::Varchar { max_length: Some(3) }, false),
                ColumnSchema::new("Name", DataType::Varchar { max_length: None }, true),
            ],
        )
    }

    fn location() -> Relation {
        Relation::new(
            location_schema(),
            vec![
                vec![SqlValue::varchar("SYD"), SqlValue::varchar("Sydney")],
                vec![SqlValue::varchar("MEL"), SqlValue::varchar("Melbourne")],
                vec![SqlValue::varchar("ADL"), SqlValue::varchar("Adelaide")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_relation_creation() {
        let relation = location();
        assert_eq!(relation.len(), 3);
        assert_eq!(relation.value(1, "Name").unwrap(), &SqlValue::varchar("Melbourne"));
    }

    #[test]
    fn test_schema_mismatch_reports_row() {
        let err = Relation::new(
            location_schema(),
            vec![
                vec![SqlValue::varchar("SYD"), SqlValue::varchar("Sydney")],
                vec![SqlValue::varchar("PERTH"), SqlValue::varchar("Perth")],
            ],
        )
        .unwrap_err();

        match err {
            StorageError::SchemaMismatch { table, row, reason } => {
                assert_eq!(table, "location");
                assert_eq!(row, 1);
                assert!(matches!(
                    reason,
                    RowError::TypeMismatch { ref column, .. } if column == "CityCode"
                ));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_column_names_rejected() {
        let schema = TableSchema::new(
            "location",
            vec![
                ColumnSchema::new("CityCode", DataType::Varchar { max_length: Some(3) }, false),
                ColumnSchema::new("citycode", DataType::Varchar { max_length: Some(3) }, false),
            ],
        );
        let expected = StorageError::Catalog(CatalogError::DuplicateColumn {
            table: "location".to_string(),
            column: "citycode".to_string(),
        });

        let err = Relation::new(schema.clone(), vec![]).unwrap_err();
        assert_eq!(err, expected);

        let row = Row::try_new(&schema, vec![SqlValue::varchar("SYD"), SqlValue::varchar("SYD")])
            .unwrap();
        let err = Relation::from_rows(schema, vec![row]).unwrap_err();
        assert_eq!(err, expected);
    }

    #[test]
    fn test_column_not_found() {
        let err = location().value(0, "Country").unwrap_err();
        assert_eq!(
            err,
            StorageError::Catalog(CatalogError::ColumnNotFound {
                table: "location".to_string(),
                column: "Country".to_string(),
            })
        );
    }

    #[test]
    fn test_row_out_of_bounds() {
        let err = location().value(3, "Name").unwrap_err();
        assert_eq!(err, StorageError::RowIndexOutOfBounds { index: 3, len: 3 });
    }

    #[test]
    fn test_reordered() {
        let relation = location().reordered(&[2, 0, 1]);
        let codes: Vec<_> =
            relation.column_values("CityCode").unwrap().into_iter().cloned().collect();
        assert_eq!(
            codes,
            vec![SqlValue::varchar("ADL"), SqlValue::varchar("SYD"), SqlValue::varchar("MEL")]
        );
    }
}
