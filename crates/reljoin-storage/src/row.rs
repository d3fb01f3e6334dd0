use reljoin_catalog::TableSchema;
use reljoin_types::SqlValue;

use crate::error::RowError;

/// A single row of data. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<SqlValue>,
}

impl Row {
    /// Build a row, checking arity, declared types and nullability against `schema`.
    pub fn try_new(schema: &TableSchema, values: Vec<SqlValue>) -> Result<Self, RowError> {
        if values.len() != schema.columns.len() {
            return Err(RowError::ArityMismatch {
                expected: schema.columns.len(),
                actual: values.len(),
            });
        }

        for (column, value) in schema.columns.iter().zip(&values) {
            if value.is_null() {
                if !column.nullable {
                    return Err(RowError::NullNotAllowed { column: column.name.clone() });
                }
            } else if !column.data_type.accepts(value) {
                return Err(RowError::TypeMismatch {
                    column: column.name.clone(),
                    declared: column.data_type.clone(),
                    actual: value.type_name(),
                    value: value.to_string(),
                });
            }
        }

        Ok(Row { values })
    }

    /// Left row followed by right row.
    pub fn concat(left: &Row, right: &Row) -> Self {
        let mut values = Vec::with_capacity(left.values.len() + right.values.len());
        values.extend_from_slice(&left.values);
        values.extend_from_slice(&right.values);
        Row { values }
    }

    /// Left row followed by `right_width` NULLs.
    pub fn null_extend_right(left: &Row, right_width: usize) -> Self {
        let mut values = Vec::with_capacity(left.values.len() + right_width);
        values.extend_from_slice(&left.values);
        values.extend(std::iter::repeat(SqlValue::Null).take(right_width));
        Row { values }
    }

    /// `left_width` NULLs followed by the right row.
    pub fn null_extend_left(left_width: usize, right: &Row) -> Self {
        let mut values = Vec::with_capacity(left_width + right.values.len());
        values.extend(std::iter::repeat(SqlValue::Null).take(left_width));
        values.extend_from_slice(&right.values);
        Row { values }
    }

    /// New row holding the values at `indices`, in that order.
    ///
    /// Returns `None` if any index is out of bounds.
    pub fn project(&self, indices: &[usize]) -> Option<Self> {
        let values = indices
            .iter()
            .map(|&idx| self.values.get(idx).cloned())
            .collect::<Option<Vec<_>>>()?;
        Some(Row { values })
    }

    /// Get value at column index
    pub fn get(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    /// All values in column order
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Get number of columns in this row
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if row is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use reljoin_catalog::ColumnSchema;
    use reljoin_types::DataType;

    use super::*;

    fn department_schema() -> TableSchema {
        TableSchema::new(
            "department",
            vec![
                ColumnSchema::new("DeptID", DataType::Character { length: 4 }, false),
                ColumnSchema::new("Name", DataType::Varchar { max_length: None }, true),
            ],
        )
    }

    #[test]
    fn test_conforming_row() {
        let row = Row::try_new(
            &department_schema(),
            vec![SqlValue::varchar("D501"), SqlValue::varchar("Engineering")],
        )
        .unwrap();
        assert_eq!(row.len(), 2);
        assert_eq!(row.get(1), Some(&SqlValue::varchar("Engineering")));
    }

    #[test]
    fn test_arity_mismatch() {
        let err = Row::try_new(&department_schema(), vec![SqlValue::varchar("D501")]).unwrap_err();
        assert_eq!(err, RowError::ArityMismatch { expected: 2, actual: 1 });
        assert_eq!(err.to_string(), "expected 2 values, got 1");
    }

    #[test]
    fn test_null_in_non_nullable_column() {
        let err = Row::try_new(&department_schema(), vec![SqlValue::Null, SqlValue::Null])
            .unwrap_err();
        assert_eq!(err, RowError::NullNotAllowed { column: "DeptID".to_string() });
    }

    #[test]
    fn test_type_mismatch() {
        let err = Row::try_new(
            &department_schema(),
            vec![SqlValue::Integer(501), SqlValue::Null],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RowError::TypeMismatch { ref column, actual: "INTEGER", .. } if column == "DeptID"
        ));
        assert!(err.to_string().contains("cannot hold INTEGER"));
    }

    #[test]
    fn test_null_extension() {
        let row = Row::try_new(
            &department_schema(),
            vec![SqlValue::varchar("D525"), SqlValue::varchar("IT")],
        )
        .unwrap();

        let extended = Row::null_extend_left(3, &row);
        assert_eq!(extended.len(), 5);
        assert!(extended.values()[..3].iter().all(SqlValue::is_null));

        let extended = Row::null_extend_right(&row, 1);
        assert_eq!(
            extended.values(),
            &[SqlValue::varchar("D525"), SqlValue::varchar("IT"), SqlValue::Null]
        );
    }

    #[test]
    fn test_project() {
        let row = Row::try_new(
            &department_schema(),
            vec![SqlValue::varchar("D501"), SqlValue::varchar("Engineering")],
        )
        .unwrap();
        let projected = row.project(&[1, 0, 1]).unwrap();
        assert_eq!(projected.len(), 3);
        assert_eq!(projected.get(0), Some(&SqlValue::varchar("Engineering")));
        assert!(row.project(&[2]).is_none());
    }
}
