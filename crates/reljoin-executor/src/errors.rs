use reljoin_catalog::CatalogError;
use reljoin_storage::StorageError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExecutorError {
    /// A row's arity or types do not conform to its declared schema
    #[error("Schema mismatch in '{table}' at row {row}: {reason}")]
    SchemaMismatch { table: String, row: usize, reason: String },

    #[error("{}", column_not_found_message(.column, .available))]
    ColumnNotFound { column: String, available: Vec<String> },

    /// Condition and join kind disagree, or the join kind is unknown
    #[error("Invalid join configuration: {0}")]
    InvalidJoinConfiguration(String),

    #[error("Type mismatch: cannot evaluate {left} {op} {right}")]
    TypeMismatch { left: String, op: String, right: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error(transparent)]
    Catalog(CatalogError),
}

impl From<CatalogError> for ExecutorError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::ColumnNotFound { table, column } => ExecutorError::ColumnNotFound {
                column: format!("{}.{}", table, column),
                available: vec![],
            },
            other => ExecutorError::Catalog(other),
        }
    }
}

impl From<StorageError> for ExecutorError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::SchemaMismatch { table, row, reason } => {
                ExecutorError::SchemaMismatch { table, row, reason: reason.to_string() }
            }
            StorageError::Catalog(err) => err.into(),
            other => ExecutorError::StorageError(other.to_string()),
        }
    }
}

fn column_not_found_message(column: &str, available: &[String]) -> String {
    if available.is_empty() {
        format!("Column '{}' not found", column)
    } else {
        format!("Column '{}' not found. Available columns: {}", column, available.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use reljoin_storage::RowError;

    use super::*;

    #[test]
    fn test_column_not_found_lists_available_columns() {
        let err = ExecutorError::ColumnNotFound {
            column: "right.Name".to_string(),
            available: vec!["left.EmpID".to_string(), "left.Name".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Column 'right.Name' not found. Available columns: left.EmpID, left.Name"
        );
    }

    #[test]
    fn test_catalog_column_not_found_converts() {
        let err: ExecutorError = CatalogError::ColumnNotFound {
            table: "employee".to_string(),
            column: "Salary".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Column 'employee.Salary' not found");
    }

    #[test]
    fn test_storage_schema_mismatch_converts() {
        let err: ExecutorError = StorageError::SchemaMismatch {
            table: "employee".to_string(),
            row: 3,
            reason: RowError::ArityMismatch { expected: 3, actual: 2 },
        }
        .into();
        assert_eq!(
            err,
            ExecutorError::SchemaMismatch {
                table: "employee".to_string(),
                row: 3,
                reason: "expected 3 values, got 2".to_string(),
            }
        );
    }
}
