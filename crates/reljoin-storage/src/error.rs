use reljoin_catalog::CatalogError;
use reljoin_types::DataType;

/// Why a list of values does not conform to a table schema.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("expected {expected} values, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    #[error("column '{column}' is not nullable")]
    NullNotAllowed { column: String },

    #[error("column '{column}' declared {declared} cannot hold {actual} value {value}")]
    TypeMismatch { column: String, declared: DataType, actual: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("Row {row} does not conform to schema '{table}': {reason}")]
    SchemaMismatch { table: String, row: usize, reason: RowError },

    #[error("Row index {index} out of bounds (relation has {len} rows)")]
    RowIndexOutOfBounds { index: usize, len: usize },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
