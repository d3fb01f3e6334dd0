/// Errors returned by catalog operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Column '{column}' appears more than once in '{table}'")]
    DuplicateColumn { table: String, column: String },

    #[error("Column '{column}' not found in '{table}'")]
    ColumnNotFound { table: String, column: String },
}
