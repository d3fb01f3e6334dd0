//! Catalog - Schema Metadata
//!
//! Column and table schema definitions shared by relations and join outputs.

mod column;
mod errors;
mod table;

pub use column::ColumnSchema;
pub use errors::CatalogError;
pub use table::TableSchema;
