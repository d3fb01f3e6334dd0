//! Storage - rows and relations
//!
//! A [`Relation`] is an ordered collection of immutable [`Row`]s that all
//! conform to one [`reljoin_catalog::TableSchema`]. Conformance (arity,
//! declared type and nullability) is checked when a row enters a relation,
//! never later.

mod error;
mod relation;
mod row;

pub use error::{RowError, StorageError};
pub use relation::Relation;
pub use row::Row;
