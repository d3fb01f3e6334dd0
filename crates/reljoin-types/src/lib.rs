//! Value and type model for relational joins
//!
//! This crate provides:
//! - Data type definitions (INTEGER, VARCHAR, BOOLEAN, DATE, ...)
//! - SQL value representation, including NULL
//! - SQL three-valued equality and ordering
//! - Hashing that agrees with equality for use as join keys

mod data_type;
mod sql_value;

pub use data_type::DataType;
pub use sql_value::{KeyValue, SqlValue};
