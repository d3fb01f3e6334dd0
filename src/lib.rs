//! reljoin - In-Memory Relational Join Evaluator
//!
//! This is the root crate that re-exports all components.

pub use reljoin_catalog as catalog;
pub use reljoin_executor as executor;
pub use reljoin_storage as storage;
pub use reljoin_types as types;

pub use reljoin_catalog::{ColumnSchema, TableSchema};
pub use reljoin_executor::{
    col, equi_join, join, lit, sort_relation, ColumnRef, Expression, ExecutorError, JoinConfig,
    JoinEvaluator, JoinKind, JoinOutput, SelectItem, Side, SortKey,
};
pub use reljoin_storage::{Relation, Row};
pub use reljoin_types::{DataType, SqlValue};
