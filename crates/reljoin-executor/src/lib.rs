//! Executor - Join Evaluation Engine
//!
//! This crate evaluates inner, outer, semi, anti and cross joins between two
//! in-memory relations, and projects or sorts the results.

pub mod config;
pub mod errors;
pub mod expression;
pub mod join;
mod join_analyzer;
mod order;
#[cfg(feature = "parallel")]
pub mod parallel;
mod predicate;
mod schema;
mod select;

pub use config::{JoinConfig, JoinStrategy};
pub use errors::ExecutorError;
pub use expression::{col, equi_join, lit, ColumnRef, CompareOp, Expression, Side};
pub use join::{join, JoinEvaluator, JoinKind, JoinOutput, MatchAlgorithm, MatchMode, MatchSet};
pub use join_analyzer::EquiJoinInfo;
pub use order::{sort_relation, NullOrdering, SortDirection, SortKey};
#[cfg(feature = "parallel")]
pub use parallel::ParallelConfig;
pub use predicate::BoundPredicate;
pub use schema::JoinedSchema;
pub use select::SelectItem;
