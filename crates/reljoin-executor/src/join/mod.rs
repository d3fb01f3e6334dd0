//! Two-relation join evaluation
//!
//! [`JoinEvaluator::evaluate`] validates the condition against the join kind,
//! binds it to both input schemas, builds a [`MatchSet`] and assembles the
//! output rows the kind calls for. Errors are all raised before any output
//! row is built.

mod inner;
mod kind;
mod match_set;
mod outer;
mod output;
mod semi;


use inner::{assemble_cross, assemble_inner};
pub use kind::JoinKind;
pub use match_set::{MatchAlgorithm, MatchMode, MatchSet};
use outer::{assemble_outer, Preserve};
pub use output::JoinOutput;
use reljoin_storage::Relation;
use semi::assemble_semi;

use crate::{
    config::JoinConfig, errors::ExecutorError, expression::Expression,
    predicate::BoundPredicate, schema::JoinedSchema,
};

/// Evaluates joins under one [`JoinConfig`].
///
/// Holds no per-call state; one evaluator can serve any number of calls.
#[derive(Debug, Clone, Default)]
pub struct JoinEvaluator {
    config: JoinConfig,
}

impl JoinEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: JoinConfig) -> Self {
        JoinEvaluator { config }
    }

    pub fn config(&self) -> &JoinConfig {
        &self.config
    }

    /// Join `left` and `right` under `condition` with the semantics of `kind`.
    ///
    /// `condition` must be `None` for [`JoinKind::Cross`] and present for
    /// every other kind, otherwise `InvalidJoinConfiguration` is returned.
    pub fn evaluate(
        &self,
        left: &Relation,
        right: &Relation,
        condition: Option<&Expression>,
        kind: JoinKind,
    ) -> Result<JoinOutput, ExecutorError> {
        validate_configuration(kind, condition)?;

        let predicate = BoundPredicate::bind(condition, left.schema(), right.schema())?;
        let schema = JoinedSchema::for_kind(kind, left.schema(), right.schema());
        let (left_rows, right_rows) = (left.rows(), right.rows());

        let mode = if kind.needs_existence_only() { MatchMode::FirstOnly } else { MatchMode::All };
        let rows = match kind {
            JoinKind::Cross => assemble_cross(left_rows, right_rows),
            JoinKind::Inner => {
                let matches = self.match_set(left, right, &predicate, mode);
                assemble_inner(left_rows, right_rows, &matches)
            }
            JoinKind::LeftOuter | JoinKind::RightOuter | JoinKind::FullOuter => {
                let matches = self.match_set(left, right, &predicate, mode);
                let preserve =
                    Preserve { left: kind.null_extends_right(), right: kind.null_extends_left() };
                assemble_outer(
                    left_rows,
                    right_rows,
                    &matches,
                    preserve,
                    left.schema().column_count(),
                    right.schema().column_count(),
                )
            }
            JoinKind::LeftSemi | JoinKind::LeftAnti => {
                let matches = self.match_set(left, right, &predicate, mode);
                assemble_semi(left_rows, &matches, kind == JoinKind::LeftSemi)
            }
        };

        log::debug!(
            "{} join of '{}' ({} rows) and '{}' ({} rows) produced {} rows",
            kind,
            left.schema().name,
            left.len(),
            right.schema().name,
            right.len(),
            rows.len()
        );

        Ok(JoinOutput::new(kind, schema, rows))
    }

    /// Match set of `condition` over the two relations, without assembling rows.
    pub fn match_set_for(
        &self,
        left: &Relation,
        right: &Relation,
        condition: Option<&Expression>,
        mode: MatchMode,
    ) -> Result<MatchSet, ExecutorError> {
        let predicate = BoundPredicate::bind(condition, left.schema(), right.schema())?;
        Ok(self.match_set(left, right, &predicate, mode))
    }

    fn match_set(
        &self,
        left: &Relation,
        right: &Relation,
        predicate: &BoundPredicate,
        mode: MatchMode,
    ) -> MatchSet {
        MatchSet::build(left.rows(), right.rows(), predicate, mode, &self.config)
    }
}

/// Join with the default configuration.
pub fn join(
    left: &Relation,
    right: &Relation,
    condition: Option<&Expression>,
    kind: JoinKind,
) -> Result<JoinOutput, ExecutorError> {
    JoinEvaluator::new().evaluate(left, right, condition, kind)
}

fn validate_configuration(
    kind: JoinKind,
    condition: Option<&Expression>,
) -> Result<(), ExecutorError> {
    match (kind.requires_condition(), condition) {
        (false, Some(condition)) => Err(ExecutorError::InvalidJoinConfiguration(format!(
            "{} join does not take a condition, got {}",
            kind, condition
        ))),
        (true, None) => Err(ExecutorError::InvalidJoinConfiguration(format!(
            "{} join requires a condition",
            kind
        ))),
        _ => Ok(()),
    }
}
