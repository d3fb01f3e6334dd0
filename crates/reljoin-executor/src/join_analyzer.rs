//! Join condition analyzer for detecting equi-join opportunities
//!
//! Finds an equality between a left column and a right column that every
//! matching pair must satisfy. Such an equality lets match-set construction
//! look candidates up in a hash index instead of scanning every pair. The
//! full predicate is still evaluated for each candidate.

use crate::{expression::CompareOp, expression::Side, predicate::BoundExpr};

/// Information about an equi-join condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquiJoinInfo {
    /// Column index in the left relation
    pub left_col_idx: usize,
    /// Column index in the right relation
    pub right_col_idx: usize,
}

/// Analyze a bound join condition for an equality usable as a hash key.
///
/// Recognized shapes:
/// - `left.a = right.b` and `right.b = left.a`
/// - `left.a = right.b AND ...` (either operand, left operand first)
/// - `(left.a = right.b AND ...) OR (left.a = right.b AND ...)` (same equality in both branches)
///
/// The two columns must share a hash domain: SQL-equal values of those types
/// must produce equal keys, or the index would miss matches.
pub(crate) fn analyze_equi_join(condition: &BoundExpr) -> Option<EquiJoinInfo> {
    match condition {
        BoundExpr::Compare { op: CompareOp::Eq, left, right } => {
            let info = match (left.as_ref(), right.as_ref()) {
                (
                    BoundExpr::Column { side: Side::Left, index: l, data_type: lt },
                    BoundExpr::Column { side: Side::Right, index: r, data_type: rt },
                )
                | (
                    BoundExpr::Column { side: Side::Right, index: r, data_type: rt },
                    BoundExpr::Column { side: Side::Left, index: l, data_type: lt },
                ) => {
                    if !lt.shares_hash_domain_with(rt) {
                        log::trace!("equi-join {} = {} skipped: no shared hash domain", lt, rt);
                        return None;
                    }
                    EquiJoinInfo { left_col_idx: *l, right_col_idx: *r }
                }
                _ => return None,
            };
            log::trace!(
                "equi-join found: left column {} = right column {}",
                info.left_col_idx,
                info.right_col_idx
            );
            Some(info)
        }
        BoundExpr::And(left, right) => {
            analyze_equi_join(left).or_else(|| analyze_equi_join(right))
        }
        BoundExpr::Or(left, right) => match (analyze_equi_join(left), analyze_equi_join(right)) {
            (Some(left_info), Some(right_info)) if left_info == right_info => Some(left_info),
            _ => None,
        },
        _ => None,
    }
}
