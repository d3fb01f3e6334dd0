//! Join predicate binding and evaluation
//!
//! A condition is bound once against the left and right schemas before any
//! row is read. Binding resolves every column reference to a position and
//! checks that compared types are comparable, so evaluation itself cannot
//! fail.
//!
//! Evaluation follows SQL three-valued logic. A pair of rows matches only
//! when the predicate is TRUE; FALSE and UNKNOWN both reject.

use std::borrow::Cow;

use reljoin_catalog::TableSchema;
use reljoin_storage::Row;
use reljoin_types::{DataType, SqlValue};

use crate::{
    errors::ExecutorError,
    expression::{CompareOp, Expression, Side},
    join_analyzer::{self, EquiJoinInfo},
};

/// Expression with column references resolved to row positions
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BoundExpr {
    Column { side: Side, index: usize, data_type: DataType },
    Literal(SqlValue),
    Compare { op: CompareOp, left: Box<BoundExpr>, right: Box<BoundExpr> },
    And(Box<BoundExpr>, Box<BoundExpr>),
    Or(Box<BoundExpr>, Box<BoundExpr>),
    Not(Box<BoundExpr>),
    IsNull(Box<BoundExpr>),
}

/// Static type of a bound expression, as far as binding needs to know it
#[derive(Debug, Clone, PartialEq)]
enum ExprType {
    /// Untyped NULL literal: compatible with everything
    Unknown,
    Value(DataType),
}

impl ExprType {
    fn describe(&self) -> String {
        match self {
            ExprType::Unknown => "NULL".to_string(),
            ExprType::Value(data_type) => data_type.to_string(),
        }
    }

    fn is_boolean(&self) -> bool {
        matches!(self, ExprType::Unknown | ExprType::Value(DataType::Boolean))
    }
}

/// A join condition bound to a pair of schemas.
///
/// `None` conditions (cross join) are always satisfied.
#[derive(Debug, Clone)]
pub struct BoundPredicate {
    expr: Option<BoundExpr>,
    equi_join: Option<EquiJoinInfo>,
}

impl BoundPredicate {
    /// The predicate that accepts every pair of rows
    pub fn always() -> Self {
        BoundPredicate { expr: None, equi_join: None }
    }

    /// Bind `condition` against the two input schemas.
    ///
    /// Fails with `ColumnNotFound` for unknown columns and `TypeMismatch` for
    /// comparisons between incomparable types or a non-boolean condition.
    pub fn bind(
        condition: Option<&Expression>,
        left: &TableSchema,
        right: &TableSchema,
    ) -> Result<Self, ExecutorError> {
        let Some(condition) = condition else {
            return Ok(BoundPredicate::always());
        };

        let binder = Binder { left, right };
        let (expr, expr_type) = binder.bind(condition)?;
        if !expr_type.is_boolean() {
            return Err(ExecutorError::TypeMismatch {
                left: condition.to_string(),
                op: "used as join condition of type".to_string(),
                right: expr_type.describe(),
            });
        }

        let equi_join = join_analyzer::analyze_equi_join(&expr);
        Ok(BoundPredicate { expr: Some(expr), equi_join })
    }

    /// Evaluate the predicate for one (left, right) pair.
    pub fn evaluate(&self, left: &Row, right: &Row) -> bool {
        match &self.expr {
            Some(expr) => expr.truth(left, right) == Some(true),
            None => true,
        }
    }

    /// Equality between a left and a right column usable for a hash index, if any
    pub fn equi_join(&self) -> Option<&EquiJoinInfo> {
        self.equi_join.as_ref()
    }

    /// True when there is no condition at all
    pub fn is_unconditional(&self) -> bool {
        self.expr.is_none()
    }
}

struct Binder<'a> {
    left: &'a TableSchema,
    right: &'a TableSchema,
}

impl Binder<'_> {
    fn bind(&self, expr: &Expression) -> Result<(BoundExpr, ExprType), ExecutorError> {
        match expr {
            Expression::Column(column) => {
                let schema = match column.side {
                    Side::Left => self.left,
                    Side::Right => self.right,
                };
                let index = schema.get_column_index(&column.name).ok_or_else(|| {
                    ExecutorError::ColumnNotFound {
                        column: column.to_string(),
                        available: schema
                            .columns
                            .iter()
                            .map(|c| format!("{}.{}", column.side, c.name))
                            .collect(),
                    }
                })?;
                let data_type = schema.columns[index].data_type.clone();
                Ok((
                    BoundExpr::Column { side: column.side, index, data_type: data_type.clone() },
                    ExprType::Value(data_type),
                ))
            }
            Expression::Literal(value) => {
                let expr_type = value.data_type().map_or(ExprType::Unknown, ExprType::Value);
                Ok((BoundExpr::Literal(value.clone()), expr_type))
            }
            Expression::Compare { op, left, right } => {
                let (left_bound, left_type) = self.bind(left)?;
                let (right_bound, right_type) = self.bind(right)?;
                if let (ExprType::Value(a), ExprType::Value(b)) = (&left_type, &right_type) {
                    if !a.is_comparable_with(b) {
                        return Err(ExecutorError::TypeMismatch {
                            left: format!("{} ({})", left, a),
                            op: op.symbol().to_string(),
                            right: format!("{} ({})", right, b),
                        });
                    }
                }
                Ok((
                    BoundExpr::Compare {
                        op: *op,
                        left: Box::new(left_bound),
                        right: Box::new(right_bound),
                    },
                    ExprType::Value(DataType::Boolean),
                ))
            }
            Expression::And(left, right) => {
                let (left, right) = self.bind_logical("AND", left, right)?;
                Ok((BoundExpr::And(left, right), ExprType::Value(DataType::Boolean)))
            }
            Expression::Or(left, right) => {
                let (left, right) = self.bind_logical("OR", left, right)?;
                Ok((BoundExpr::Or(left, right), ExprType::Value(DataType::Boolean)))
            }
            Expression::Not(inner) => {
                let (bound, inner_type) = self.bind(inner)?;
                if !inner_type.is_boolean() {
                    return Err(ExecutorError::TypeMismatch {
                        left: String::new(),
                        op: "NOT".to_string(),
                        right: format!("{} ({})", inner, inner_type.describe()),
                    });
                }
                Ok((BoundExpr::Not(Box::new(bound)), ExprType::Value(DataType::Boolean)))
            }
            Expression::IsNull(inner) => {
                let (bound, _) = self.bind(inner)?;
                Ok((BoundExpr::IsNull(Box::new(bound)), ExprType::Value(DataType::Boolean)))
            }
        }
    }

    fn bind_logical(
        &self,
        op: &str,
        left: &Expression,
        right: &Expression,
    ) -> Result<(Box<BoundExpr>, Box<BoundExpr>), ExecutorError> {
        let (left_bound, left_type) = self.bind(left)?;
        let (right_bound, right_type) = self.bind(right)?;
        if !left_type.is_boolean() || !right_type.is_boolean() {
            return Err(ExecutorError::TypeMismatch {
                left: format!("{} ({})", left, left_type.describe()),
                op: op.to_string(),
                right: format!("{} ({})", right, right_type.describe()),
            });
        }
        Ok((Box::new(left_bound), Box::new(right_bound)))
    }
}

impl BoundExpr {
    /// Scalar value of this expression; boolean sub-expressions become
    /// BOOLEAN or NULL.
    fn value<'a>(&'a self, left: &'a Row, right: &'a Row) -> Cow<'a, SqlValue> {
        match self {
            BoundExpr::Column { side, index, .. } => {
                let row = match side {
                    Side::Left => left,
                    Side::Right => right,
                };
                row.get(*index).map_or(Cow::Owned(SqlValue::Null), Cow::Borrowed)
            }
            BoundExpr::Literal(value) => Cow::Borrowed(value),
            _ => Cow::Owned(match self.truth(left, right) {
                Some(b) => SqlValue::Boolean(b),
                None => SqlValue::Null,
            }),
        }
    }

    /// Three-valued truth: `None` is UNKNOWN.
    fn truth(&self, left: &Row, right: &Row) -> Option<bool> {
        match self {
            BoundExpr::Compare { op, left: a, right: b } => {
                let a = a.value(left, right);
                let b = b.value(left, right);
                a.sql_cmp(&b).map(|ordering| op.holds(ordering))
            }
            BoundExpr::And(a, b) => match a.truth(left, right) {
                Some(false) => Some(false),
                first => match (first, b.truth(left, right)) {
                    (_, Some(false)) => Some(false),
                    (Some(true), Some(true)) => Some(true),
                    _ => None,
                },
            },
            BoundExpr::Or(a, b) => match a.truth(left, right) {
                Some(true) => Some(true),
                first => match (first, b.truth(left, right)) {
                    (_, Some(true)) => Some(true),
                    (Some(false), Some(false)) => Some(false),
                    _ => None,
                },
            },
            BoundExpr::Not(inner) => inner.truth(left, right).map(|b| !b),
            BoundExpr::IsNull(inner) => Some(inner.value(left, right).is_null()),
            BoundExpr::Column { .. } | BoundExpr::Literal(_) => {
                match self.value(left, right).as_ref() {
                    SqlValue::Boolean(b) => Some(*b),
                    _ => None,
                }
            }
        }
    }
}
