//! Join condition expressions
//!
//! Column references are always qualified by the side of the join they come
//! from. Two relations may both have a `DeptID` column; `left.DeptID` and
//! `right.DeptID` are never confused, and nothing is inferred from position.

use std::{cmp::Ordering, fmt};

use reljoin_types::SqlValue;

/// Which input of a two-relation join a column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A side-qualified column identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub side: Side,
    pub name: String,
}

impl ColumnRef {
    pub fn new(side: Side, name: impl Into<String>) -> Self {
        ColumnRef { side, name: name.into() }
    }

    pub fn left(name: impl Into<String>) -> Self {
        ColumnRef::new(Side::Left, name)
    }

    pub fn right(name: impl Into<String>) -> Self {
        ColumnRef::new(Side::Right, name)
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.side, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CompareOp {
    /// Whether an ordering between the operands satisfies this operator
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            CompareOp::Eq => ordering == Ordering::Equal,
            CompareOp::NotEq => ordering != Ordering::Equal,
            CompareOp::Lt => ordering == Ordering::Less,
            CompareOp::LtEq => ordering != Ordering::Greater,
            CompareOp::Gt => ordering == Ordering::Greater,
            CompareOp::GtEq => ordering != Ordering::Less,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::NotEq => "<>",
            CompareOp::Lt => "<",
            CompareOp::LtEq => "<=",
            CompareOp::Gt => ">",
            CompareOp::GtEq => ">=",
        }
    }
}

/// Boolean (or scalar) expression over one left row and one right row.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Column(ColumnRef),
    Literal(SqlValue),
    Compare { op: CompareOp, left: Box<Expression>, right: Box<Expression> },
    And(Box<Expression>, Box<Expression>),
    Or(Box<Expression>, Box<Expression>),
    Not(Box<Expression>),
    IsNull(Box<Expression>),
}

/// Column reference expression
pub fn col(side: Side, name: impl Into<String>) -> Expression {
    Expression::Column(ColumnRef::new(side, name))
}

/// Literal value expression
pub fn lit(value: SqlValue) -> Expression {
    Expression::Literal(value)
}

/// `left.<left_column> = right.<right_column>`, the common equi-join condition
pub fn equi_join(left_column: impl Into<String>, right_column: impl Into<String>) -> Expression {
    col(Side::Left, left_column).eq(col(Side::Right, right_column))
}

impl Expression {
    fn compare(self, op: CompareOp, other: Expression) -> Expression {
        Expression::Compare { op, left: Box::new(self), right: Box::new(other) }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn eq(self, other: Expression) -> Expression {
        self.compare(CompareOp::Eq, other)
    }

    pub fn not_eq(self, other: Expression) -> Expression {
        self.compare(CompareOp::NotEq, other)
    }

    pub fn lt(self, other: Expression) -> Expression {
        self.compare(CompareOp::Lt, other)
    }

    pub fn lt_eq(self, other: Expression) -> Expression {
        self.compare(CompareOp::LtEq, other)
    }

    pub fn gt(self, other: Expression) -> Expression {
        self.compare(CompareOp::Gt, other)
    }

    pub fn gt_eq(self, other: Expression) -> Expression {
        self.compare(CompareOp::GtEq, other)
    }

    pub fn and(self, other: Expression) -> Expression {
        Expression::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Expression) -> Expression {
        Expression::Or(Box::new(self), Box::new(other))
    }

    pub fn is_null(self) -> Expression {
        Expression::IsNull(Box::new(self))
    }
}

impl std::ops::Not for Expression {
    type Output = Expression;

    fn not(self) -> Expression {
        Expression::Not(Box::new(self))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Column(column) => write!(f, "{}", column),
            Expression::Literal(SqlValue::Character(s) | SqlValue::Varchar(s)) => {
                write!(f, "'{}'", s)
            }
            Expression::Literal(value) => write!(f, "{}", value),
            Expression::Compare { op, left, right } => {
                write!(f, "{} {} {}", left, op.symbol(), right)
            }
            Expression::And(left, right) => write!(f, "({} AND {})", left, right),
            Expression::Or(left, right) => write!(f, "({} OR {})", left, right),
            Expression::Not(inner) => write!(f, "NOT {}", inner),
            Expression::IsNull(inner) => write!(f, "{} IS NULL", inner),
        }
    }
}
