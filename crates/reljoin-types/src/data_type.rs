//! SQL Data Type definitions

use std::fmt;

use crate::SqlValue;

/// Declared type of a column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    // Exact numeric types
    Smallint,
    Integer,
    Bigint,

    // Approximate numeric types
    Real,
    DoublePrecision,

    // Character string types
    Character { length: usize },
    Varchar { max_length: Option<usize> }, // None = unbounded

    Boolean,

    // Date/time types
    Date,
    Timestamp,
}

/// Comparison family of a type. Values from the same family can be compared
/// with each other regardless of declared width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeFamily {
    Exact,
    Approximate,
    Text,
    Boolean,
    Date,
    Timestamp,
}

impl DataType {
    fn family(&self) -> TypeFamily {
        match self {
            DataType::Smallint | DataType::Integer | DataType::Bigint => TypeFamily::Exact,
            DataType::Real | DataType::DoublePrecision => TypeFamily::Approximate,
            DataType::Character { .. } | DataType::Varchar { .. } => TypeFamily::Text,
            DataType::Boolean => TypeFamily::Boolean,
            DataType::Date => TypeFamily::Date,
            DataType::Timestamp => TypeFamily::Timestamp,
        }
    }

    /// Check if this type is numeric (exact or approximate)
    pub fn is_numeric(&self) -> bool {
        matches!(self.family(), TypeFamily::Exact | TypeFamily::Approximate)
    }

    /// Check whether values of this type can be compared with values of `other`.
    ///
    /// All numeric types compare with each other, character types compare with
    /// each other, and every other type only compares with itself.
    pub fn is_comparable_with(&self, other: &DataType) -> bool {
        if self.is_numeric() && other.is_numeric() {
            return true;
        }
        self.family() == other.family()
    }

    /// Check whether two types hash to the same key space, so an equality
    /// between them can be answered from a hash index.
    ///
    /// Mixed exact/approximate comparisons are excluded: `1 = 1.0` holds, but
    /// the two sides do not share a hash representation.
    pub fn shares_hash_domain_with(&self, other: &DataType) -> bool {
        self.family() == other.family()
    }

    /// Check whether a non-NULL value may be stored in a column of this type.
    ///
    /// Narrower integer widths widen into wider ones, REAL widens into DOUBLE
    /// PRECISION, and strings must fit the declared length. NULL is handled by
    /// the column's nullable flag, not here.
    pub fn accepts(&self, value: &SqlValue) -> bool {
        match (self, value) {
            (_, SqlValue::Null) => false,

            (DataType::Smallint, SqlValue::Smallint(_)) => true,
            (DataType::Integer, SqlValue::Smallint(_) | SqlValue::Integer(_)) => true,
            (
                DataType::Bigint,
                SqlValue::Smallint(_) | SqlValue::Integer(_) | SqlValue::Bigint(_),
            ) => true,

            (DataType::Real, SqlValue::Real(_)) => true,
            (DataType::DoublePrecision, SqlValue::Real(_) | SqlValue::Double(_)) => true,

            (DataType::Character { length }, SqlValue::Character(s) | SqlValue::Varchar(s)) => {
                s.chars().count() <= *length
            }
            (
                DataType::Varchar { max_length },
                SqlValue::Character(s) | SqlValue::Varchar(s),
            ) => max_length.map_or(true, |max| s.chars().count() <= max),

            (DataType::Boolean, SqlValue::Boolean(_)) => true,
            (DataType::Date, SqlValue::Date(_)) => true,
            (DataType::Timestamp, SqlValue::Timestamp(_)) => true,

            _ => false,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Smallint => write!(f, "SMALLINT"),
            DataType::Integer => write!(f, "INTEGER"),
            DataType::Bigint => write!(f, "BIGINT"),
            DataType::Real => write!(f, "REAL"),
            DataType::DoublePrecision => write!(f, "DOUBLE PRECISION"),
            DataType::Character { length } => write!(f, "CHAR({})", length),
            DataType::Varchar { max_length: Some(n) } => write!(f, "VARCHAR({})", n),
            DataType::Varchar { max_length: None } => write!(f, "VARCHAR"),
            DataType::Boolean => write!(f, "BOOLEAN"),
            DataType::Date => write!(f, "DATE"),
            DataType::Timestamp => write!(f, "TIMESTAMP"),
        }
    }
}
