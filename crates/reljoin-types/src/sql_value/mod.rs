//! SQL Value runtime representation

mod comparison;
mod display;
mod hash;

use chrono::{NaiveDate, NaiveDateTime};

pub use hash::KeyValue;

use crate::DataType;

/// SQL Values - runtime representation of data
///
/// Represents actual values in SQL, including NULL. `PartialEq` is structural
/// (NULL equals NULL) and is meant for tests and bookkeeping; SQL comparison
/// semantics live in [`SqlValue::sql_eq`] and [`SqlValue::sql_cmp`].
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Smallint(i16),
    Integer(i64),
    Bigint(i64),

    Real(f32),
    Double(f64),

    Character(String),
    Varchar(String),

    Boolean(bool),

    Date(NaiveDate),
    Timestamp(NaiveDateTime),

    Null,
}

impl SqlValue {
    /// Check if this value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Check if this value is an approximate numeric NaN
    pub fn is_nan(&self) -> bool {
        self.as_approximate().is_some_and(f64::is_nan)
    }

    /// Get the type name as a string (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Smallint(_) => "SMALLINT",
            SqlValue::Integer(_) => "INTEGER",
            SqlValue::Bigint(_) => "BIGINT",
            SqlValue::Real(_) => "REAL",
            SqlValue::Double(_) => "DOUBLE PRECISION",
            SqlValue::Character(_) => "CHAR",
            SqlValue::Varchar(_) => "VARCHAR",
            SqlValue::Boolean(_) => "BOOLEAN",
            SqlValue::Date(_) => "DATE",
            SqlValue::Timestamp(_) => "TIMESTAMP",
            SqlValue::Null => "NULL",
        }
    }

    /// Get the data type of this value, or None for NULL
    pub fn data_type(&self) -> Option<DataType> {
        let data_type = match self {
            SqlValue::Smallint(_) => DataType::Smallint,
            SqlValue::Integer(_) => DataType::Integer,
            SqlValue::Bigint(_) => DataType::Bigint,
            SqlValue::Real(_) => DataType::Real,
            SqlValue::Double(_) => DataType::DoublePrecision,
            SqlValue::Character(s) => DataType::Character { length: s.chars().count() },
            SqlValue::Varchar(_) => DataType::Varchar { max_length: None },
            SqlValue::Boolean(_) => DataType::Boolean,
            SqlValue::Date(_) => DataType::Date,
            SqlValue::Timestamp(_) => DataType::Timestamp,
            SqlValue::Null => return None,
        };
        Some(data_type)
    }

    /// Convenience constructor for VARCHAR values
    pub fn varchar(s: impl Into<String>) -> Self {
        SqlValue::Varchar(s.into())
    }

    fn as_exact(&self) -> Option<i64> {
        match self {
            SqlValue::Smallint(i) => Some(i64::from(*i)),
            SqlValue::Integer(i) | SqlValue::Bigint(i) => Some(*i),
            _ => None,
        }
    }

    fn as_approximate(&self) -> Option<f64> {
        match self {
            SqlValue::Real(f) => Some(f64::from(*f)),
            SqlValue::Double(f) => Some(*f),
            _ => None,
        }
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Character(s) | SqlValue::Varchar(s) => Some(s),
            _ => None,
        }
    }
}
