//! SQL comparison semantics for SqlValue
//!
//! Both operations return `None` for SQL UNKNOWN:
//! - either operand is NULL
//! - the operands belong to incomparable types
//! - a floating point operand is NaN

use std::cmp::Ordering;

use super::SqlValue;

impl SqlValue {
    /// SQL ordering between two values.
    ///
    /// Exact numerics compare across widths, approximate numerics compare with
    /// each other and with exact numerics, and CHAR/VARCHAR compare as text.
    pub fn sql_cmp(&self, other: &SqlValue) -> Option<Ordering> {
        use SqlValue::*;

        if self.is_null() || other.is_null() {
            return None;
        }

        if let (Some(a), Some(b)) = (self.as_exact(), other.as_exact()) {
            return Some(a.cmp(&b));
        }
        if let (Some(a), Some(b)) = (self.as_numeric(), other.as_numeric()) {
            return a.partial_cmp(&b);
        }
        if let (Some(a), Some(b)) = (self.as_text(), other.as_text()) {
            return Some(a.cmp(b));
        }

        match (self, other) {
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Date(a), Date(b)) => Some(a.cmp(b)),
            (Timestamp(a), Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// SQL equality: `Some(true)` only when both values are non-NULL and equal.
    pub fn sql_eq(&self, other: &SqlValue) -> Option<bool> {
        self.sql_cmp(other).map(|ordering| ordering == Ordering::Equal)
    }

    fn as_numeric(&self) -> Option<f64> {
        self.as_approximate().or_else(|| self.as_exact().map(|i| i as f64))
    }
}
