//! Hashable key representation for SqlValue
//!
//! `SqlValue` itself is not `Eq`/`Hash` because floating point values and
//! NULL do not have a lawful equality. Join indexes hash `KeyValue`s instead.

use chrono::{NaiveDate, NaiveDateTime};

use super::SqlValue;

/// A normalized, hashable form of a non-NULL value.
///
/// Two values that are SQL-equal and belong to the same type family map to
/// the same `KeyValue`: every exact numeric widens to `i64`, every approximate
/// numeric widens to `f64`, and CHAR/VARCHAR share the text representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyValue {
    Exact(i64),
    /// Bit pattern of a non-NaN `f64`, with `-0.0` folded into `0.0`
    Approximate(u64),
    Text(String),
    Boolean(bool),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl SqlValue {
    /// Normalized hash key for this value.
    ///
    /// Returns `None` for NULL and NaN, which never compare equal to anything
    /// and therefore must never be found through an index.
    pub fn to_key(&self) -> Option<KeyValue> {
        if let Some(i) = self.as_exact() {
            return Some(KeyValue::Exact(i));
        }
        if let Some(f) = self.as_approximate() {
            if f.is_nan() {
                return None;
            }
            let f = if f == 0.0 { 0.0 } else { f };
            return Some(KeyValue::Approximate(f.to_bits()));
        }
        if let Some(s) = self.as_text() {
            return Some(KeyValue::Text(s.to_string()));
        }
        match self {
            SqlValue::Boolean(b) => Some(KeyValue::Boolean(*b)),
            SqlValue::Date(d) => Some(KeyValue::Date(*d)),
            SqlValue::Timestamp(ts) => Some(KeyValue::Timestamp(*ts)),
            _ => None,
        }
    }
}
