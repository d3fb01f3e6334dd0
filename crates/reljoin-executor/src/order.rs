//! Sorting of result relations
//!
//! Joins promise no particular order for callers; a downstream sort makes
//! output deterministic for display.

use std::cmp::Ordering;

use reljoin_storage::Relation;
use reljoin_types::SqlValue;

use crate::errors::ExecutorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Placement of NULLs, independent of direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    First,
    Last,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub direction: SortDirection,
    pub nulls: NullOrdering,
}

impl SortKey {
    /// Ascending, NULLs first
    pub fn asc(column: impl Into<String>) -> Self {
        SortKey { column: column.into(), direction: SortDirection::Asc, nulls: NullOrdering::First }
    }

    pub fn asc_nulls_last(column: impl Into<String>) -> Self {
        SortKey { nulls: NullOrdering::Last, ..SortKey::asc(column) }
    }

    /// Descending, NULLs last
    pub fn desc(column: impl Into<String>) -> Self {
        SortKey { column: column.into(), direction: SortDirection::Desc, nulls: NullOrdering::Last }
    }

    pub fn desc_nulls_first(column: impl Into<String>) -> Self {
        SortKey { nulls: NullOrdering::First, ..SortKey::desc(column) }
    }
}

/// Stable sort of `relation` by `keys`, first key most significant.
///
/// NaN sorts above every other number, so it comes last ascending and first
/// descending; NaNs keep their input order among themselves.
pub fn sort_relation(relation: &Relation, keys: &[SortKey]) -> Result<Relation, ExecutorError> {
    let resolved = keys
        .iter()
        .map(|key| Ok((relation.schema().column_index(&key.column)?, key)))
        .collect::<Result<Vec<_>, ExecutorError>>()?;

    let rows = relation.rows();
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| {
        for (col_idx, key) in &resolved {
            let cmp = compare_for_sort(
                rows[a].get(*col_idx).unwrap_or(&SqlValue::Null),
                rows[b].get(*col_idx).unwrap_or(&SqlValue::Null),
                key,
            );
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        Ordering::Equal
    });

    Ok(relation.reordered(&order))
}

fn compare_for_sort(a: &SqlValue, b: &SqlValue, key: &SortKey) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => match key.nulls {
            NullOrdering::First => Ordering::Less,
            NullOrdering::Last => Ordering::Greater,
        },
        (false, true) => match key.nulls {
            NullOrdering::First => Ordering::Greater,
            NullOrdering::Last => Ordering::Less,
        },
        (false, false) => {
            let cmp = a.sql_cmp(b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()));
            match key.direction {
                SortDirection::Asc => cmp,
                SortDirection::Desc => cmp.reverse(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use reljoin_catalog::{ColumnSchema, TableSchema};
    use reljoin_types::DataType;

    use super::*;

    fn scores() -> Relation {
        let schema = TableSchema::new(
            "scores",
            vec![
                ColumnSchema::new("name", DataType::Varchar { max_length: None }, false),
                ColumnSchema::new("score", DataType::Integer, true),
            ],
        );
        let rows = [("a", Some(3)), ("b", None), ("c", Some(1)), ("d", Some(3))]
            .into_iter()
            .map(|(name, score)| {
                vec![SqlValue::varchar(name), score.map_or(SqlValue::Null, SqlValue::Integer)]
            })
            .collect();
        Relation::new(schema, rows).unwrap()
    }

    fn names(relation: &Relation) -> Vec<String> {
        relation.column_values("name").unwrap().iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_asc_puts_nulls_first() {
        let sorted = sort_relation(&scores(), &[SortKey::asc("score")]).unwrap();
        assert_eq!(names(&sorted), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_asc_nulls_last_is_stable() {
        let sorted = sort_relation(&scores(), &[SortKey::asc_nulls_last("score")]).unwrap();
        assert_eq!(names(&sorted), vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn test_desc_with_tiebreaker() {
        let sorted =
            sort_relation(&scores(), &[SortKey::desc("score"), SortKey::desc("name")]).unwrap();
        assert_eq!(names(&sorted), vec!["d", "a", "c", "b"]);

        let sorted = sort_relation(&scores(), &[SortKey::desc_nulls_first("score")]).unwrap();
        assert_eq!(names(&sorted), vec!["b", "a", "d", "c"]);
    }

    fn measurements() -> Relation {
        let schema = TableSchema::new(
            "measurements",
            vec![
                ColumnSchema::new("id", DataType::Integer, false),
                ColumnSchema::new("reading", DataType::DoublePrecision, true),
            ],
        );
        let rows = (0..200i64)
            .map(|id| {
                let reading = match id {
                    _ if id % 7 == 0 => SqlValue::Double(f64::NAN),
                    _ if id % 11 == 0 => SqlValue::Null,
                    _ => SqlValue::Double(((id * 37) % 101) as f64 - 50.0),
                };
                vec![SqlValue::Integer(id), reading]
            })
            .collect();
        Relation::new(schema, rows).unwrap()
    }

    fn readings(relation: &Relation) -> Vec<SqlValue> {
        relation.column_values("reading").unwrap().into_iter().cloned().collect()
    }

    #[test]
    fn test_nan_sorts_above_numbers() {
        let input = measurements();
        let nan_count = readings(&input).iter().filter(|v| v.is_nan()).count();
        let null_count = readings(&input).iter().filter(|v| v.is_null()).count();

        let ascending = readings(&sort_relation(&input, &[SortKey::asc("reading")]).unwrap());
        let (nulls, rest) = ascending.split_at(null_count);
        let (numbers, nans) = rest.split_at(rest.len() - nan_count);
        assert!(nulls.iter().all(SqlValue::is_null));
        assert!(nans.iter().all(SqlValue::is_nan));
        assert!(numbers.windows(2).all(|w| w[0].sql_cmp(&w[1]) != Some(Ordering::Greater)));

        let descending = readings(&sort_relation(&input, &[SortKey::desc("reading")]).unwrap());
        let (nans, rest) = descending.split_at(nan_count);
        let (numbers, nulls) = rest.split_at(rest.len() - null_count);
        assert!(nans.iter().all(SqlValue::is_nan));
        assert!(nulls.iter().all(SqlValue::is_null));
        assert!(numbers.windows(2).all(|w| w[0].sql_cmp(&w[1]) != Some(Ordering::Less)));
    }

    #[test]
    fn test_nan_rows_keep_input_order() {
        let sorted = sort_relation(&measurements(), &[SortKey::asc("reading")]).unwrap();
        let nan_ids: Vec<&SqlValue> = sorted
            .rows()
            .iter()
            .filter(|row| row.values()[1].is_nan())
            .map(|row| &row.values()[0])
            .collect();
        let expected: Vec<SqlValue> = (0..200i64).step_by(7).map(SqlValue::Integer).collect();
        assert_eq!(nan_ids, expected.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_unknown_sort_column() {
        let err = sort_relation(&scores(), &[SortKey::asc("rank")]).unwrap_err();
        assert!(matches!(err, ExecutorError::ColumnNotFound { .. }));
    }
}
