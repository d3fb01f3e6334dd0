use reljoin_storage::Row;

use super::match_set::MatchSet;

/// INNER JOIN row assembly
///
/// One concatenated row per matched pair, left-major. Unmatched rows on
/// either side are dropped.
pub(super) fn assemble_inner(left: &[Row], right: &[Row], matches: &MatchSet) -> Vec<Row> {
    let mut result_rows = Vec::with_capacity(matches.pair_count());
    for (i, left_row) in left.iter().enumerate() {
        for &j in matches.right_matches(i) {
            result_rows.push(Row::concat(left_row, &right[j]));
        }
    }
    result_rows
}

/// CROSS JOIN row assembly: every left row with every right row, left-major.
///
/// Needs no match set, since every pair qualifies.
pub(super) fn assemble_cross(left: &[Row], right: &[Row]) -> Vec<Row> {
    let mut result_rows = Vec::with_capacity(left.len().saturating_mul(right.len()));
    for left_row in left {
        for right_row in right {
            result_rows.push(Row::concat(left_row, right_row));
        }
    }
    result_rows
}
