use reljoin_storage::Row;

use super::match_set::MatchSet;

/// Which unmatched rows an outer join preserves
#[derive(Debug, Clone, Copy)]
pub(super) struct Preserve {
    pub left: bool,
    pub right: bool,
}

/// LEFT / RIGHT / FULL OUTER JOIN row assembly
///
/// Rows are emitted in left-row order: each matched pair, or a single
/// null-extended row for an unmatched left row when the left side is
/// preserved. Unmatched right rows follow in right-row order when the right
/// side is preserved. Matched pairs are emitted exactly once.
pub(super) fn assemble_outer(
    left: &[Row],
    right: &[Row],
    matches: &MatchSet,
    preserve: Preserve,
    left_width: usize,
    right_width: usize,
) -> Vec<Row> {
    let mut result_rows = Vec::with_capacity(matches.pair_count() + left.len());

    for (i, left_row) in left.iter().enumerate() {
        let right_indices = matches.right_matches(i);
        if right_indices.is_empty() {
            if preserve.left {
                result_rows.push(Row::null_extend_right(left_row, right_width));
            }
            continue;
        }
        for &j in right_indices {
            result_rows.push(Row::concat(left_row, &right[j]));
        }
    }

    if preserve.right {
        for (j, right_row) in right.iter().enumerate() {
            if !matches.has_left_match(j) {
                result_rows.push(Row::null_extend_left(left_width, right_row));
            }
        }
    }

    result_rows
}
