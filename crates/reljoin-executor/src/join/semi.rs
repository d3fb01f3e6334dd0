use reljoin_storage::Row;

use super::match_set::MatchSet;

/// LEFT SEMI / LEFT ANTI JOIN row assembly
///
/// Emits each left row at most once, unmodified: the rows with at least one
/// match when `keep_matched` is set (semi), the rows with none otherwise
/// (anti). The two outputs partition the left relation.
pub(super) fn assemble_semi(left: &[Row], matches: &MatchSet, keep_matched: bool) -> Vec<Row> {
    left.iter()
        .enumerate()
        .filter(|(i, _)| matches.has_right_match(*i) == keep_matched)
        .map(|(_, row)| row.clone())
        .collect()
}
