//! Match-set construction
//!
//! For every left row, the ascending list of right row indices that satisfy
//! the join predicate, plus the reverse "does any left row match" flag per
//! right row. Every algorithm below produces the same match set; they differ
//! only in how candidate pairs are found.
//!
//! - Nested loop: every (left, right) pair is evaluated.
//! - Hash: an index over the equi-join column of one side yields candidates,
//!   and the full predicate is evaluated for each candidate pair.
//! - Parallel (feature `parallel`): left rows are split across rayon workers
//!   and the per-row results are collected back in left-row order.

use std::collections::HashMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use reljoin_storage::Row;
use reljoin_types::{KeyValue, SqlValue};

#[cfg(feature = "parallel")]
use crate::parallel::ParallelConfig;
use crate::{
    config::{JoinConfig, JoinStrategy},
    join_analyzer::EquiJoinInfo,
    predicate::BoundPredicate,
};

/// Under `JoinStrategy::Auto`, inputs with at most this many candidate pairs
/// are matched with a nested loop.
const NESTED_LOOP_MAX_PAIRS: usize = 64;

/// Minimum left rows handed to one parallel worker
#[cfg(feature = "parallel")]
const MIN_ROWS_PER_TASK: usize = 256;

/// Join key to ascending row indices
type HashIndex = HashMap<KeyValue, Vec<usize>>;

/// How many matches per left row are needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Every matching right row
    All,
    /// Only the first matching right row; enough for semi and anti joins
    FirstOnly,
}

/// Algorithm used to find candidate pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAlgorithm {
    NestedLoop,
    /// Index built over the right relation, probed with each left row
    HashBuildRight,
    /// Index built over the left relation, probed with each right row
    HashBuildLeft,
}

#[derive(Debug, Clone)]
pub struct MatchSet {
    right_matches: Vec<Vec<usize>>,
    has_left_match: Vec<bool>,
    algorithm: MatchAlgorithm,
    parallel: bool,
}

impl MatchSet {
    /// Compute the match set of `predicate` over `left` x `right`.
    ///
    /// In [`MatchMode::FirstOnly`] each left row keeps at most one match and
    /// `has_left_match` only reflects those kept matches.
    pub fn build(
        left: &[Row],
        right: &[Row],
        predicate: &BoundPredicate,
        mode: MatchMode,
        config: &JoinConfig,
    ) -> Self {
        let parallel = should_parallelize(left.len(), config);
        let algorithm =
            choose_algorithm(left.len(), right.len(), predicate.equi_join(), config, parallel);

        log::debug!(
            "building match set: {:?} over {} x {} rows (parallel: {})",
            algorithm,
            left.len(),
            right.len(),
            parallel
        );

        let right_matches = match (algorithm, predicate.equi_join()) {
            (MatchAlgorithm::HashBuildRight, Some(info)) => {
                let index = build_hash_index(right, info.right_col_idx, parallel);
                let probe = Probe::Index { index: &index, left_col: info.left_col_idx };
                probe_left_rows(left, right, predicate, &probe, mode, parallel)
            }
            (MatchAlgorithm::HashBuildLeft, Some(info)) => {
                probe_right_rows(left, right, predicate, info, mode)
            }
            _ => probe_left_rows(left, right, predicate, &Probe::Scan, mode, parallel),
        };

        let mut has_left_match = vec![false; right.len()];
        for &j in right_matches.iter().flatten() {
            has_left_match[j] = true;
        }

        MatchSet { right_matches, has_left_match, algorithm, parallel }
    }

    /// Right row indices matching left row `left_idx`, ascending
    pub fn right_matches(&self, left_idx: usize) -> &[usize] {
        self.right_matches.get(left_idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether left row `left_idx` matched at least one right row
    pub fn has_right_match(&self, left_idx: usize) -> bool {
        !self.right_matches(left_idx).is_empty()
    }

    /// Whether right row `right_idx` matched at least one left row
    pub fn has_left_match(&self, right_idx: usize) -> bool {
        self.has_left_match.get(right_idx).copied().unwrap_or(false)
    }

    /// Number of matched (left, right) pairs
    pub fn pair_count(&self) -> usize {
        self.right_matches.iter().map(Vec::len).sum()
    }

    pub fn left_len(&self) -> usize {
        self.right_matches.len()
    }

    pub fn right_len(&self) -> usize {
        self.has_left_match.len()
    }

    pub fn algorithm(&self) -> MatchAlgorithm {
        self.algorithm
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }
}

fn choose_algorithm(
    left_len: usize,
    right_len: usize,
    equi_join: Option<&EquiJoinInfo>,
    config: &JoinConfig,
    parallel: bool,
) -> MatchAlgorithm {
    if equi_join.is_none() {
        return MatchAlgorithm::NestedLoop;
    }
    match config.strategy {
        JoinStrategy::NestedLoop => MatchAlgorithm::NestedLoop,
        JoinStrategy::Auto if left_len.saturating_mul(right_len) <= NESTED_LOOP_MAX_PAIRS => {
            MatchAlgorithm::NestedLoop
        }
        // Parallel workers partition the left side, so they share an index over the right
        JoinStrategy::Auto | JoinStrategy::Hash if parallel || right_len <= left_len => {
            MatchAlgorithm::HashBuildRight
        }
        JoinStrategy::Auto | JoinStrategy::Hash => MatchAlgorithm::HashBuildLeft,
    }
}

#[cfg(feature = "parallel")]
fn should_parallelize(left_len: usize, config: &JoinConfig) -> bool {
    match config.parallel_threshold {
        Some(threshold) => left_len >= threshold,
        None => ParallelConfig::global().should_parallelize_join(left_len),
    }
}

#[cfg(not(feature = "parallel"))]
fn should_parallelize(_left_len: usize, _config: &JoinConfig) -> bool {
    false
}

/// Where candidate right rows for one left row come from
enum Probe<'a> {
    Scan,
    Index { index: &'a HashIndex, left_col: usize },
}

fn probe_left_rows(
    left: &[Row],
    right: &[Row],
    predicate: &BoundPredicate,
    probe: &Probe<'_>,
    mode: MatchMode,
    parallel: bool,
) -> Vec<Vec<usize>> {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return left
                .par_iter()
                .with_min_len(MIN_ROWS_PER_TASK)
                .map(|row| match_left_row(row, right, predicate, probe, mode))
                .collect();
        }
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    left.iter().map(|row| match_left_row(row, right, predicate, probe, mode)).collect()
}

fn match_left_row(
    left_row: &Row,
    right: &[Row],
    predicate: &BoundPredicate,
    probe: &Probe<'_>,
    mode: MatchMode,
) -> Vec<usize> {
    match probe {
        Probe::Scan => collect_matches(left_row, right, predicate, 0..right.len(), mode),
        Probe::Index { index, left_col } => left_row
            .get(*left_col)
            .and_then(SqlValue::to_key)
            .and_then(|key| index.get(&key))
            .map(|candidates| {
                collect_matches(left_row, right, predicate, candidates.iter().copied(), mode)
            })
            .unwrap_or_default(),
    }
}

fn collect_matches(
    left_row: &Row,
    right: &[Row],
    predicate: &BoundPredicate,
    candidates: impl Iterator<Item = usize>,
    mode: MatchMode,
) -> Vec<usize> {
    let mut matches = Vec::new();
    for j in candidates {
        if predicate.evaluate(left_row, &right[j]) {
            matches.push(j);
            if mode == MatchMode::FirstOnly {
                break;
            }
        }
    }
    matches
}

/// Index the left relation and stream the right relation past it.
///
/// Right rows are visited in order, so every per-left-row list stays ascending.
fn probe_right_rows(
    left: &[Row],
    right: &[Row],
    predicate: &BoundPredicate,
    info: &EquiJoinInfo,
    mode: MatchMode,
) -> Vec<Vec<usize>> {
    let index = build_hash_index_sequential(left, info.left_col_idx);
    let mut right_matches = vec![Vec::new(); left.len()];

    for (j, right_row) in right.iter().enumerate() {
        let Some(candidates) = right_row
            .get(info.right_col_idx)
            .and_then(SqlValue::to_key)
            .and_then(|key| index.get(&key))
        else {
            continue;
        };
        for &i in candidates {
            if mode == MatchMode::FirstOnly && !right_matches[i].is_empty() {
                continue;
            }
            if predicate.evaluate(&left[i], right_row) {
                right_matches[i].push(j);
            }
        }
    }

    right_matches
}

fn build_hash_index(rows: &[Row], col_idx: usize, parallel: bool) -> HashIndex {
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return build_hash_index_parallel(rows, col_idx);
        }
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    build_hash_index_sequential(rows, col_idx)
}

/// NULL and NaN keys never equal anything and are left out of the index.
fn build_hash_index_sequential(rows: &[Row], col_idx: usize) -> HashIndex {
    let mut index: HashIndex = HashMap::new();
    for (idx, row) in rows.iter().enumerate() {
        if let Some(key) = row.get(col_idx).and_then(SqlValue::to_key) {
            index.entry(key).or_default().push(idx);
        }
    }
    index
}

/// Build the index in parallel using a partitioned approach
///
/// 1. Split rows into chunks, one local table per chunk
/// 2. Merge the local tables in chunk order so index lists stay ascending
#[cfg(feature = "parallel")]
fn build_hash_index_parallel(rows: &[Row], col_idx: usize) -> HashIndex {
    let chunk_size = (rows.len() / ParallelConfig::global().num_threads.max(1)).max(1000);
    let partial_tables: Vec<HashIndex> = rows
        .par_chunks(chunk_size)
        .enumerate()
        .map(|(chunk_idx, chunk)| {
            let base_idx = chunk_idx * chunk_size;
            let mut local: HashIndex = HashMap::new();
            for (i, row) in chunk.iter().enumerate() {
                if let Some(key) = row.get(col_idx).and_then(SqlValue::to_key) {
                    local.entry(key).or_default().push(base_idx + i);
                }
            }
            local
        })
        .collect();

    partial_tables.into_iter().fold(HashMap::new(), |mut acc, partial| {
        for (key, mut indices) in partial {
            acc.entry(key).or_default().append(&mut indices);
        }
        acc
    })
}

#[cfg(test)]
mod tests {
    use reljoin_catalog::{ColumnSchema, TableSchema};
    use reljoin_types::DataType;

    use super::*;
    use crate::expression::{col, equi_join, lit, Side};

    fn schema(name: &str) -> TableSchema {
        TableSchema::new(
            name,
            vec![
                ColumnSchema::new("k", DataType::Integer, true),
                ColumnSchema::new("v", DataType::Integer, true),
            ],
        )
    }

    fn rows(values: &[(Option<i64>, i64)]) -> Vec<Row> {
        values
            .iter()
            .map(|(k, v)| {
                Row::try_new(
                    &schema("t"),
                    vec![k.map_or(SqlValue::Null, SqlValue::Integer), SqlValue::Integer(*v)],
                )
                .unwrap()
            })
            .collect()
    }

    fn key_predicate() -> BoundPredicate {
        BoundPredicate::bind(Some(&equi_join("k", "k")), &schema("l"), &schema("r")).unwrap()
    }

    fn sequential(strategy: JoinStrategy) -> JoinConfig {
        JoinConfig::default().with_strategy(strategy).with_parallel_threshold(usize::MAX)
    }

    fn all_matches(set: &MatchSet) -> Vec<Vec<usize>> {
        (0..set.left_len()).map(|i| set.right_matches(i).to_vec()).collect()
    }

    #[test]
    fn test_nested_loop_matches() {
        let left = rows(&[(Some(1), 0), (Some(2), 0), (None, 0)]);
        let right = rows(&[(Some(2), 0), (Some(1), 0), (Some(2), 0), (None, 0)]);
        let set = MatchSet::build(
            &left,
            &right,
            &key_predicate(),
            MatchMode::All,
            &sequential(JoinStrategy::NestedLoop),
        );

        assert_eq!(set.algorithm(), MatchAlgorithm::NestedLoop);
        assert_eq!(all_matches(&set), vec![vec![1], vec![0, 2], vec![]]);
        assert!(set.has_left_match(0));
        assert!(!set.has_left_match(3));
        assert_eq!(set.pair_count(), 3);
    }

    #[test]
    fn test_hash_builds_on_smaller_side() {
        let big = rows(&[(Some(1), 0), (Some(2), 0), (Some(3), 0), (Some(2), 1)]);
        let small = rows(&[(Some(2), 0), (Some(9), 0)]);
        let config = sequential(JoinStrategy::Hash);

        let right_built = MatchSet::build(&big, &small, &key_predicate(), MatchMode::All, &config);
        assert_eq!(right_built.algorithm(), MatchAlgorithm::HashBuildRight);
        assert_eq!(all_matches(&right_built), vec![vec![], vec![0], vec![], vec![0]]);

        let left_built = MatchSet::build(&small, &big, &key_predicate(), MatchMode::All, &config);
        assert_eq!(left_built.algorithm(), MatchAlgorithm::HashBuildLeft);
        assert_eq!(all_matches(&left_built), vec![vec![1, 3], vec![]]);
    }

    #[test]
    fn test_hash_rechecks_full_predicate() {
        // left.k = right.k AND left.v < right.v
        let condition = equi_join("k", "k").and(col(Side::Left, "v").lt(col(Side::Right, "v")));
        let predicate = BoundPredicate::bind(Some(&condition), &schema("l"), &schema("r")).unwrap();
        let left = rows(&[(Some(1), 5)]);
        let right = rows(&[(Some(1), 4), (Some(1), 6), (Some(1), 7)]);

        for strategy in [JoinStrategy::NestedLoop, JoinStrategy::Hash] {
            let config = sequential(strategy);
            let set = MatchSet::build(&left, &right, &predicate, MatchMode::All, &config);
            assert_eq!(set.right_matches(0), &[1, 2]);
        }
    }

    #[test]
    fn test_non_equijoin_falls_back_to_nested_loop() {
        let condition = col(Side::Left, "k").lt(col(Side::Right, "k"));
        let predicate = BoundPredicate::bind(Some(&condition), &schema("l"), &schema("r")).unwrap();
        let left = rows(&[(Some(1), 0), (Some(3), 0)]);
        let right = rows(&[(Some(2), 0), (Some(4), 0)]);

        let config = sequential(JoinStrategy::Hash);
        let set = MatchSet::build(&left, &right, &predicate, MatchMode::All, &config);
        assert_eq!(set.algorithm(), MatchAlgorithm::NestedLoop);
        assert_eq!(all_matches(&set), vec![vec![0, 1], vec![1]]);
    }

    #[test]
    fn test_first_only_stops_at_first_match() {
        let left = rows(&[(Some(2), 0), (Some(7), 0)]);
        let right = rows(&[(Some(2), 0), (Some(2), 1), (Some(2), 2)]);

        for strategy in [JoinStrategy::NestedLoop, JoinStrategy::Hash] {
            let config = sequential(strategy);
            let set =
                MatchSet::build(&left, &right, &key_predicate(), MatchMode::FirstOnly, &config);
            assert_eq!(all_matches(&set), vec![vec![0], vec![]]);
        }
    }

    #[test]
    fn test_unconditional_matches_everything() {
        let left = rows(&[(Some(1), 0), (None, 0)]);
        let right = rows(&[(None, 0), (Some(5), 0), (Some(6), 0)]);
        let set = MatchSet::build(
            &left,
            &right,
            &BoundPredicate::always(),
            MatchMode::All,
            &JoinConfig::default(),
        );
        assert_eq!(set.pair_count(), 6);
        assert_eq!(set.right_matches(1), &[0, 1, 2]);
    }

    #[test]
    fn test_literal_only_condition() {
        let condition = col(Side::Right, "v").gt_eq(lit(SqlValue::Integer(1)));
        let predicate = BoundPredicate::bind(Some(&condition), &schema("l"), &schema("r")).unwrap();
        let left = rows(&[(Some(1), 0)]);
        let right = rows(&[(Some(1), 0), (Some(1), 1)]);
        let config = JoinConfig::default();
        let set = MatchSet::build(&left, &right, &predicate, MatchMode::All, &config);
        assert_eq!(set.right_matches(0), &[1]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let left: Vec<Row> = rows(&(0..2000i64).map(|i| (Some(i % 37), i)).collect::<Vec<_>>());
        let right: Vec<Row> = rows(&(0..500i64).map(|i| (Some(i % 41), i)).collect::<Vec<_>>());

        let expected = MatchSet::build(
            &left,
            &right,
            &key_predicate(),
            MatchMode::All,
            &sequential(JoinStrategy::NestedLoop),
        );
        for strategy in [JoinStrategy::NestedLoop, JoinStrategy::Hash] {
            let config = JoinConfig::default().with_strategy(strategy).with_parallel_threshold(0);
            let set = MatchSet::build(&left, &right, &key_predicate(), MatchMode::All, &config);
            assert!(set.is_parallel());
            assert_eq!(all_matches(&set), all_matches(&expected));
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_index_build_keeps_indices_ascending() {
        let data: Vec<Row> = rows(&(0..5000i64).map(|i| (Some(i % 3), i)).collect::<Vec<_>>());
        let index = build_hash_index_parallel(&data, 0);
        for indices in index.values() {
            assert!(indices.windows(2).all(|w| w[0] < w[1]));
        }
        assert_eq!(index.values().map(Vec::len).sum::<usize>(), 5000);
    }
}
