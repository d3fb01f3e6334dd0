//! Parallel execution heuristics
//!
//! Decides when match-set construction is worth splitting across rayon
//! worker threads, based on:
//! - Available CPU cores
//! - Left relation row count
//! - User override via the RELJOIN_PARALLEL_THRESHOLD environment variable
//!
//! Only compiled with the `parallel` feature.

use std::sync::OnceLock;

const THRESHOLD_ENV: &str = "RELJOIN_PARALLEL_THRESHOLD";

/// Global parallel configuration, initialized once on first access
static PARALLEL_CONFIG: OnceLock<ParallelConfig> = OnceLock::new();

/// Configuration for parallel execution decisions
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of threads available (from rayon)
    pub num_threads: usize,
    /// Left row count at which joins go parallel
    pub join_threshold: usize,
}

impl ParallelConfig {
    /// Get or initialize the global parallel configuration
    pub fn global() -> &'static ParallelConfig {
        PARALLEL_CONFIG.get_or_init(Self::detect)
    }

    fn detect() -> Self {
        let num_threads = rayon::current_num_threads();

        let join_threshold = match std::env::var(THRESHOLD_ENV) {
            Ok(value) => Self::parse_threshold_override(&value)
                .unwrap_or_else(|| Self::threshold_for_hardware(num_threads)),
            Err(_) => Self::threshold_for_hardware(num_threads),
        };

        log::debug!(
            "parallel join config: {} threads, threshold {} rows",
            num_threads,
            join_threshold
        );

        ParallelConfig { num_threads, join_threshold }
    }

    /// Parse the environment override
    ///
    /// Supports:
    /// - Numbers: "5000" -> custom threshold
    /// - "max" or "disabled" -> never parallelize
    fn parse_threshold_override(value: &str) -> Option<usize> {
        let value = value.trim().to_lowercase();
        if value == "max" || value == "disabled" {
            return Some(usize::MAX);
        }
        match value.parse::<usize>() {
            Ok(threshold) => Some(threshold),
            Err(_) => {
                log::warn!("ignoring invalid {} value '{}'", THRESHOLD_ENV, value);
                None
            }
        }
    }

    fn threshold_for_hardware(num_threads: usize) -> usize {
        match num_threads {
            // Single core: never parallelize
            0 | 1 => usize::MAX,
            2..=3 => 15_000,
            4..=7 => 5_000,
            _ => 2_500,
        }
    }

    /// Check if parallel execution should be used for a join
    pub fn should_parallelize_join(&self, row_count: usize) -> bool {
        row_count >= self.join_threshold
    }
}
