//! Shared grid generation pipeline
//!
//! The pipeline:
//! 1. Validates the configuration and derives the grid layout
//! 2. Sieves every position once (the resulting PrimeSet is shared read-only)
//! 3. Classifies prime positions, partitioned across blocking worker tasks
//!    or on the calling thread
//! 4. Aggregates statistics from the merged point list

use crate::config::{ExecutionMode, GridConfig};
use crate::memprof;
use crate::primes::grid::sieve_for;
use crate::primes::{classify_range, ClassifiedPoint, GridLayout, PrimeSet, Result, Statistics};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Output of one generation pass, as consumed by a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridResult {
    pub statistics: Statistics,
    pub points: Vec<ClassifiedPoint>,
}

/// Generate and classify the grid described by `config`
pub async fn generate_grid(config: &GridConfig) -> Result<GridResult> {
    let m0 = memprof::checkpoint("generate_grid START");
    let t0 = Instant::now();

    info!("[1/3] Validating configuration...");
    let layout = config.validate()?;
    let bound = layout.total_positions();
    info!(
        "  Grid: {} columns × {} rows = {} positions ({:?})",
        layout.columns, layout.rows, bound, config.execution
    );

    info!("[2/3] Sieving primes up to {}...", bound);
    let primes = Arc::new(tokio::task::spawn_blocking(move || sieve_for(bound)).await??);
    let _m1 = memprof::delta("After sieve", m0);
    let t1 = memprof::time_delta("After sieve", t0, t0);
    info!("  Found {} primes", primes.len());

    info!("[3/3] Classifying primes...");
    let points = match config.execution {
        ExecutionMode::Sequential => {
            let primes = Arc::clone(&primes);
            let columns = layout.columns;
            tokio::task::spawn_blocking(move || classify_range(&primes, 0..bound, columns)).await?
        }
        ExecutionMode::Parallel => {
            classify_parallel(primes.clone(), &layout, config.resolve_workers()).await?
        }
    };
    let _t2 = memprof::time_delta("After classification", t0, t1);

    let statistics = Statistics::compute(&points, &layout, bound);
    info!(
        "  {} primes in {} positions (density {:.2}%)",
        statistics.total_primes, statistics.total_positions, statistics.density
    );
    for (label, count) in &statistics.prime_types {
        debug!("    {}: {}", label, count);
    }

    Ok(GridResult { statistics, points })
}

/// Classify `0..total_positions` on `workers` blocking tasks
///
/// Each task owns a contiguous range and only reads the shared PrimeSet.
/// `try_join_all` yields results in spawn order, so concatenating them keeps
/// points in ascending position order.
pub async fn classify_parallel(
    primes: Arc<PrimeSet>,
    layout: &GridLayout,
    workers: usize,
) -> Result<Vec<ClassifiedPoint>> {
    let ranges = partition(layout.total_positions(), workers);
    debug!("  Classifying in {} partition(s)", ranges.len());

    let columns = layout.columns;
    let handles = ranges.into_iter().map(|range| {
        let primes = Arc::clone(&primes);
        tokio::task::spawn_blocking(move || classify_range(&primes, range, columns))
    });

    let parts = try_join_all(handles).await?;
    Ok(parts.into_iter().flatten().collect())
}

/// Split `0..total` into at most `parts` contiguous, non-empty ranges
pub fn partition(total: usize, parts: usize) -> Vec<Range<usize>> {
    if total == 0 {
        return Vec::new();
    }
    let chunk = total.div_ceil(parts.max(1));
    (0..total)
        .step_by(chunk)
        .map(|start| start..(start + chunk).min(total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primes::{build_layout, Family, PrimeError};
    use crate::properties::PropertyReader;

    fn config_from(values: &[(&str, &str)]) -> GridConfig {
        GridConfig::from_properties(&PropertyReader::new(values.iter().copied()))
    }

    #[test]
    fn test_partition() {
        assert_eq!(partition(10, 3), vec![0..4, 4..8, 8..10]);
        assert_eq!(partition(2, 8), vec![0..1, 1..2]);
        assert_eq!(partition(5, 0), vec![0..5]);
        assert!(partition(0, 4).is_empty());
    }

    #[tokio::test]
    async fn test_generate_small_grid() {
        let config = config_from(&[
            ("grid.columns", "6"),
            ("grid.rows", "5"),
            ("workers", "4"),
        ]);
        let result = generate_grid(&config).await.unwrap();

        assert_eq!(result.points.len(), 10);
        assert_eq!(result.statistics.total_primes, 10);
        assert_eq!(result.statistics.total_positions, 30);
        assert_eq!(result.statistics.grid_columns, 6);
        assert_eq!(result.statistics.grid_rows, 5);
        assert_eq!(result.statistics.density, 33.33);
        assert_eq!(result.statistics.count(Family::Mersenne), 2);
    }

    #[tokio::test]
    async fn test_parallel_matches_sequential() {
        let parallel = config_from(&[
            ("grid.columns", "97"),
            ("grid.rows", "61"),
            ("workers", "7"),
        ]);
        let sequential = config_from(&[
            ("grid.columns", "97"),
            ("grid.rows", "61"),
            ("execution", "sequential"),
        ]);

        let a = generate_grid(&parallel).await.unwrap();
        let b = generate_grid(&sequential).await.unwrap();
        assert_eq!(a, b);

        let layout = GridLayout::new(97, 61).unwrap();
        let (points, _) = build_layout(&layout).unwrap();
        assert_eq!(a.points, points);
    }

    #[tokio::test]
    async fn test_generate_sequential_grid() {
        let config = config_from(&[
            ("grid.columns", "10"),
            ("grid.rows", "10"),
            ("execution", "sequential"),
        ]);
        let result = generate_grid(&config).await.unwrap();

        assert_eq!(result.points.len(), 25);
        assert_eq!(result.statistics.total_positions, 100);
        assert_eq!(result.statistics.density, 25.0);
        let (expected, _) = build_layout(&GridLayout::new(10, 10).unwrap()).unwrap();
        assert_eq!(result.points, expected);
    }

    #[tokio::test]
    async fn test_generate_is_idempotent() {
        let config = config_from(&[("grid.columns", "40"), ("grid.rows", "40")]);
        let first = serde_json::to_string(&generate_grid(&config).await.unwrap()).unwrap();
        let second = serde_json::to_string(&generate_grid(&config).await.unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_budget_rejected_before_sieve() {
        let config = config_from(&[
            ("grid.columns", "5000"),
            ("grid.rows", "5000"),
            ("max.positions", "1000000"),
        ]);
        assert!(matches!(
            generate_grid(&config).await,
            Err(PrimeError::ResourceExhausted(_))
        ));
    }
}
