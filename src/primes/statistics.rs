//! Aggregate statistics over a classified grid

use super::classifier::Family;
use super::grid::{ClassifiedPoint, GridLayout};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of one generation pass
///
/// Field names are the record keys renderers and legends read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub width: u64,
    pub height: u64,
    pub grid_columns: usize,
    pub grid_rows: usize,
    /// Positions actually classified. Less than `grid_columns × grid_rows`
    /// when the last row of the layout is only partly filled.
    pub total_positions: usize,
    pub total_primes: usize,
    /// Primes per position × 100, rounded to two decimals
    pub density: f64,
    /// Count per family label; only families that occur are present
    pub prime_types: BTreeMap<String, usize>,
}

impl Statistics {
    /// Derive statistics from a finished point list
    pub fn compute(points: &[ClassifiedPoint], layout: &GridLayout, total_positions: usize) -> Self {
        let (width, height) = layout.dimensions();

        let mut prime_types: BTreeMap<String, usize> = BTreeMap::new();
        for point in points {
            *prime_types
                .entry(point.family.as_str().to_string())
                .or_insert(0) += 1;
        }

        Self {
            width,
            height,
            grid_columns: layout.columns,
            grid_rows: layout.rows,
            total_positions,
            total_primes: points.len(),
            density: density_percent(points.len(), total_positions),
            prime_types,
        }
    }

    /// Count for one family (0 when absent)
    pub fn count(&self, family: Family) -> usize {
        self.prime_types.get(family.as_str()).copied().unwrap_or(0)
    }
}

fn density_percent(primes: usize, positions: usize) -> f64 {
    if positions == 0 {
        return 0.0;
    }
    let raw = primes as f64 / positions as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}
