//! Grid mapping
//!
//! Linear positions `0..bound` are laid out row-major over `columns`
//! columns: position i sits at (i mod columns, i div columns). Every position
//! that is prime becomes a `ClassifiedPoint`.

use super::classifier::{classify, Family};
use super::error::{PrimeError, Result};
use super::sieve::PrimeSet;
use super::statistics::Statistics;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Default dot diameter in pixels
pub const DEFAULT_DOT_SIZE: u32 = 8;

/// Default gap between dots in pixels
pub const DEFAULT_SPACING: u32 = 2;

/// Grid shape plus the dot geometry used to derive image dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
    pub dot_size: u32,
    pub spacing: u32,
}

impl GridLayout {
    /// Layout with the default dot geometry
    pub fn new(columns: usize, rows: usize) -> Result<Self> {
        Self::with_geometry(columns, rows, DEFAULT_DOT_SIZE, DEFAULT_SPACING)
    }

    pub fn with_geometry(columns: usize, rows: usize, dot_size: u32, spacing: u32) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(PrimeError::InvalidGrid { columns, rows });
        }
        if columns.checked_mul(rows).is_none() {
            return Err(PrimeError::ResourceExhausted(format!(
                "{} × {} positions overflow",
                columns, rows
            )));
        }
        Ok(Self {
            columns,
            rows,
            dot_size,
            spacing,
        })
    }

    /// Smallest layout with `columns` columns covering `bound` positions
    pub fn covering(bound: usize, columns: usize) -> Result<Self> {
        if columns == 0 {
            return Err(PrimeError::InvalidGrid { columns, rows: 0 });
        }
        let rows = bound.div_ceil(columns).max(1);
        Self::new(columns, rows)
    }

    /// Total positions (columns × rows), also the sieve bound
    pub fn total_positions(&self) -> usize {
        self.columns * self.rows
    }

    /// Image size in pixels: n × (dot + spacing) - spacing per axis
    pub fn dimensions(&self) -> (u64, u64) {
        let pitch = u64::from(self.dot_size) + u64::from(self.spacing);
        let extent = |n: usize| (n as u64 * pitch).saturating_sub(u64::from(self.spacing));
        (extent(self.columns), extent(self.rows))
    }
}

/// A linear grid index with its 2-D coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub index: usize,
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(index: usize, columns: usize) -> Self {
        Self {
            index,
            x: index % columns,
            y: index / columns,
        }
    }
}

/// A prime position and its family, as handed to a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedPoint {
    pub x: usize,
    pub y: usize,
    pub family: Family,
}

/// Classify every prime position in `range`, in ascending order
///
/// Positions at or beyond the sieve bound are never prime here, so ranges
/// that overhang the set just produce no points.
pub fn classify_range(primes: &PrimeSet, range: Range<usize>, columns: usize) -> Vec<ClassifiedPoint> {
    range
        .filter(|&i| primes.contains(i as u64))
        .map(|i| {
            let pos = Position::new(i, columns);
            ClassifiedPoint {
                x: pos.x,
                y: pos.y,
                family: classify(i as u64, primes),
            }
        })
        .collect()
}

/// Sieve `[0, bound]`, classify positions `0..bound` and aggregate
///
/// Single-threaded reference path. Statistics use the default dot geometry
/// with as many rows as needed to hold `bound` positions. `total_positions`
/// stays `bound`, so it falls short of `columns × rows` when the last row is
/// partial.
pub fn build_grid(bound: usize, columns: usize) -> Result<(Vec<ClassifiedPoint>, Statistics)> {
    let layout = GridLayout::covering(bound, columns)?;
    let primes = sieve_for(bound)?;
    let points = classify_range(&primes, 0..bound, columns);
    let stats = Statistics::compute(&points, &layout, bound);
    Ok((points, stats))
}

/// Full `columns × rows` grid for a layout
pub fn build_layout(layout: &GridLayout) -> Result<(Vec<ClassifiedPoint>, Statistics)> {
    let bound = layout.total_positions();
    let primes = sieve_for(bound)?;
    let points = classify_range(&primes, 0..bound, layout.columns);
    let stats = Statistics::compute(&points, layout, bound);
    Ok((points, stats))
}

pub(crate) fn sieve_for(bound: usize) -> Result<PrimeSet> {
    let bound = i64::try_from(bound).map_err(|_| {
        PrimeError::ResourceExhausted(format!("grid of {} positions exceeds sieve range", bound))
    })?;
    PrimeSet::generate(bound)
}
