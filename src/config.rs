//! Grid configuration from properties
//!
//! All default values come from grid_properties.json via `PropertyReader`;
//! this module only types and validates them.

use crate::primes::{GridLayout, PrimeError, Result};
use crate::properties::PropertyReader;
use std::path::PathBuf;

/// Largest columns/rows value accepted from properties
const MAX_GRID_SIDE: usize = 1_000_000;

/// Where classification runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Partition positions across blocking worker tasks
    #[default]
    Parallel,
    /// Classify on the calling thread
    Sequential,
}

impl ExecutionMode {
    /// Parse from string value
    ///
    /// Validation happens in PropertyReader::get_enum()
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "sequential" => Self::Sequential,
            _ => Self::Parallel,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Dots along the x-axis
    pub columns: usize,

    /// Dots along the y-axis
    pub rows: usize,

    /// Dot diameter in pixels (only affects reported width/height)
    pub dot_size: u32,

    /// Gap between dots in pixels
    pub spacing: u32,

    pub execution: ExecutionMode,

    /// Classification partitions; 0 = available parallelism
    pub workers: usize,

    /// Budget cap on columns × rows, checked before the sieve is allocated
    pub max_positions: usize,

    /// Optional JSON output for a renderer
    pub output_path: Option<PathBuf>,
}

impl GridConfig {
    /// Create config from properties
    pub fn from_properties(props: &PropertyReader) -> Self {
        let columns = props.get_usize_in_range("grid.columns", 1, MAX_GRID_SIDE);
        let rows = props.get_usize_in_range("grid.rows", 1, MAX_GRID_SIDE);
        let dot_size = props.get_usize_in_range("dot.size", 1, 1_000) as u32;
        let spacing = props.get_usize_in_range("dot.spacing", 0, 1_000) as u32;
        let execution = ExecutionMode::parse(&props.get_enum("execution"));
        let workers = props.get_usize_in_range("workers", 0, 4_096);
        let max_positions = props.get_usize_in_range("max.positions", 1, usize::MAX);
        let output_path = props.get_optional_string("output.path").map(PathBuf::from);

        Self {
            columns,
            rows,
            dot_size,
            spacing,
            execution,
            workers,
            max_positions,
            output_path,
        }
    }

    /// Config from `PRIME_GRID_*` environment variables plus overrides
    pub fn from_env<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::from_properties(&PropertyReader::from_env(overrides))
    }

    /// Total positions (columns × rows)
    pub fn total_positions(&self) -> Option<usize> {
        self.columns.checked_mul(self.rows)
    }

    /// Validate grid shape and budget, returning the layout to generate
    pub fn validate(&self) -> Result<GridLayout> {
        if self.columns == 0 || self.rows == 0 {
            return Err(PrimeError::InvalidGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }

        match self.total_positions() {
            Some(total) if total <= self.max_positions => {}
            _ => {
                return Err(PrimeError::ResourceExhausted(format!(
                    "{} × {} grid exceeds the budget of {} positions",
                    self.columns, self.rows, self.max_positions
                )))
            }
        }

        GridLayout::with_geometry(self.columns, self.rows, self.dot_size, self.spacing)
    }

    /// Resolve the worker count (0 → available parallelism)
    pub fn resolve_workers(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}
