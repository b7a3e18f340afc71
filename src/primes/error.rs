use thiserror::Error;

/// Errors that can occur while generating or classifying primes
#[derive(Debug, Error)]
pub enum PrimeError {
    /// Sieve bound was negative
    #[error("Invalid bound: {0} (must be >= 0)")]
    InvalidBound(i64),

    /// Classification was requested for a value outside the prime set
    #[error("Invalid candidate: {0} is not in the prime set")]
    InvalidCandidate(u64),

    /// Grid has zero columns or rows
    #[error("Invalid grid: {columns} columns × {rows} rows")]
    InvalidGrid { columns: usize, rows: usize },

    /// 1-based prime index was zero
    #[error("Invalid prime index: {0} (must be >= 1)")]
    InvalidIndex(usize),

    /// Bound too large for the configured budget or for available memory
    #[error("Resource exhausted: {0}")]
    ResourceExhausted(String),

    /// Configuration error (unknown property, malformed embedded registry, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A classification worker task panicked or was cancelled
    #[error("Worker error: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Type alias for Results using PrimeError
pub type Result<T> = std::result::Result<T, PrimeError>;
