//! Prime generation and classification engine
//!
//! Structure:
//! - `sieve.rs`: Sieve of Eratosthenes (`PrimeSet`) and the shared `is_prime`
//! - `predicates.rs`: one pure test per prime family
//! - `classifier.rs`: `Family`, the ordered rule table and `classify`
//! - `grid.rs`: position → (x, y) mapping and `build_grid`
//! - `statistics.rs`: per-family counts and density
//! - `colors.rs`: family label → RGB lookup for renderers
//! - `error.rs`: Error types

pub mod classifier;
pub mod colors;
pub mod error;
pub mod grid;
pub mod predicates;
pub mod sieve;
pub mod statistics;

pub use classifier::{classify, try_classify, Family, Rule, RULES};
pub use colors::{default_colors, FamilyColors};
pub use error::{PrimeError, Result};
pub use grid::{build_grid, build_layout, classify_range, ClassifiedPoint, GridLayout, Position};
pub use sieve::{is_prime, nth_prime, prime_count_estimate, primes_up_to, PrimeSet};
pub use statistics::Statistics;
