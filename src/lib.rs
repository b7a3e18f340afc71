//! Prime Grid Library
//!
//! Maps the primes below `columns × rows` onto a grid and labels each one
//! with its number-theoretic family. Rendering is left to the consumer of
//! `pipeline::GridResult` and the `primes::colors` lookup.

pub mod config;
pub mod memprof;
pub mod pipeline;
pub mod primes;
pub mod properties;
