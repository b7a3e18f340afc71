//! Prime generation
//!
//! - `PrimeSet::generate`: Sieve of Eratosthenes over `[0, bound]`
//! - `is_prime`: trial division by 6k ± 1, for values outside a sieved range
//! - `nth_prime` / `prime_count_estimate`: helpers built on the sieve

use super::error::{PrimeError, Result};
use tracing::debug;

/// Attempts made by `nth_prime` before giving up
const NTH_PRIME_MAX_ATTEMPTS: u32 = 8;

/// Bound multiplier applied when the `nth_prime` estimate was too low
const NTH_PRIME_GROWTH_FACTOR: usize = 2;

/// Exact prime membership for every integer in `[0, bound]`
///
/// Built once per bound and read-only afterwards. Lookups outside the sieved
/// range answer `false`, which is what the neighbour predicates expect at the
/// edge of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeSet {
    bound: usize,
    flags: Vec<bool>,
    count: usize,
}

impl PrimeSet {
    /// Sieve all primes up to and including `bound`
    ///
    /// Negative bounds fail with `InvalidBound`. Bounds below 2 give an empty
    /// set. The flag array is reserved fallibly so that an oversized grid
    /// surfaces as `ResourceExhausted` instead of aborting the process.
    pub fn generate(bound: i64) -> Result<Self> {
        if bound < 0 {
            return Err(PrimeError::InvalidBound(bound));
        }
        let bound = usize::try_from(bound).map_err(|_| {
            PrimeError::ResourceExhausted(format!("bound {} exceeds addressable memory", bound))
        })?;

        if bound < 2 {
            return Ok(Self {
                bound,
                flags: Vec::new(),
                count: 0,
            });
        }

        let len = bound.checked_add(1).ok_or_else(|| {
            PrimeError::ResourceExhausted(format!("bound {} exceeds addressable memory", bound))
        })?;

        let mut flags: Vec<bool> = Vec::new();
        flags.try_reserve_exact(len).map_err(|e| {
            PrimeError::ResourceExhausted(format!(
                "cannot allocate sieve of {} entries: {}",
                len, e
            ))
        })?;
        flags.resize(len, true);
        flags[0] = false;
        flags[1] = false;

        let mut i = 2usize;
        while i <= bound / i {
            if flags[i] {
                // Smaller multiples were already crossed out by smaller primes
                let mut j = i * i;
                while j <= bound {
                    flags[j] = false;
                    j += i;
                }
            }
            i += 1;
        }

        let count = flags.iter().filter(|&&is_p| is_p).count();
        debug!("Sieved {} primes up to {}", count, bound);

        Ok(Self {
            bound,
            flags,
            count,
        })
    }

    /// Inclusive upper limit this set was sieved for
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// O(1) membership test
    pub fn contains(&self, n: u64) -> bool {
        usize::try_from(n)
            .ok()
            .and_then(|idx| self.flags.get(idx).copied())
            .unwrap_or(false)
    }

    /// Number of primes in the set
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Primes in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, is_p)| **is_p)
            .map(|(n, _)| n as u64)
    }
}

/// All primes `<= limit` as an ascending list (empty for `limit < 2`)
pub fn primes_up_to(limit: u64) -> Result<Vec<u64>> {
    let bound = i64::try_from(limit).map_err(|_| {
        PrimeError::ResourceExhausted(format!("limit {} exceeds sieve range", limit))
    })?;
    Ok(PrimeSet::generate(bound)?.iter().collect())
}

/// Trial-division primality test
///
/// Shared by every predicate that has to test values outside the sieved
/// range (2p+1, (p-1)/2, digit rotations, semiprime factors, ...).
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    // Remaining candidates have the form 6k ± 1
    let mut i = 5u64;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Estimated count of primes `<= x` by the prime number theorem (x / ln x)
pub fn prime_count_estimate(x: u64) -> u64 {
    if x < 2 {
        return 0;
    }
    let xf = x as f64;
    (xf / xf.ln()) as u64
}

/// The n-th prime, 1-based (`nth_prime(1) == 2`)
///
/// Sieves up to the estimate n(ln n + ln ln n) and grows the bound by
/// `NTH_PRIME_GROWTH_FACTOR` whenever the estimate falls short. Gives up with
/// `ResourceExhausted` after `NTH_PRIME_MAX_ATTEMPTS` sieves.
pub fn nth_prime(n: usize) -> Result<u64> {
    const SMALL: [u64; 5] = [2, 3, 5, 7, 11];

    if n < 1 {
        return Err(PrimeError::InvalidIndex(n));
    }
    if n <= SMALL.len() {
        return Ok(SMALL[n - 1]);
    }

    let nf = n as f64;
    let mut limit = (nf * (nf.ln() + nf.ln().ln())) as usize;

    for attempt in 1..=NTH_PRIME_MAX_ATTEMPTS {
        let bound = i64::try_from(limit).map_err(|_| {
            PrimeError::ResourceExhausted(format!("nth_prime bound {} overflows", limit))
        })?;
        let primes = PrimeSet::generate(bound)?;
        if let Some(p) = primes.iter().nth(n - 1) {
            return Ok(p);
        }

        debug!(
            "nth_prime({}): bound {} too small on attempt {}",
            n, limit, attempt
        );
        limit = limit.checked_mul(NTH_PRIME_GROWTH_FACTOR).ok_or_else(|| {
            PrimeError::ResourceExhausted(format!("nth_prime bound for n={} overflows", n))
        })?;
    }

    Err(PrimeError::ResourceExhausted(format!(
        "nth_prime({}) not found after {} attempts",
        n, NTH_PRIME_MAX_ATTEMPTS
    )))
}
