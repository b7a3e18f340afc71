//! Prime family classification
//!
//! Each prime gets exactly one `Family`: the first rule in `RULES` whose
//! predicate holds, or `Family::Regular` when none does. The rule order
//! resolves overlapping memberships and fixes the rendered output, so it is
//! kept as data rather than as a chain of conditionals.

use super::error::{PrimeError, Result};
use super::predicates::*;
use super::sieve::PrimeSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number-theoretic family of a prime
///
/// Serialized as the lowercase snake-case label (`"twin_prime"`, ...) that
/// renderers use as their color lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Family {
    #[serde(rename = "mersenne_prime")]
    Mersenne,
    #[serde(rename = "factorial_prime")]
    Factorial,
    #[serde(rename = "wieferich_prime")]
    Wieferich,
    #[serde(rename = "fibonacci_prime")]
    Fibonacci,
    #[serde(rename = "twin_prime")]
    Twin,
    #[serde(rename = "sexy_prime")]
    Sexy,
    #[serde(rename = "isolated_prime")]
    Isolated,
    #[serde(rename = "safe_prime")]
    Safe,
    #[serde(rename = "sophie_germain_prime")]
    SophieGermain,
    #[serde(rename = "chen_prime")]
    Chen,
    #[serde(rename = "palindromic_prime")]
    Palindromic,
    #[serde(rename = "circular_prime")]
    Circular,
    #[serde(rename = "cuban_prime")]
    Cuban,
    #[serde(rename = "happy_prime")]
    Happy,
    #[serde(rename = "regular_prime")]
    Regular,
}

impl Family {
    /// All families in priority order, `Regular` last
    pub const ALL: [Family; 15] = [
        Family::Mersenne,
        Family::Factorial,
        Family::Wieferich,
        Family::Fibonacci,
        Family::Twin,
        Family::Sexy,
        Family::Isolated,
        Family::Safe,
        Family::SophieGermain,
        Family::Chen,
        Family::Palindromic,
        Family::Circular,
        Family::Cuban,
        Family::Happy,
        Family::Regular,
    ];

    /// Fixed label string
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Mersenne => "mersenne_prime",
            Family::Factorial => "factorial_prime",
            Family::Wieferich => "wieferich_prime",
            Family::Fibonacci => "fibonacci_prime",
            Family::Twin => "twin_prime",
            Family::Sexy => "sexy_prime",
            Family::Isolated => "isolated_prime",
            Family::Safe => "safe_prime",
            Family::SophieGermain => "sophie_germain_prime",
            Family::Chen => "chen_prime",
            Family::Palindromic => "palindromic_prime",
            Family::Circular => "circular_prime",
            Family::Cuban => "cuban_prime",
            Family::Happy => "happy_prime",
            Family::Regular => "regular_prime",
        }
    }

    /// Parse a label back into a family (exact match)
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.as_str() == label)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicate signature shared by every rule
pub type FamilyTest = fn(u64, &PrimeSet) -> bool;

/// A family tagged with the predicate that selects it
#[derive(Clone, Copy)]
pub struct Rule {
    pub family: Family,
    pub test: FamilyTest,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("family", &self.family).finish()
    }
}

/// Classification rules, evaluated top to bottom
pub static RULES: [Rule; 14] = [
    Rule {
        family: Family::Mersenne,
        test: |n, _| is_mersenne_prime(n),
    },
    Rule {
        family: Family::Factorial,
        test: |n, _| is_factorial_prime(n),
    },
    Rule {
        family: Family::Wieferich,
        test: |n, _| is_wieferich_prime(n),
    },
    Rule {
        family: Family::Fibonacci,
        test: |n, _| is_fibonacci_prime(n),
    },
    Rule {
        family: Family::Twin,
        test: is_twin_prime,
    },
    Rule {
        family: Family::Sexy,
        test: is_sexy_prime,
    },
    Rule {
        family: Family::Isolated,
        test: is_isolated_prime,
    },
    Rule {
        family: Family::Safe,
        test: |n, _| is_safe_prime(n),
    },
    Rule {
        family: Family::SophieGermain,
        test: |n, _| is_sophie_germain_prime(n),
    },
    Rule {
        family: Family::Chen,
        test: |n, _| is_chen_prime(n),
    },
    Rule {
        family: Family::Palindromic,
        test: |n, _| is_palindromic_prime(n),
    },
    Rule {
        family: Family::Circular,
        test: |n, _| is_circular_prime(n),
    },
    Rule {
        family: Family::Cuban,
        test: |n, _| is_cuban_prime(n),
    },
    Rule {
        family: Family::Happy,
        test: |n, _| is_happy_prime(n),
    },
];

/// Classify a prime by the first matching rule
///
/// `n` must be a member of `primes`. This is asserted in debug builds only;
/// use `try_classify` where membership is not already guaranteed.
pub fn classify(n: u64, primes: &PrimeSet) -> Family {
    debug_assert!(
        primes.contains(n),
        "classify called on {} which is not in the prime set",
        n
    );

    RULES
        .iter()
        .find(|rule| (rule.test)(n, primes))
        .map(|rule| rule.family)
        .unwrap_or(Family::Regular)
}

/// Checked variant of `classify`: fails with `InvalidCandidate` for non-members
pub fn try_classify(n: u64, primes: &PrimeSet) -> Result<Family> {
    if !primes.contains(n) {
        return Err(PrimeError::InvalidCandidate(n));
    }
    Ok(classify(n, primes))
}
