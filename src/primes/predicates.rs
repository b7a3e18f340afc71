//! Number-theoretic family predicates
//!
//! Every predicate assumes its argument is already known to be prime; the
//! classifier guarantees that. Values that have to be tested outside the
//! sieved range go through the shared `is_prime`.
//!
//! Neighbour predicates (twin, sexy, isolated) take the `PrimeSet` so that
//! lookups stay O(1).

use super::sieve::{is_prime, PrimeSet};
use std::collections::HashSet;

/// Upper limit (exclusive) on k when searching for n = k! ± 1
///
/// Heuristic cap: 19! already exceeds any grid this crate can sieve.
pub const FACTORIAL_SEARCH_LIMIT: u64 = 20;

/// Known Wieferich primes: 2^(p-1) ≡ 1 (mod p²)
///
/// Only these two are recognised. There is no cheap general test, so the
/// predicate is a lookup rather than a modular check.
pub const KNOWN_WIEFERICH_PRIMES: [u64; 2] = [1093, 3511];

/// n = 2^p - 1 with p prime
pub fn is_mersenne_prime(n: u64) -> bool {
    match n.checked_add(1) {
        Some(m) if m.is_power_of_two() => is_prime(u64::from(m.trailing_zeros())),
        _ => false,
    }
}

/// n = k! - 1 or n = k! + 1 for some k < `FACTORIAL_SEARCH_LIMIT`
pub fn is_factorial_prime(n: u64) -> bool {
    is_factorial_prime_within(n, FACTORIAL_SEARCH_LIMIT)
}

/// Same as `is_factorial_prime` with an explicit search limit on k
pub fn is_factorial_prime_within(n: u64, limit: u64) -> bool {
    let target = u128::from(n);
    let mut factorial: u128 = 1;
    let mut k: u64 = 1;

    while factorial < target + 1 && k < limit {
        factorial *= u128::from(k);
        if target + 1 == factorial || target == factorial + 1 {
            return true;
        }
        k += 1;
    }
    false
}

/// One of the known Wieferich primes (see `KNOWN_WIEFERICH_PRIMES`)
pub fn is_wieferich_prime(n: u64) -> bool {
    KNOWN_WIEFERICH_PRIMES.contains(&n)
}

/// n is a Fibonacci number: 5n² + 4 or 5n² - 4 is a perfect square
///
/// When 5n² does not fit in a `u128` the answer is `false`; the largest
/// Fibonacci number below `u64::MAX` is far smaller than that cutoff.
pub fn is_fibonacci_prime(n: u64) -> bool {
    let five_n_sq = match u128::from(n)
        .checked_mul(u128::from(n))
        .and_then(|sq| sq.checked_mul(5))
    {
        Some(v) => v,
        None => return false,
    };
    five_n_sq
        .checked_add(4)
        .map(is_perfect_square)
        .unwrap_or(false)
        || five_n_sq
            .checked_sub(4)
            .map(is_perfect_square)
            .unwrap_or(false)
}

/// n - 2 or n + 2 is in the prime set
pub fn is_twin_prime(n: u64, primes: &PrimeSet) -> bool {
    has_neighbour(n, 2, primes)
}

/// n - 6 or n + 6 is in the prime set
pub fn is_sexy_prime(n: u64, primes: &PrimeSet) -> bool {
    has_neighbour(n, 6, primes)
}

/// Neither n - 2 nor n + 2 is in the prime set
pub fn is_isolated_prime(n: u64, primes: &PrimeSet) -> bool {
    !has_neighbour(n, 2, primes)
}

/// n > 2 and (n - 1) / 2 is prime
pub fn is_safe_prime(n: u64) -> bool {
    n > 2 && is_prime((n - 1) / 2)
}

/// 2n + 1 is prime
pub fn is_sophie_germain_prime(n: u64) -> bool {
    n.checked_mul(2)
        .and_then(|m| m.checked_add(1))
        .map(is_prime)
        .unwrap_or(false)
}

/// n + 2 is prime or a semiprime
pub fn is_chen_prime(n: u64) -> bool {
    match n.checked_add(2) {
        Some(m) => is_prime(m) || is_semiprime(m),
        None => false,
    }
}

/// Decimal digits read the same in both directions
pub fn is_palindromic_prime(n: u64) -> bool {
    let digits = n.to_string();
    digits.bytes().eq(digits.bytes().rev())
}

/// Every cyclic rotation of the decimal digits is prime
///
/// Rotations with a leading zero are read as the shorter number (101 → 011 = 11).
pub fn is_circular_prime(n: u64) -> bool {
    let digits = n.to_string();
    (1..digits.len()).all(|shift| {
        let rotated = format!("{}{}", &digits[shift..], &digits[..shift]);
        rotated.parse::<u64>().map(is_prime).unwrap_or(false)
    })
}

/// n = 3m² + 3m + 1 for some integer m >= 0
///
/// Solves the quadratic: the discriminant 9 + 12(n - 1) must be a perfect
/// square s, and m = (s - 3) / 6 must be a non-negative integer.
pub fn is_cuban_prime(n: u64) -> bool {
    if n == 0 {
        return false;
    }
    let discriminant = 9 + 12 * (u128::from(n) - 1);
    let s = integer_sqrt(discriminant);
    s * s == discriminant && s >= 3 && (s - 3) % 6 == 0
}

/// Repeated digit-square sums reach 1
pub fn is_happy_prime(n: u64) -> bool {
    is_happy_number(n)
}

/// Repeatedly replace n by the sum of the squares of its digits until it
/// reaches 1 (happy) or revisits a value (cycle, not happy)
pub fn is_happy_number(mut n: u64) -> bool {
    let mut seen = HashSet::new();
    while n != 1 && seen.insert(n) {
        n = digit_square_sum(n);
    }
    n == 1
}

/// Product of exactly two primes, possibly equal
pub fn is_semiprime(m: u64) -> bool {
    if m < 4 {
        return false;
    }
    let mut i = 2u64;
    while i <= m / i {
        if m % i == 0 {
            // Smallest factor; m is a semiprime iff the cofactor is prime too
            return is_prime(i) && is_prime(m / i);
        }
        i += 1;
    }
    false
}

fn has_neighbour(n: u64, gap: u64, primes: &PrimeSet) -> bool {
    let below = n.checked_sub(gap).map(|m| primes.contains(m));
    let above = n.checked_add(gap).map(|m| primes.contains(m));
    below.unwrap_or(false) || above.unwrap_or(false)
}

fn digit_square_sum(mut n: u64) -> u64 {
    let mut sum = 0;
    while n > 0 {
        let d = n % 10;
        sum += d * d;
        n /= 10;
    }
    sum
}

fn is_perfect_square(x: u128) -> bool {
    let r = integer_sqrt(x);
    r * r == x
}

/// floor(sqrt(x)) without floating point error
fn integer_sqrt(x: u128) -> u128 {
    if x < 2 {
        return x;
    }
    let mut r = (x as f64).sqrt() as u128;
    while r.checked_mul(r).map_or(true, |sq| sq > x) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).map_or(false, |sq| sq <= x) {
        r += 1;
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primes_to(bound: i64) -> PrimeSet {
        PrimeSet::generate(bound).unwrap()
    }

    #[test]
    fn test_mersenne() {
        assert!(is_mersenne_prime(3));
        assert!(is_mersenne_prime(7));
        assert!(is_mersenne_prime(31));
        assert!(is_mersenne_prime(127));
        assert!(is_mersenne_prime(8191));
        // 2047 = 23 × 89: callers only pass primes, so only the form is checked
        assert!(is_mersenne_prime(2047));
        // 2^4 - 1: exponent 4 is not prime
        assert!(!is_mersenne_prime(15));
        assert!(!is_mersenne_prime(5));
        assert!(!is_mersenne_prime(u64::MAX));
    }

    #[test]
    fn test_factorial() {
        // 1! + 1, 2! + 1, 3! ± 1, 4! - 1, 5! + 1, 7! - 1
        for n in [2, 3, 5, 7, 23, 121, 5039] {
            assert!(is_factorial_prime(n), "{} should be factorial", n);
        }
        for n in [11, 13, 17, 29] {
            assert!(!is_factorial_prime(n), "{} should not be factorial", n);
        }
    }

    #[test]
    fn test_factorial_search_limit() {
        // 5039 = 7! - 1 needs k = 7
        assert!(is_factorial_prime_within(5039, 8));
        assert!(!is_factorial_prime_within(5039, 7));
    }

    #[test]
    fn test_wieferich() {
        assert!(is_wieferich_prime(1093));
        assert!(is_wieferich_prime(3511));
        assert!(!is_wieferich_prime(1097));
    }

    #[test]
    fn test_fibonacci() {
        for n in [2, 3, 5, 13, 89, 233, 1597, 28657] {
            assert!(is_fibonacci_prime(n), "{} is Fibonacci", n);
        }
        for n in [7, 11, 17, 19, 23, 97] {
            assert!(!is_fibonacci_prime(n), "{} is not Fibonacci", n);
        }
    }

    #[test]
    fn test_fibonacci_largest_u64_prime() {
        // 5n² overflows u128 here; must answer without panicking
        assert!(!is_fibonacci_prime(18_446_744_073_709_551_557));
        // F(83) = 99194853094755497, the largest Fibonacci prime below 2^64
        assert!(is_fibonacci_prime(99_194_853_094_755_497));
        assert!(!is_fibonacci_prime(u64::MAX));
    }

    #[test]
    fn test_twin_sexy_isolated() {
        let primes = primes_to(100);
        assert!(is_twin_prime(5, &primes));
        assert!(is_twin_prime(43, &primes));
        assert!(!is_twin_prime(23, &primes));

        assert!(is_sexy_prime(23, &primes));
        assert!(is_sexy_prime(47, &primes));
        assert!(!is_sexy_prime(2, &primes));

        assert!(is_isolated_prime(23, &primes));
        assert!(is_isolated_prime(2, &primes));
        assert!(!is_isolated_prime(29, &primes));
    }

    #[test]
    fn test_neighbours_past_bound_are_absent() {
        // 31 is prime but lies outside a set sieved to 30
        let primes = primes_to(30);
        assert!(!is_twin_prime(29, &primes));
        assert!(is_isolated_prime(29, &primes));
    }

    #[test]
    fn test_safe_and_sophie_germain() {
        assert!(!is_safe_prime(2));
        assert!(is_safe_prime(5));
        assert!(is_safe_prime(23));
        assert!(!is_safe_prime(13));

        assert!(is_sophie_germain_prime(2));
        assert!(is_sophie_germain_prime(11));
        assert!(is_sophie_germain_prime(89));
        assert!(!is_sophie_germain_prime(13));
    }

    #[test]
    fn test_chen_and_semiprime() {
        assert!(is_semiprime(4));
        assert!(is_semiprime(15));
        assert!(is_semiprime(49));
        assert!(!is_semiprime(8));
        assert!(!is_semiprime(30));
        assert!(!is_semiprime(13));

        // 13 + 2 = 15 = 3 × 5
        assert!(is_chen_prime(13));
        // 11 + 2 = 13 prime
        assert!(is_chen_prime(11));
        // 43 + 2 = 45 = 3² × 5
        assert!(!is_chen_prime(43));
    }

    #[test]
    fn test_palindromic() {
        assert!(is_palindromic_prime(7));
        assert!(is_palindromic_prime(101));
        assert!(is_palindromic_prime(12421));
        assert!(!is_palindromic_prime(13));
    }

    #[test]
    fn test_circular() {
        for n in [2, 7, 13, 37, 197, 1193] {
            assert!(is_circular_prime(n), "{} is circular", n);
        }
        // 19 → 91 = 7 × 13
        assert!(!is_circular_prime(19));
        // 23 → 32
        assert!(!is_circular_prime(23));
    }

    #[test]
    fn test_cuban() {
        // m = 1, 2, 3, 4, 6: 7, 19, 37, 61, 127
        for n in [7, 19, 37, 61, 127] {
            assert!(is_cuban_prime(n), "{} is cuban", n);
        }
        for n in [2, 3, 5, 11, 13, 29] {
            assert!(!is_cuban_prime(n), "{} is not cuban", n);
        }
    }

    #[test]
    fn test_happy() {
        assert!(is_happy_prime(7));
        assert!(!is_happy_prime(11));
        assert!(is_happy_prime(13));
        assert!(is_happy_number(1));
        assert!(!is_happy_number(4));
    }

    #[test]
    fn test_happy_terminates_up_to_10000() {
        let happy = (1..=10_000u64).filter(|&n| is_happy_number(n)).count();
        // OEIS A007770: 1442 happy numbers up to 10^4
        assert_eq!(happy, 1442);
    }

    #[test]
    fn test_integer_sqrt() {
        assert_eq!(integer_sqrt(0), 0);
        assert_eq!(integer_sqrt(15), 3);
        assert_eq!(integer_sqrt(16), 4);
        let big = u128::from(u64::MAX) * u128::from(u64::MAX);
        assert_eq!(integer_sqrt(big), u128::from(u64::MAX));
    }
}
