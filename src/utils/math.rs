//! Small integer helpers used when laying out tilings.

/// Greatest common divisor of `a` and `b` (Euclid's algorithm).
///
/// `gcd(0, 0)` is defined as `0`.
#[must_use]
pub fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Returns every integer in `[1, limit)` that is coprime with `n`, ascending.
#[must_use]
pub fn coprimes_below(n: usize, limit: usize) -> Vec<usize> {
    (1..limit).filter(|&k| gcd(k, n) == 1).collect()
}
