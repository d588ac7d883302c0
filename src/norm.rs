//! Norms and distances between feature vectors.
//!
//! Pairwise functions require both arguments to have the same length and
//! return [`FeatureError::ShapeMismatch`] otherwise.

use crate::error::{FeatureError, Result};
use crate::types::Real;

/// Number of positions at which `a` and `b` differ.
///
/// # Example
///
/// ```rust
/// use featvec::norm::hamming_distance;
///
/// assert_eq!(hamming_distance(&[1, 0, 1, 1], &[1, 1, 0, 1]).unwrap(), 2);
/// ```
pub fn hamming_distance<T: PartialEq>(a: &[T], b: &[T]) -> Result<usize> {
    FeatureError::check_len(a.len(), b.len())?;
    Ok(a.iter().zip(b).filter(|(x, y)| x != y).count())
}

/// Sum of absolute values.
pub fn l1_norm(x: &[Real]) -> Real {
    x.iter().map(|v| v.abs()).sum()
}

/// Euclidean length.
pub fn l2_norm(x: &[Real]) -> Real {
    x.iter().map(|v| v * v).sum::<Real>().sqrt()
}

/// General Lp norm, `(sum |x_i|^p)^(1/p)`, for `p > 0`.
pub fn lp_norm(x: &[Real], p: Real) -> Result<Real> {
    if !(p.is_finite() && p > 0.0) {
        return Err(FeatureError::invalid_config(
            "p",
            format!("Must be finite and > 0, got {p}"),
        ));
    }
    Ok(x.iter().map(|v| v.abs().powf(p)).sum::<Real>().powf(1.0 / p))
}

/// L1 (Manhattan) distance between two vectors.
pub fn l1_distance(a: &[Real], b: &[Real]) -> Result<Real> {
    FeatureError::check_len(a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum())
}

/// L2 (Euclidean) distance between two vectors.
pub fn l2_distance(a: &[Real], b: &[Real]) -> Result<Real> {
    FeatureError::check_len(a.len(), b.len())?;
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<Real>()
        .sqrt())
}
