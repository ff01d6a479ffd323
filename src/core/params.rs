//! Slice geometry derivation.
//!
//! A sliced filter with `k` slices of `m` bits each, holding `n` elements,
//! has a false positive probability of
//!
//! ```text
//! p = (1 - e^(-n/m))^k
//! ```
//!
//! because every slice is hit exactly once per element. For a target `p` the
//! filter uses
//!
//! ```text
//! k = ⌈log₂(1/p)⌉
//! m = ⌈n × |ln p| / (k × (ln 2)²)⌉
//! ```
//!
//! Both values are produced by a [`ParameterDeriver`]. Decoding a persisted
//! filter calls the same deriver again, so implementations must be
//! deterministic.
//!
//! # References
//!
//! - Chang, F., Feng, W., & Li, K. (2004). "Approximate caches for packet classification"
//! - Almeida, P., Baquero, C., Preguiça, N., & Hutchison, D. (2007). "Scalable Bloom Filters"

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use crate::builder::validation::{validate_capacity, validate_fp_rate, validate_slices_count};
use crate::error::{Result, SliceBloomError};
use std::f64::consts::LN_2;

/// (ln 2)² ≈ 0.4804530139182014
const LN2_SQUARED: f64 = LN_2 * LN_2;

/// Minimum number of slices (hash functions).
pub const MIN_SLICES: usize = 1;

/// Maximum number of slices.
///
/// 64 slices correspond to a target false positive rate around 5.4e-20;
/// anything tighter is rejected rather than silently clamped.
pub const MAX_SLICES: usize = 64;

/// Source of slice geometry for a `(capacity, false_positive_rate)` pair.
///
/// The filter asks for the slice count first and passes the answer back in
/// when asking for the slice width.
///
/// # Examples
///
/// ```
/// use slicebloom::core::params::{OptimalSlicing, ParameterDeriver};
///
/// let deriver = OptimalSlicing;
/// let k = deriver.slices_count(100, 0.01).unwrap();
/// let m = deriver.bits_per_slice(100, 0.01, k).unwrap();
/// assert_eq!((k, m), (7, 137));
/// ```
pub trait ParameterDeriver {
    /// Number of slices for the given target.
    ///
    /// # Errors
    ///
    /// Implementations return an invalid-parameter error for inputs they can't serve.
    fn slices_count(&self, capacity: usize, false_positive_rate: f64) -> Result<usize>;

    /// Width of each slice in bits.
    ///
    /// # Errors
    ///
    /// Implementations return an invalid-parameter error for inputs they can't serve.
    fn bits_per_slice(
        &self,
        capacity: usize,
        false_positive_rate: f64,
        slices_count: usize,
    ) -> Result<usize>;
}

impl<D: ParameterDeriver + ?Sized> ParameterDeriver for &D {
    fn slices_count(&self, capacity: usize, false_positive_rate: f64) -> Result<usize> {
        (**self).slices_count(capacity, false_positive_rate)
    }

    fn bits_per_slice(
        &self,
        capacity: usize,
        false_positive_rate: f64,
        slices_count: usize,
    ) -> Result<usize> {
        (**self).bits_per_slice(capacity, false_positive_rate, slices_count)
    }
}

/// Default deriver using the formulas in the module docs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimalSlicing;

impl ParameterDeriver for OptimalSlicing {
    fn slices_count(&self, capacity: usize, false_positive_rate: f64) -> Result<usize> {
        validate_inputs(capacity, false_positive_rate)?;
        optimal_slices_count(false_positive_rate)
    }

    fn bits_per_slice(
        &self,
        capacity: usize,
        false_positive_rate: f64,
        slices_count: usize,
    ) -> Result<usize> {
        validate_inputs(capacity, false_positive_rate)?;
        optimal_bits_per_slice(capacity, false_positive_rate, slices_count)
    }
}

fn validate_inputs(capacity: usize, false_positive_rate: f64) -> Result<()> {
    validate_capacity(capacity)?;
    validate_fp_rate(false_positive_rate)
}

/// `k = ⌈log₂(1/p)⌉`, at least [`MIN_SLICES`].
///
/// # Errors
///
/// - `FalsePositiveRateOutOfBounds` if `false_positive_rate` is not in (0, 1)
/// - `InvalidHashCount` if the result exceeds [`MAX_SLICES`]
///
/// # Examples
///
/// ```
/// use slicebloom::core::params::optimal_slices_count;
///
/// assert_eq!(optimal_slices_count(0.5).unwrap(), 1);
/// assert_eq!(optimal_slices_count(0.01).unwrap(), 7);
/// assert_eq!(optimal_slices_count(0.001).unwrap(), 10);
/// ```
pub fn optimal_slices_count(false_positive_rate: f64) -> Result<usize> {
    validate_fp_rate(false_positive_rate)?;

    let k = (-false_positive_rate.log2()).ceil().max(MIN_SLICES as f64) as usize;
    validate_slices_count(k)?;
    Ok(k)
}

/// `m = ⌈n × |ln p| / (k × (ln 2)²)⌉`, at least 1.
///
/// # Errors
///
/// - `InvalidCapacity` if `capacity == 0`
/// - `FalsePositiveRateOutOfBounds` if `false_positive_rate` is not in (0, 1)
/// - `InvalidHashCount` if `slices_count` is outside `[MIN_SLICES, MAX_SLICES]`
/// - `InvalidFilterSize` if the width can't be represented
///
/// # Examples
///
/// ```
/// use slicebloom::core::params::optimal_bits_per_slice;
///
/// assert_eq!(optimal_bits_per_slice(100, 0.01, 7).unwrap(), 137);
/// ```
pub fn optimal_bits_per_slice(
    capacity: usize,
    false_positive_rate: f64,
    slices_count: usize,
) -> Result<usize> {
    validate_inputs(capacity, false_positive_rate)?;
    validate_slices_count(slices_count)?;

    let numerator = capacity as f64 * false_positive_rate.ln().abs();
    let m = (numerator / (slices_count as f64 * LN2_SQUARED)).ceil();

    if !m.is_finite() || m >= usize::MAX as f64 {
        return Err(SliceBloomError::invalid_filter_size(usize::MAX));
    }

    Ok((m as usize).max(1))
}

/// Expected false positive rate of a sliced filter after `items` insertions.
///
/// Implements `p = (1 - e^(-n/m))^k`.
///
/// # Errors
///
/// - `InvalidFilterSize` if `bits_per_slice == 0`
/// - `InvalidHashCount` if `slices_count` is outside `[MIN_SLICES, MAX_SLICES]`
///
/// # Examples
///
/// ```
/// use slicebloom::core::params::expected_false_positive_rate;
///
/// let p = expected_false_positive_rate(137, 7, 100).unwrap();
/// assert!((p - 0.01).abs() < 0.001);
/// assert_eq!(expected_false_positive_rate(137, 7, 0).unwrap(), 0.0);
/// ```
pub fn expected_false_positive_rate(
    bits_per_slice: usize,
    slices_count: usize,
    items: usize,
) -> Result<f64> {
    if bits_per_slice == 0 {
        return Err(SliceBloomError::invalid_filter_size(bits_per_slice));
    }
    validate_slices_count(slices_count)?;
    if items == 0 {
        return Ok(0.0);
    }

    let fill = 1.0 - (-(items as f64) / bits_per_slice as f64).exp();
    Ok(fill.powi(slices_count as i32).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ln2_squared_constant() {
        assert!((LN2_SQUARED - 0.480_453_013_918_201_4).abs() < 1e-15);
    }

    #[test]
    fn test_slices_count_known_values() {
        assert_eq!(optimal_slices_count(0.5).unwrap(), 1);
        assert_eq!(optimal_slices_count(0.25).unwrap(), 2);
        assert_eq!(optimal_slices_count(0.1).unwrap(), 4);
        assert_eq!(optimal_slices_count(0.01).unwrap(), 7);
        assert_eq!(optimal_slices_count(0.001).unwrap(), 10);
    }

    #[test]
    fn test_slices_count_near_one_is_single_slice() {
        assert_eq!(optimal_slices_count(0.9).unwrap(), 1);
        assert_eq!(optimal_slices_count(0.999_999).unwrap(), 1);
    }

    #[test]
    fn test_slices_count_too_many() {
        let err = optimal_slices_count(1e-30).unwrap_err();
        assert!(matches!(err, SliceBloomError::InvalidHashCount { max: MAX_SLICES, .. }));
    }

    #[test]
    fn test_slices_count_invalid_rate() {
        for fp in [0.0, 1.0, -0.1, 2.0, f64::NAN] {
            assert!(optimal_slices_count(fp).is_err());
        }
    }

    #[test]
    fn test_bits_per_slice_known_values() {
        assert_eq!(optimal_bits_per_slice(100, 0.01, 7).unwrap(), 137);
        // k = 1, m = ⌈n / ln 2⌉
        assert_eq!(optimal_bits_per_slice(1000, 0.5, 1).unwrap(), 1443);
    }

    #[test]
    fn test_bits_per_slice_at_least_one() {
        assert!(optimal_bits_per_slice(1, 0.999, 1).unwrap() >= 1);
    }

    #[test]
    fn test_bits_per_slice_rejects_bad_slice_count() {
        assert!(matches!(
            optimal_bits_per_slice(100, 0.01, 0),
            Err(SliceBloomError::InvalidHashCount { .. })
        ));
        assert!(matches!(
            optimal_bits_per_slice(100, 0.01, MAX_SLICES + 1),
            Err(SliceBloomError::InvalidHashCount { .. })
        ));
    }

    #[test]
    fn test_bits_per_slice_rejects_zero_capacity() {
        assert_eq!(
            optimal_bits_per_slice(0, 0.01, 7),
            Err(SliceBloomError::invalid_capacity(0))
        );
    }

    #[test]
    fn test_deriver_validates_inputs() {
        let d = OptimalSlicing;
        assert!(d.slices_count(0, 0.01).unwrap_err().is_invalid_parameter());
        assert!(d.slices_count(10, 1.0).unwrap_err().is_invalid_parameter());
        assert!(d.bits_per_slice(10, 0.0, 3).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_deriver_is_deterministic() {
        let d = OptimalSlicing;
        for &(n, p) in &[(10, 0.1), (1_000, 0.01), (1_000_000, 0.0001)] {
            let k1 = d.slices_count(n, p).unwrap();
            let k2 = d.slices_count(n, p).unwrap();
            assert_eq!(k1, k2);
            assert_eq!(
                d.bits_per_slice(n, p, k1).unwrap(),
                d.bits_per_slice(n, p, k2).unwrap()
            );
        }
    }

    #[test]
    fn test_expected_rate_meets_target_at_capacity() {
        let d = OptimalSlicing;
        for &(n, p) in &[(100, 0.01), (10_000, 0.01), (10_000, 0.001), (500, 0.1)] {
            let k = d.slices_count(n, p).unwrap();
            let m = d.bits_per_slice(n, p, k).unwrap();
            let actual = expected_false_positive_rate(m, k, n).unwrap();
            assert!(
                actual <= p * 1.1,
                "n={n} p={p}: expected rate {actual} too far above target"
            );
        }
    }

    #[test]
    fn test_expected_rate_grows_with_items() {
        let low = expected_false_positive_rate(1000, 5, 100).unwrap();
        let high = expected_false_positive_rate(1000, 5, 1000).unwrap();
        assert!(low < high);
        assert!(high <= 1.0);
    }

    #[test]
    fn test_expected_rate_invalid() {
        assert!(expected_false_positive_rate(0, 5, 10).is_err());
        assert!(expected_false_positive_rate(100, 0, 10).is_err());
    }

    #[test]
    fn test_deriver_through_reference() {
        fn derive<D: ParameterDeriver>(d: D) -> usize {
            d.slices_count(100, 0.01).unwrap()
        }
        let d = OptimalSlicing;
        assert_eq!(derive(&d), 7);
    }
}
