//! Per-slice bucket offsets.
//!
//! A sliced filter needs one offset per slice for every element. A
//! [`BucketGenerator`] produces them from the element's token bytes; the
//! filter then addresses bit `i * bits_per_slice + buckets[i]`.
//!
//! The default generator, [`DoubleHashBuckets`], hashes the token once into a
//! pair `(h₁, h₂)` and derives slice hashes from it (Kirsch & Mitzenmacher):
//!
//! ```text
//! Double:          gᵢ = h₁ + i·h₂
//! EnhancedDouble:  gᵢ = h₁ + i·h₂ + (i² + i)/2
//! ```
//!
//! Each `gᵢ` is mapped onto `[0, bits_per_slice)` with Lemire's
//! multiply-shift reduction, which has no modulo bias and no division.
//!
//! # References
//!
//! - Kirsch, A., & Mitzenmacher, M. (2006). "Less Hashing, Same Performance: Building a Better Bloom Filter"
//! - Dillinger, P. C., & Manolios, P. (2004). "Fast and Accurate Bitstate Verification for SPIN"
//! - Lemire, D. (2019). "Fast Random Integer Generation in an Interval"

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]

use super::hasher::{BloomHasher, StdHasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Source of per-slice offsets for an element.
///
/// # Contract
///
/// - Deterministic: the same token and geometry always give the same offsets,
///   in every process (persisted filters depend on it).
/// - Returns exactly `slices_count` values, each in `[0, bits_per_slice)`.
///
/// The filter never calls this with `slices_count == 0` or
/// `bits_per_slice == 0`.
///
/// # Examples
///
/// ```
/// use slicebloom::hash::{BucketGenerator, DoubleHashBuckets};
///
/// let buckets = DoubleHashBuckets::new().buckets(b"hello", 7, 137);
/// assert_eq!(buckets.len(), 7);
/// assert!(buckets.iter().all(|&b| b < 137));
/// ```
pub trait BucketGenerator {
    /// Offsets of `token` within each of the `slices_count` slices.
    fn buckets(&self, token: &[u8], slices_count: usize, bits_per_slice: usize) -> Vec<usize>;
}

impl<G: BucketGenerator + ?Sized> BucketGenerator for &G {
    #[inline]
    fn buckets(&self, token: &[u8], slices_count: usize, bits_per_slice: usize) -> Vec<usize> {
        (**self).buckets(token, slices_count, bits_per_slice)
    }
}

impl<G: BucketGenerator + ?Sized> BucketGenerator for Box<G> {
    #[inline]
    fn buckets(&self, token: &[u8], slices_count: usize, bits_per_slice: usize) -> Vec<usize> {
        (**self).buckets(token, slices_count, bits_per_slice)
    }
}

/// How slice hashes are derived from the base pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SliceHashing {
    /// `h₁ + i·h₂`
    Double,
    /// `h₁ + i·h₂ + (i² + i)/2`; the quadratic term breaks up the arithmetic
    /// progression when `h₂` is small.
    #[default]
    EnhancedDouble,
}

impl SliceHashing {
    /// Hash for slice `i`.
    #[inline]
    #[must_use]
    pub fn slice_hash(self, h1: u64, h2: u64, i: u64) -> u64 {
        let base = h1.wrapping_add(i.wrapping_mul(h2));
        match self {
            Self::Double => base,
            Self::EnhancedDouble => base.wrapping_add(i.wrapping_mul(i).wrapping_add(i) / 2),
        }
    }

    /// Short name used in `Debug` output and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Double => "Double",
            Self::EnhancedDouble => "EnhancedDouble",
        }
    }
}

/// Map a 64-bit hash uniformly onto `[0, range)`.
///
/// Uses the high half of the 128-bit product, so `range` need not be a power
/// of two and no modulo is involved.
///
/// ```
/// use slicebloom::hash::buckets::reduce;
///
/// assert_eq!(reduce(0, 137), 0);
/// assert_eq!(reduce(u64::MAX, 137), 136);
/// ```
#[inline]
#[must_use]
pub fn reduce(hash: u64, range: usize) -> usize {
    ((u128::from(hash) * range as u128) >> 64) as usize
}

/// Bucket generator built on a [`BloomHasher`] and double hashing.
///
/// # Examples
///
/// ```
/// use slicebloom::hash::{BucketGenerator, DoubleHashBuckets, SliceHashing, StdHasher};
///
/// let plain = DoubleHashBuckets::with_hasher(StdHasher::with_seed(1), SliceHashing::Double);
/// let a = plain.buckets(b"key", 4, 64);
/// let b = plain.buckets(b"key", 4, 64);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleHashBuckets<H = StdHasher> {
    hasher: H,
    hashing: SliceHashing,
}

impl DoubleHashBuckets<StdHasher> {
    /// Default hasher with enhanced double hashing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hasher: StdHasher::new(),
            hashing: SliceHashing::EnhancedDouble,
        }
    }
}

impl<H: BloomHasher> DoubleHashBuckets<H> {
    /// Generator with an explicit hasher and slice hashing scheme.
    #[must_use]
    pub const fn with_hasher(hasher: H, hashing: SliceHashing) -> Self {
        Self { hasher, hashing }
    }

    /// The underlying hasher.
    #[must_use]
    pub const fn hasher(&self) -> &H {
        &self.hasher
    }

    /// The slice hashing scheme.
    #[must_use]
    pub const fn hashing(&self) -> SliceHashing {
        self.hashing
    }

    /// Same hasher, different slice hashing scheme.
    #[must_use]
    pub fn with_hashing(self, hashing: SliceHashing) -> Self {
        Self { hashing, ..self }
    }
}

impl<H: BloomHasher + Default> Default for DoubleHashBuckets<H> {
    fn default() -> Self {
        Self {
            hasher: H::default(),
            hashing: SliceHashing::default(),
        }
    }
}

impl<H: BloomHasher> BucketGenerator for DoubleHashBuckets<H> {
    fn buckets(&self, token: &[u8], slices_count: usize, bits_per_slice: usize) -> Vec<usize> {
        let (h1, h2) = self.hasher.hash_bytes_pair(token);
        (0..slices_count as u64)
            .map(|i| reduce(self.hashing.slice_hash(h1, h2, i), bits_per_slice))
            .collect()
    }
}
