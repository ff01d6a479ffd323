//! # Sliced Bloom Filter
//!
//! A Bloom filter whose bit array is cut into `k` equal slices, one per hash
//! function. Every element sets exactly one bit in every slice:
//!
//! ```text
//! bits:  [====slice 0====][====slice 1====] ... [===slice k-1===]
//!              ↑ b₀              ↑ b₁                  ↑ bₖ₋₁
//!
//! bit index for slice i = i × bits_per_slice + bᵢ
//! ```
//!
//! Because no two hash functions can collide on the same bit, each slice
//! behaves like an independent one-hash filter and the false positive
//! probability after `n` insertions is the product of the slice fill ratios:
//!
//! ```text
//! P(FP) = ∏ᵢ (1 - e^(-n/m)) = (1 - e^(-n/m))^k
//! ```
//!
//! ## Capacity
//!
//! Unlike a classic Bloom filter, this one refuses insertions past its
//! configured capacity. The filter is full once the insertion count exceeds
//! `capacity`, so `capacity + 1` insertions succeed and every later
//! [`add_without_check`](SlicedBloomFilter::add_without_check) returns
//! [`FilterFull`](crate::SliceBloomError::FilterFull).
//!
//! ## Collaborators
//!
//! - A [`ParameterDeriver`] chooses `k` and `m` from the capacity and target
//!   rate, at construction and again when a persisted filter is decoded.
//! - A [`BucketGenerator`] turns an element's [`HashToken`] bytes into one
//!   offset per slice.
//!
//! ## References
//!
//! - Chang, F., Feng, W., & Li, K. (2004). "Approximate caches for packet classification"
//! - Almeida, P., Baquero, C., Preguiça, N., & Hutchison, D. (2007). "Scalable Bloom Filters"

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

use crate::core::bitvec::BitVec;
use crate::core::config::FilterConfig;
use crate::core::filter::MembershipFilter;
use crate::core::params::{OptimalSlicing, ParameterDeriver};
use crate::error::{Result, SliceBloomError};
use crate::hash::{BucketGenerator, DefaultBuckets, HashToken};
use std::fmt;

/// Fill statistics for a single slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceStats {
    /// Slice position, `0..slices_count`.
    pub index: usize,
    /// Number of set bits in the slice.
    pub bits_set: usize,
    /// `bits_set / bits_per_slice`.
    pub saturation: f64,
}

/// Bloom filter partitioned into one slice per hash function.
///
/// # Type Parameters
///
/// * `B` - Bucket generator, defaults to [`DefaultBuckets`]
///
/// # Thread Safety
///
/// - **Insert**: requires `&mut self`; wrap in `Arc<Mutex<_>>` for shared writers
/// - **Query**: `&self`, any number of concurrent readers
///
/// The filter is `Send + Sync` whenever `B` is.
///
/// # Examples
///
/// ```
/// use slicebloom::SlicedBloomFilter;
///
/// let mut filter = SlicedBloomFilter::new(100, 0.01)?;
/// assert_eq!(filter.add("a")?, false);
/// assert_eq!(filter.add("a")?, true);
/// assert!(filter.contains("a"));
/// assert!(!filter.contains("b"));
/// # Ok::<(), slicebloom::SliceBloomError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SlicedBloomFilter<B = DefaultBuckets> {
    config: FilterConfig,
    slices_count: usize,
    bits_per_slice: usize,
    bits: BitVec,
    /// Insertions recorded through `add_without_check`.
    count: usize,
    buckets: B,
}

impl SlicedBloomFilter<DefaultBuckets> {
    /// Create a filter with the default deriver and bucket generator.
    ///
    /// # Errors
    ///
    /// - `InvalidCapacity` if `capacity == 0`
    /// - `FalsePositiveRateOutOfBounds` if the rate is not in (0, 1)
    /// - `InvalidHashCount` if the rate needs more than 64 slices
    ///
    /// # Examples
    ///
    /// ```
    /// use slicebloom::SlicedBloomFilter;
    ///
    /// let filter = SlicedBloomFilter::new(100, 0.01).unwrap();
    /// assert_eq!(filter.slices_count(), 7);
    /// assert_eq!(filter.bits_per_slice(), 137);
    /// ```
    pub fn new(capacity: usize, false_positive_rate: f64) -> Result<Self> {
        Self::with_buckets(capacity, false_positive_rate, DefaultBuckets::default())
    }
}

impl<B: BucketGenerator> SlicedBloomFilter<B> {
    /// Create a filter with a custom bucket generator.
    ///
    /// # Errors
    ///
    /// Same as [`SlicedBloomFilter::new`].
    pub fn with_buckets(capacity: usize, false_positive_rate: f64, buckets: B) -> Result<Self> {
        let config = FilterConfig::new(capacity, false_positive_rate)?;
        Self::with_parts(config, &OptimalSlicing, buckets)
    }

    /// Create a filter from a validated configuration and explicit
    /// collaborators.
    ///
    /// # Errors
    ///
    /// - Any error returned by `deriver`
    /// - `InvalidParameters` if the deriver answers 0 for either dimension
    /// - `InvalidFilterSize` if `slices_count × bits_per_slice` overflows
    ///
    /// # Examples
    ///
    /// ```
    /// use slicebloom::core::{FilterConfig, OptimalSlicing};
    /// use slicebloom::hash::DefaultBuckets;
    /// use slicebloom::SlicedBloomFilter;
    ///
    /// let config = FilterConfig::new(1_000, 0.001).unwrap();
    /// let filter = SlicedBloomFilter::with_parts(config, &OptimalSlicing, DefaultBuckets::default()).unwrap();
    /// assert_eq!(filter.slices_count(), 10);
    /// ```
    pub fn with_parts<D>(config: FilterConfig, deriver: &D, buckets: B) -> Result<Self>
    where
        D: ParameterDeriver + ?Sized,
    {
        let (slices_count, bits_per_slice, total_bits) = derive_geometry(&config, deriver)?;
        let bits = BitVec::new(total_bits)?;

        tracing::debug!(
            capacity = config.capacity(),
            false_positive_rate = config.false_positive_rate(),
            slices_count,
            bits_per_slice,
            "created sliced bloom filter"
        );

        Ok(Self {
            config,
            slices_count,
            bits_per_slice,
            bits,
            count: 0,
            buckets,
        })
    }

    /// Rebuild a filter from persisted state.
    ///
    /// Geometry is derived again from `config`; the stored bits must match it.
    pub(crate) fn from_persisted<D>(
        config: FilterConfig,
        deriver: &D,
        buckets: B,
        words: Vec<u64>,
        bit_len: usize,
        count: usize,
    ) -> Result<Self>
    where
        D: ParameterDeriver + ?Sized,
    {
        let (slices_count, bits_per_slice, total_bits) = derive_geometry(&config, deriver)?;

        if bit_len != total_bits {
            return Err(SliceBloomError::invalid_parameters(format!(
                "stored bit length {} does not match derived geometry {} x {}",
                bit_len, slices_count, bits_per_slice
            )));
        }
        // A full filter holds capacity + 1 insertions
        if count > config.capacity().saturating_add(1) {
            return Err(SliceBloomError::invalid_parameters(format!(
                "stored count {} exceeds capacity {} + 1",
                count,
                config.capacity()
            )));
        }
        let bits = BitVec::from_raw(words, bit_len)?;

        if count > config.capacity() {
            tracing::warn!(
                capacity = config.capacity(),
                count,
                "restored sliced bloom filter is already full"
            );
        }

        Ok(Self {
            config,
            slices_count,
            bits_per_slice,
            bits,
            count,
            buckets,
        })
    }

    /// Test whether an element may have been added.
    ///
    /// `false` is definitive; `true` may be a false positive.
    ///
    /// # Panics
    ///
    /// Panics if the bucket generator breaks its contract: a number of
    /// offsets other than `slices_count`, or an offset `>= bits_per_slice`.
    #[must_use]
    pub fn contains<T: HashToken + ?Sized>(&self, element: &T) -> bool {
        self.bucket_indices(element)
            .into_iter()
            .all(|index| self.bits.get(index))
    }

    /// Add an element if it is not already (probably) present.
    ///
    /// Returns `Ok(true)` when the element was reported present, in which case
    /// nothing changes, and `Ok(false)` after inserting it.
    ///
    /// # Errors
    ///
    /// Returns `FilterFull` if the element is absent and the filter is full.
    ///
    /// # Panics
    ///
    /// Same as [`contains`](Self::contains).
    pub fn add<T: HashToken + ?Sized>(&mut self, element: &T) -> Result<bool> {
        if self.contains(element) {
            return Ok(true);
        }
        self.add_without_check(element)?;
        Ok(false)
    }

    /// Insert an element without testing for it first.
    ///
    /// Every call that succeeds increments [`len`](Self::len) by one, even if
    /// all of the element's bits were already set.
    ///
    /// # Errors
    ///
    /// Returns `FilterFull` once more than `capacity` insertions have been
    /// recorded. The filter is left untouched.
    ///
    /// # Panics
    ///
    /// Same as [`contains`](Self::contains).
    pub fn add_without_check<T: HashToken + ?Sized>(&mut self, element: &T) -> Result<()> {
        if self.is_full() {
            tracing::debug!(
                capacity = self.config.capacity(),
                count = self.count,
                "rejected insertion into full sliced bloom filter"
            );
            return Err(SliceBloomError::filter_full(self.config.capacity(), self.count));
        }

        for index in self.bucket_indices(element) {
            self.bits.set(index);
        }
        self.count += 1;
        Ok(())
    }

    /// Add every element, stopping at the first error.
    ///
    /// Returns how many elements were newly inserted (as opposed to reported
    /// present).
    ///
    /// # Errors
    ///
    /// Returns `FilterFull` if the filter fills up part way; elements before
    /// the failing one stay inserted.
    pub fn add_all<'a, T, I>(&mut self, elements: I) -> Result<usize>
    where
        T: HashToken + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut inserted = 0;
        for element in elements {
            if !self.add(element)? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// `true` if every element is probably present.
    #[must_use]
    pub fn contains_all<'a, T, I>(&self, elements: I) -> bool
    where
        T: HashToken + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        elements.into_iter().all(|e| self.contains(e))
    }

    /// `true` if at least one element is probably present.
    #[must_use]
    pub fn contains_any<'a, T, I>(&self, elements: I) -> bool
    where
        T: HashToken + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        elements.into_iter().any(|e| self.contains(e))
    }

    fn bucket_indices<T: HashToken + ?Sized>(&self, element: &T) -> Vec<usize> {
        let token = element.token();
        let buckets = self
            .buckets
            .buckets(&token, self.slices_count, self.bits_per_slice);
        assert_eq!(
            buckets.len(),
            self.slices_count,
            "bucket generator returned the wrong number of offsets"
        );

        buckets
            .into_iter()
            .enumerate()
            .map(|(slice, offset)| {
                assert!(
                    offset < self.bits_per_slice,
                    "bucket offset {} out of slice width {}",
                    offset,
                    self.bits_per_slice
                );
                slice * self.bits_per_slice + offset
            })
            .collect()
    }
}

impl<B> SlicedBloomFilter<B> {
    /// `true` once the insertion count exceeds `capacity`.
    #[must_use]
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count > self.config.capacity()
    }

    /// Number of recorded insertions.
    #[must_use]
    #[inline]
    pub const fn size(&self) -> usize {
        self.count
    }

    /// Alias of [`size`](Self::size).
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// `true` if nothing has been inserted.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of slices (hash functions).
    #[must_use]
    #[inline]
    pub const fn slices_count(&self) -> usize {
        self.slices_count
    }

    /// Width of each slice in bits.
    #[must_use]
    #[inline]
    pub const fn bits_per_slice(&self) -> usize {
        self.bits_per_slice
    }

    /// Configured capacity.
    #[must_use]
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.config.capacity()
    }

    /// Configured false positive target (not the current estimate; see
    /// [`estimated_false_positive_rate`](Self::estimated_false_positive_rate)).
    #[must_use]
    #[inline]
    pub const fn false_positive_rate(&self) -> f64 {
        self.config.false_positive_rate()
    }

    /// The capacity and target this filter was built from.
    #[must_use]
    #[inline]
    pub const fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Total number of bits, `slices_count × bits_per_slice`.
    #[must_use]
    #[inline]
    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }

    /// Read-only view of the bit array.
    #[must_use]
    #[inline]
    pub const fn bits(&self) -> &BitVec {
        &self.bits
    }

    /// The bucket generator in use.
    #[must_use]
    #[inline]
    pub const fn bucket_generator(&self) -> &B {
        &self.buckets
    }

    /// Heap plus inline size in bytes, excluding the bucket generator's heap.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.bits.memory_usage() + std::mem::size_of::<Self>() - std::mem::size_of::<BitVec>()
    }

    /// Fraction of all bits that are set.
    #[must_use]
    pub fn saturation(&self) -> f64 {
        self.bits.count_ones() as f64 / self.bits.len() as f64
    }

    /// Fill statistics for every slice.
    ///
    /// ```
    /// use slicebloom::SlicedBloomFilter;
    ///
    /// let mut filter = SlicedBloomFilter::new(100, 0.01).unwrap();
    /// filter.add("x").unwrap();
    /// let stats = filter.slice_stats();
    /// assert_eq!(stats.len(), 7);
    /// assert!(stats.iter().all(|s| s.bits_set == 1));
    /// ```
    #[must_use]
    pub fn slice_stats(&self) -> Vec<SliceStats> {
        (0..self.slices_count)
            .map(|index| {
                let start = index * self.bits_per_slice;
                let bits_set = self.bits.count_ones_in(start, start + self.bits_per_slice);
                SliceStats {
                    index,
                    bits_set,
                    saturation: bits_set as f64 / self.bits_per_slice as f64,
                }
            })
            .collect()
    }

    /// Current false positive probability, from the observed fill of each
    /// slice.
    ///
    /// A query is a false positive only if it hits a set bit in every slice,
    /// so this is the product of the slice saturations. An empty filter
    /// returns 0.0.
    #[must_use]
    pub fn estimated_false_positive_rate(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.slice_stats()
            .iter()
            .map(|s| s.saturation)
            .product()
    }
}

impl<B: BucketGenerator> MembershipFilter for SlicedBloomFilter<B> {
    fn contains<T: HashToken + ?Sized>(&self, element: &T) -> bool {
        SlicedBloomFilter::contains(self, element)
    }

    fn add<T: HashToken + ?Sized>(&mut self, element: &T) -> Result<bool> {
        SlicedBloomFilter::add(self, element)
    }

    fn len(&self) -> usize {
        self.count
    }

    fn capacity(&self) -> usize {
        self.config.capacity()
    }

    fn false_positive_rate(&self) -> f64 {
        self.config.false_positive_rate()
    }

    fn bit_count(&self) -> usize {
        self.bits.len()
    }

    fn hash_count(&self) -> usize {
        self.slices_count
    }
}

impl<B> fmt::Display for SlicedBloomFilter<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SlicedBloomFilter{}[slicesCount={}, bitsPerSlice={}]",
            self.config, self.slices_count, self.bits_per_slice
        )
    }
}

/// Ask the deriver for `(slices_count, bits_per_slice)` and check the product.
pub(crate) fn derive_geometry<D>(config: &FilterConfig, deriver: &D) -> Result<(usize, usize, usize)>
where
    D: ParameterDeriver + ?Sized,
{
    let capacity = config.capacity();
    let fp_rate = config.false_positive_rate();

    let slices_count = deriver.slices_count(capacity, fp_rate)?;
    if slices_count == 0 {
        return Err(SliceBloomError::invalid_parameters(
            "parameter deriver returned 0 slices",
        ));
    }

    let bits_per_slice = deriver.bits_per_slice(capacity, fp_rate, slices_count)?;
    if bits_per_slice == 0 {
        return Err(SliceBloomError::invalid_parameters(
            "parameter deriver returned 0 bits per slice",
        ));
    }

    let total_bits = slices_count
        .checked_mul(bits_per_slice)
        .ok_or_else(|| SliceBloomError::invalid_filter_size(usize::MAX))?;

    Ok((slices_count, bits_per_slice, total_bits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{DoubleHashBuckets, SliceHashing, StdHasher};

    /// Puts every element at offset 0 of every slice.
    #[derive(Debug, Clone, PartialEq)]
    struct FirstBucket;

    impl BucketGenerator for FirstBucket {
        fn buckets(&self, _token: &[u8], slices_count: usize, _bits_per_slice: usize) -> Vec<usize> {
            vec![0; slices_count]
        }
    }

    struct FixedDeriver(usize, usize);

    impl ParameterDeriver for FixedDeriver {
        fn slices_count(&self, _capacity: usize, _fp: f64) -> Result<usize> {
            Ok(self.0)
        }

        fn bits_per_slice(&self, _capacity: usize, _fp: f64, _slices: usize) -> Result<usize> {
            Ok(self.1)
        }
    }

    #[test]
    fn test_scenario_capacity_100() {
        let mut filter = SlicedBloomFilter::new(100, 0.01).unwrap();
        assert_eq!(filter.add("a").unwrap(), false);
        assert_eq!(filter.add("a").unwrap(), true);
        assert!(!filter.contains("b"));
        assert_eq!(filter.size(), 1);
    }

    #[test]
    fn test_geometry() {
        let filter = SlicedBloomFilter::new(100, 0.01).unwrap();
        assert_eq!(filter.slices_count(), 7);
        assert_eq!(filter.bits_per_slice(), 137);
        assert_eq!(filter.bit_count(), 7 * 137);
        assert_eq!(filter.capacity(), 100);
        assert_eq!(filter.false_positive_rate(), 0.01);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(SlicedBloomFilter::new(0, 0.01).unwrap_err().is_invalid_parameter());
        for fp in [0.0, 1.0, -0.1, 1.1, f64::NAN] {
            assert!(SlicedBloomFilter::new(10, fp).unwrap_err().is_invalid_parameter());
        }
    }

    #[test]
    fn test_no_false_negatives() {
        let mut filter = SlicedBloomFilter::new(5_000, 0.01).unwrap();
        for i in 0u64..5_000 {
            filter.add(&i).unwrap();
        }
        for i in 0u64..5_000 {
            assert!(filter.contains(&i), "false negative for {i}");
        }
    }

    #[test]
    fn test_add_without_check_counts_duplicates() {
        let mut filter = SlicedBloomFilter::new(10, 0.01).unwrap();
        filter.add_without_check("dup").unwrap();
        filter.add_without_check("dup").unwrap();
        assert_eq!(filter.size(), 2);
        assert!(filter.contains("dup"));
    }

    #[test]
    fn test_full_only_past_capacity() {
        let mut filter = SlicedBloomFilter::new(3, 0.01).unwrap();
        for i in 0u32..3 {
            assert!(!filter.is_full());
            filter.add_without_check(&i).unwrap();
        }
        // count == capacity is not full yet
        assert_eq!(filter.size(), 3);
        assert!(!filter.is_full());

        filter.add_without_check(&3u32).unwrap();
        assert_eq!(filter.size(), 4);
        assert!(filter.is_full());

        let before = filter.clone();
        let err = filter.add_without_check(&99u32).unwrap_err();
        assert_eq!(err, SliceBloomError::filter_full(3, 4));
        assert!(err.is_full());
        assert_eq!(filter, before);
    }

    #[test]
    fn test_add_on_full_filter_still_reports_present() {
        // 40 slices of 2 bits
        let mut filter = SlicedBloomFilter::new(1, 1e-12).unwrap();
        assert_eq!(filter.add("only").unwrap(), false);
        assert_eq!(filter.add("second").unwrap(), false);
        assert!(filter.is_full());
        assert_eq!(filter.add("only").unwrap(), true);
        assert!(filter.add("other").unwrap_err().is_full());
    }

    #[test]
    fn test_bits_land_in_their_own_slice() {
        let mut filter = SlicedBloomFilter::with_buckets(10, 0.01, FirstBucket).unwrap();
        filter.add("anything").unwrap();
        let m = filter.bits_per_slice();
        for slice in 0..filter.slices_count() {
            assert!(filter.bits().get(slice * m));
        }
        assert_eq!(filter.bits().count_ones(), filter.slices_count());
    }

    #[test]
    fn test_one_bit_per_slice_with_default_buckets() {
        let mut filter = SlicedBloomFilter::new(100, 0.01).unwrap();
        filter.add("x").unwrap();
        for stats in filter.slice_stats() {
            assert_eq!(stats.bits_set, 1, "slice {}", stats.index);
            assert!((stats.saturation - 1.0 / 137.0).abs() < 1e-12);
        }
        assert!((filter.saturation() - 1.0 / 137.0).abs() < 1e-12);
    }

    #[test]
    fn test_estimated_false_positive_rate() {
        let mut filter = SlicedBloomFilter::new(1_000, 0.01).unwrap();
        assert_eq!(filter.estimated_false_positive_rate(), 0.0);

        for i in 0u32..1_000 {
            filter.add_without_check(&i).unwrap();
        }
        let estimate = filter.estimated_false_positive_rate();
        assert!(estimate > 0.002 && estimate < 0.03, "estimate {estimate}");
    }

    #[test]
    fn test_deriver_returning_zero() {
        let config = FilterConfig::new(10, 0.1).unwrap();
        let err = SlicedBloomFilter::with_parts(config, &FixedDeriver(0, 10), FirstBucket).unwrap_err();
        assert!(matches!(err, SliceBloomError::InvalidParameters { .. }));
        let err = SlicedBloomFilter::with_parts(config, &FixedDeriver(3, 0), FirstBucket).unwrap_err();
        assert!(matches!(err, SliceBloomError::InvalidParameters { .. }));
    }

    #[test]
    fn test_geometry_overflow() {
        let config = FilterConfig::new(10, 0.1).unwrap();
        let err = SlicedBloomFilter::with_parts(config, &FixedDeriver(2, usize::MAX), FirstBucket)
            .unwrap_err();
        assert!(matches!(err, SliceBloomError::InvalidFilterSize { .. }));
    }

    #[test]
    fn test_custom_deriver_geometry() {
        let config = FilterConfig::new(10, 0.1).unwrap();
        let filter = SlicedBloomFilter::with_parts(config, &FixedDeriver(3, 5), FirstBucket).unwrap();
        assert_eq!(filter.slices_count(), 3);
        assert_eq!(filter.bits_per_slice(), 5);
        assert_eq!(filter.bit_count(), 15);
    }

    #[test]
    fn test_display() {
        let filter = SlicedBloomFilter::new(100, 0.01).unwrap();
        assert_eq!(
            filter.to_string(),
            "SlicedBloomFilter[capacity=100, falsePositiveRate=0.01][slicesCount=7, bitsPerSlice=137]"
        );
    }

    #[test]
    fn test_add_all_and_queries() {
        let mut filter = SlicedBloomFilter::new(100, 0.01).unwrap();
        let words = ["alpha", "beta", "gamma", "alpha"];
        assert_eq!(filter.add_all(words.iter().copied()).unwrap(), 3);
        assert_eq!(filter.size(), 3);
        assert!(filter.contains_all(["alpha", "gamma"]));
        assert!(filter.contains_any(["nope", "beta"]));
        assert!(!filter.contains_all(["alpha", "delta"]));
    }

    #[test]
    fn test_add_all_stops_when_full() {
        let mut filter = SlicedBloomFilter::new(2, 1e-12).unwrap();
        let err = filter.add_all([1u8, 2, 3, 4].iter()).unwrap_err();
        assert!(err.is_full());
        assert_eq!(filter.size(), 3);
    }

    #[test]
    fn test_membership_filter_trait() {
        fn exercise<F: MembershipFilter>(filter: &mut F) {
            assert!(filter.is_empty());
            assert_eq!(filter.add("k").unwrap(), false);
            assert!(filter.contains("k"));
            assert_eq!(filter.len(), 1);
            assert_eq!(filter.hash_count(), 7);
            assert_eq!(filter.bit_count(), 959);
        }
        let mut filter = SlicedBloomFilter::new(100, 0.01).unwrap();
        exercise(&mut filter);
    }

    #[test]
    fn test_hashing_choice_changes_layout_not_behaviour() {
        let buckets = DoubleHashBuckets::with_hasher(StdHasher::with_seed(3), SliceHashing::Double);
        let mut filter = SlicedBloomFilter::with_buckets(500, 0.01, buckets).unwrap();
        for i in 0u16..500 {
            filter.add(&i).unwrap();
        }
        assert!((0u16..500).all(|i| filter.contains(&i)));
        assert_eq!(filter.bucket_generator().hashing(), SliceHashing::Double);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = SlicedBloomFilter::new(100, 0.01).unwrap();
        original.add("a").unwrap();
        let mut copy = original.clone();
        copy.add("b").unwrap();
        assert!(!original.contains("b"));
        assert_eq!(original.size(), 1);
        assert_eq!(copy.size(), 2);
    }

    #[test]
    fn test_from_persisted_validation() {
        let filter = SlicedBloomFilter::new(100, 0.01).unwrap();
        let words = filter.bits().as_words().to_vec();
        let config = *filter.config();

        let restored = SlicedBloomFilter::from_persisted(
            config,
            &OptimalSlicing,
            DefaultBuckets::default(),
            words.clone(),
            959,
            0,
        )
        .unwrap();
        assert_eq!(restored, filter);

        assert!(SlicedBloomFilter::from_persisted(
            config,
            &OptimalSlicing,
            DefaultBuckets::default(),
            words.clone(),
            960,
            0,
        )
        .is_err());

        assert!(SlicedBloomFilter::from_persisted(
            config,
            &OptimalSlicing,
            DefaultBuckets::default(),
            words.clone(),
            959,
            102,
        )
        .is_err());
    }

    #[test]
    fn test_from_persisted_accepts_full_count() {
        let filter = SlicedBloomFilter::new(100, 0.01).unwrap();
        let restored = SlicedBloomFilter::from_persisted(
            *filter.config(),
            &OptimalSlicing,
            DefaultBuckets::default(),
            filter.bits().as_words().to_vec(),
            959,
            101,
        )
        .unwrap();
        assert!(restored.is_full());
        assert_eq!(restored.size(), 101);
    }

    /// Returns one offset too many.
    struct LongBuckets;

    impl BucketGenerator for LongBuckets {
        fn buckets(&self, _token: &[u8], slices_count: usize, _bits_per_slice: usize) -> Vec<usize> {
            vec![0; slices_count + 1]
        }
    }

    /// Returns an offset equal to the slice width.
    struct WideBuckets;

    impl BucketGenerator for WideBuckets {
        fn buckets(&self, _token: &[u8], slices_count: usize, bits_per_slice: usize) -> Vec<usize> {
            vec![bits_per_slice; slices_count]
        }
    }

    #[test]
    #[should_panic(expected = "wrong number of offsets")]
    fn test_bucket_count_mismatch_panics() {
        let mut filter = SlicedBloomFilter::with_buckets(10, 0.01, LongBuckets).unwrap();
        let _ = filter.add_without_check("x");
    }

    #[test]
    #[should_panic(expected = "out of slice width")]
    fn test_bucket_offset_out_of_slice_panics() {
        let mut filter = SlicedBloomFilter::with_buckets(10, 0.01, WideBuckets).unwrap();
        let _ = filter.add_without_check("x");
    }

    #[test]
    fn test_oversized_filter_is_an_error() {
        let err = SlicedBloomFilter::new(usize::MAX / 4, 0.5).unwrap_err();
        assert!(err.is_invalid_parameter(), "{err}");
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SlicedBloomFilter>();
    }
}
