//! Builder for sliced Bloom filters.
//!
//! # Type-State Pattern
//!
//! Required parameters are enforced at compile time; `build` only exists
//! once both have been supplied:
//!
//! ```text
//! Initial → WithCapacity → Complete → SlicedBloomFilter
//!       .capacity()   .false_positive_rate()   .build()
//! ```
//!
//! # Examples
//!
//! ```
//! use slicebloom::builder::SlicedBloomFilterBuilder;
//! use slicebloom::hash::SliceHashing;
//!
//! let filter = SlicedBloomFilterBuilder::new()
//!     .capacity(10_000)
//!     .false_positive_rate(0.01)
//!     .hashing(SliceHashing::Double)
//!     .build()
//!     .unwrap();
//! assert_eq!(filter.capacity(), 10_000);
//! ```
//!
//! ## Error Handling
//!
//! ```
//! use slicebloom::builder::SlicedBloomFilterBuilder;
//!
//! let result = SlicedBloomFilterBuilder::new()
//!     .capacity(0)
//!     .false_positive_rate(0.01)
//!     .build();
//! assert!(result.is_err());
//! ```

use super::validation;
use crate::error::Result;
use crate::filters::sliced::SlicedBloomFilter;
use crate::hash::{BloomHasher, BucketGenerator, DefaultBuckets, DoubleHashBuckets, SliceHashing};

/// Type-state marker: nothing set.
#[derive(Debug, Clone, Copy)]
pub struct Initial;

/// Type-state marker: capacity set.
#[derive(Debug, Clone, Copy)]
pub struct WithCapacity {
    capacity: usize,
}

/// Type-state marker: capacity and false positive rate set.
#[derive(Debug, Clone, Copy)]
pub struct Complete {
    capacity: usize,
    fp_rate: f64,
}

/// Builder for [`SlicedBloomFilter`].
///
/// # Type Parameters
///
/// - `State`: builder state (`Initial`, `WithCapacity`, `Complete`)
/// - `B`: bucket generator, defaults to [`DefaultBuckets`]
#[derive(Debug, Clone)]
pub struct SlicedBloomFilterBuilder<State, B = DefaultBuckets> {
    state: State,
    buckets: B,
}

impl SlicedBloomFilterBuilder<Initial, DefaultBuckets> {
    /// Builder with the default bucket generator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Initial,
            buckets: DefaultBuckets::default(),
        }
    }
}

impl Default for SlicedBloomFilterBuilder<Initial, DefaultBuckets> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> SlicedBloomFilterBuilder<Initial, B> {
    /// Set the capacity (required).
    #[must_use]
    pub fn capacity(self, capacity: usize) -> SlicedBloomFilterBuilder<WithCapacity, B> {
        SlicedBloomFilterBuilder {
            state: WithCapacity { capacity },
            buckets: self.buckets,
        }
    }
}

impl<B> SlicedBloomFilterBuilder<WithCapacity, B> {
    /// Set the target false positive rate (required).
    #[must_use]
    pub fn false_positive_rate(self, fp_rate: f64) -> SlicedBloomFilterBuilder<Complete, B> {
        SlicedBloomFilterBuilder {
            state: Complete {
                capacity: self.state.capacity,
                fp_rate,
            },
            buckets: self.buckets,
        }
    }
}

impl<State, B> SlicedBloomFilterBuilder<State, B> {
    /// Replace the bucket generator.
    ///
    /// ```
    /// use slicebloom::builder::SlicedBloomFilterBuilder;
    /// use slicebloom::hash::{DoubleHashBuckets, SliceHashing, StdHasher};
    ///
    /// let filter = SlicedBloomFilterBuilder::new()
    ///     .buckets(DoubleHashBuckets::with_hasher(StdHasher::with_seed(7), SliceHashing::Double))
    ///     .capacity(500)
    ///     .false_positive_rate(0.05)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(filter.bucket_generator().hasher().seed(), 7);
    /// ```
    #[must_use]
    pub fn buckets<G>(self, buckets: G) -> SlicedBloomFilterBuilder<State, G> {
        SlicedBloomFilterBuilder {
            state: self.state,
            buckets,
        }
    }
}

impl<State, H: BloomHasher> SlicedBloomFilterBuilder<State, DoubleHashBuckets<H>> {
    /// Choose how slice hashes are derived (defaults to
    /// [`SliceHashing::EnhancedDouble`]).
    #[must_use]
    pub fn hashing(self, hashing: SliceHashing) -> Self {
        Self {
            state: self.state,
            buckets: self.buckets.with_hashing(hashing),
        }
    }
}

impl<B: BucketGenerator> SlicedBloomFilterBuilder<Complete, B> {
    /// Validate the parameters and build the filter.
    ///
    /// # Errors
    ///
    /// - `InvalidCapacity` if the capacity is 0
    /// - `FalsePositiveRateOutOfBounds` if the rate is not in (0, 1)
    /// - `InvalidHashCount` if the rate needs more than 64 slices
    pub fn build(self) -> Result<SlicedBloomFilter<B>> {
        let Complete { capacity, fp_rate } = self.state;
        validation::validate_capacity(capacity)?;
        validation::validate_fp_rate(fp_rate)?;
        SlicedBloomFilter::with_buckets(capacity, fp_rate, self.buckets)
    }
}
