//! slicebloom: a sliced Bloom filter for Rust.
//!
//! A Bloom filter answers "possibly present" or "definitely absent" for an
//! element using a fixed-size bit array:
//! - **False positives**: may report an element that was never added
//! - **Zero false negatives**: an element that was added is always reported
//!
//! The sliced variant cuts the bit array into `k` equal slices, one per hash
//! function, so every element sets exactly one bit in every slice and no two
//! hash functions ever compete for the same bit.
//!
//! # Quick Start
//!
//! ```
//! use slicebloom::SlicedBloomFilter;
//!
//! // 10,000 elements at a 1% false positive target
//! let mut filter = SlicedBloomFilter::new(10_000, 0.01)?;
//!
//! assert_eq!(filter.add("hello")?, false); // newly inserted
//! assert_eq!(filter.add("hello")?, true);  // already present
//!
//! assert!(filter.contains("hello"));
//! assert!(!filter.contains("goodbye"));
//! # Ok::<(), slicebloom::SliceBloomError>(())
//! ```
//!
//! # Capacity
//!
//! The filter records how many insertions it has taken. It becomes full once
//! that count exceeds the configured capacity, and then refuses further
//! insertions so the false positive rate stays near the target:
//!
//! ```
//! use slicebloom::SlicedBloomFilter;
//!
//! let mut filter = SlicedBloomFilter::new(2, 0.01)?;
//! filter.add_without_check(&1u32)?;
//! filter.add_without_check(&2u32)?;
//! assert!(!filter.is_full());
//! filter.add_without_check(&3u32)?;
//! assert!(filter.is_full());
//! assert!(filter.add_without_check(&4u32).unwrap_err().is_full());
//! # Ok::<(), slicebloom::SliceBloomError>(())
//! ```
//!
//! # Persistence
//!
//! Filters are written as a gzip-compressed big-endian payload
//! (see [`codec`]):
//!
//! ```
//! use slicebloom::SlicedBloomFilter;
//!
//! let mut filter = SlicedBloomFilter::new(1_000, 0.001)?;
//! filter.add(&42u64)?;
//!
//! let bytes = filter.to_bytes()?;
//! let restored = SlicedBloomFilter::from_bytes(&bytes)?;
//! assert_eq!(restored, filter);
//! # Ok::<(), slicebloom::SliceBloomError>(())
//! ```
//!
//! # Element Identity
//!
//! Elements are identified by the bytes their [`HashToken`] impl renders, not
//! by `std::hash::Hash`, which is not stable across processes. Implement
//! `HashToken` for your own types to put them in a filter.
//!
//! # Feature Flags
//!
//! | Feature  | Default | Enables |
//! |----------|---------|---------|
//! | `serde`  | yes     | `Serialize`/`Deserialize` for the filter and its parts |
//! | `xxhash` | no      | [`hash::XxHasher`] (XXH3) |
//!
//! # Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events on
//! construction, decoding and rejected insertions. It never installs a
//! subscriber.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::len_zero)]
#![allow(clippy::bool_assert_comparison)]
#![allow(clippy::clone_on_copy)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

/// Configuration, parameter derivation, bit storage and shared traits
pub mod core;

/// Error types and result aliases
pub mod error;

/// Filter implementations
pub mod filters;

/// Element tokens, hash functions and bucket generation
pub mod hash;

/// Type-safe builders
pub mod builder;

/// Gzip persisted form
pub mod codec;

/// Serialization support (requires `serde` feature)
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
pub mod serde_support;

pub use error::{Result, SliceBloomError};

pub use core::{FilterConfig, MembershipFilter, OptimalSlicing, ParameterDeriver};

pub use filters::{SliceStats, SlicedBloomFilter};

pub use builder::SlicedBloomFilterBuilder;

pub use hash::{BucketGenerator, DefaultBuckets, HashToken};

pub use codec::CodecError;

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use slicebloom::prelude::*;
///
/// let mut filter = SlicedBloomFilterBuilder::new()
///     .capacity(1_000)
///     .false_positive_rate(0.01)
///     .build()?;
/// filter.add("hello")?;
/// assert!(filter.contains("hello"));
/// # Ok::<(), SliceBloomError>(())
/// ```
pub mod prelude {
    pub use crate::builder::SlicedBloomFilterBuilder;
    pub use crate::core::{FilterConfig, MembershipFilter, OptimalSlicing, ParameterDeriver};
    pub use crate::error::{Result, SliceBloomError};
    pub use crate::filters::{SliceStats, SlicedBloomFilter};
    pub use crate::hash::{
        BloomHasher, BucketGenerator, DefaultBuckets, DoubleHashBuckets, HashToken,
        SliceHashing, StdHasher,
    };

    #[cfg(feature = "xxhash")]
    pub use crate::hash::XxHasher;
}
