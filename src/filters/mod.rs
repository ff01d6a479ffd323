//! Bloom filter implementations.
//!
//! # Available Filters
//!
//! - [`SlicedBloomFilter`] - one bit slice per hash function, fixed capacity
//!
//! # Examples
//!
//! ```
//! use slicebloom::filters::SlicedBloomFilter;
//!
//! let mut filter = SlicedBloomFilter::new(10_000, 0.01).unwrap();
//! filter.add("hello").unwrap();
//! assert!(filter.contains("hello"));
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod sliced;
pub use sliced::{SliceStats, SlicedBloomFilter};
