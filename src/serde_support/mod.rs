//! Serde integration (feature `serde`).
//!
//! [`SlicedBloomFilter`](crate::SlicedBloomFilter) implements `Serialize` and
//! `Deserialize` for any serde format. [`BitVec`](crate::core::BitVec),
//! [`FilterConfig`](crate::core::FilterConfig) and
//! [`SliceHashing`](crate::hash::SliceHashing) derive them as well.
//!
//! Use the gzip codec (`encode`/`decode`) when the bytes need to be read by
//! other implementations of the persisted form; serde output is only
//! understood by this crate.
//!
//! # Examples
//!
//! ```
//! use slicebloom::SlicedBloomFilter;
//!
//! let mut filter = SlicedBloomFilter::new(1_000, 0.01).unwrap();
//! filter.add(&42u64).unwrap();
//!
//! let bytes = bincode::serialize(&filter).unwrap();
//! let restored: SlicedBloomFilter = bincode::deserialize(&bytes).unwrap();
//! assert!(restored.contains(&42u64));
//! ```

pub mod sliced;
