//! Element identity, hash functions and bucket generation.
//!
//! # Module Structure
//!
//! ```text
//! hash/
//! ├── token.rs    - HashToken: stable bytes for an element
//! ├── hasher.rs   - BloomHasher trait and StdHasher (seeded FNV-1a)
//! ├── xxhash.rs   - XxHasher (optional, feature = "xxhash")
//! ├── buckets.rs  - BucketGenerator trait and DoubleHashBuckets
//! └── mod.rs      - This file (public API)
//! ```
//!
//! The path from an element to bit positions is:
//!
//! ```text
//! element ──HashToken──▶ bytes ──BloomHasher──▶ (h₁, h₂) ──SliceHashing──▶ gᵢ ──reduce──▶ bucket[i]
//! ```
//!
//! # Feature Flags
//!
//! | Feature   | Enables        |
//! |-----------|----------------|
//! | (default) | [`StdHasher`]  |
//! | `xxhash`  | `XxHasher`     |
//!
//! # Examples
//!
//! ```
//! use slicebloom::hash::{BucketGenerator, DefaultBuckets, HashToken};
//!
//! let generator = DefaultBuckets::default();
//! let buckets = generator.buckets(&"hello".token(), 7, 137);
//! assert_eq!(buckets.len(), 7);
//! ```

pub mod buckets;
pub mod hasher;
pub mod token;

#[cfg(feature = "xxhash")]
pub mod xxhash;

pub use buckets::{BucketGenerator, DoubleHashBuckets, SliceHashing};
pub use hasher::{BloomHasher, StdHasher};
pub use token::HashToken;

#[cfg(feature = "xxhash")]
pub use xxhash::XxHasher;

/// Bucket generator used when none is specified.
pub type DefaultBuckets = DoubleHashBuckets<StdHasher>;
