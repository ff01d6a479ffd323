//! XXH3 hasher (feature `xxhash`).
//!
//! Wraps the `xxhash-rust` XXH3 implementation. XXH3 output is specified and
//! stable across platforms, so filters built with it can be persisted like
//! the default ones, as long as they are decoded with the same hasher.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "xxhash")]
//! # {
//! use slicebloom::hash::{BloomHasher, XxHasher};
//!
//! let h1 = XxHasher::with_seed(0).hash_bytes(b"test");
//! let h2 = XxHasher::with_seed(1).hash_bytes(b"test");
//! assert_ne!(h1, h2);
//! # }
//! ```

#![allow(clippy::module_name_repetitions)]

use super::hasher::BloomHasher;
use xxhash_rust::xxh3::{xxh3_64, xxh3_64_with_seed};

/// XXH3-64 hasher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XxHasher {
    seed: u64,
}

impl XxHasher {
    /// Hasher with seed 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { seed: 0 }
    }

    /// Hasher with an explicit seed.
    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// The seed in use.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl BloomHasher for XxHasher {
    #[inline]
    fn hash_bytes(&self, bytes: &[u8]) -> u64 {
        if self.seed == 0 {
            xxh3_64(bytes)
        } else {
            xxh3_64_with_seed(bytes, self.seed)
        }
    }

    #[inline]
    fn hash_bytes_with_seed(&self, bytes: &[u8], seed: u64) -> u64 {
        xxh3_64_with_seed(bytes, self.seed ^ seed)
    }

    #[inline]
    fn name(&self) -> &'static str {
        "XxHasher"
    }
}
