//! Base hash functions for bucket generation.
//!
//! A [`BloomHasher`] turns token bytes into 64-bit values. Bucket generators
//! (see [`buckets`](super::buckets)) derive one offset per slice from a pair
//! of such values.
//!
//! Hashers must be deterministic across processes: a filter written to disk
//! by one run is queried by another.
//!
//! # Examples
//!
//! ```
//! use slicebloom::hash::{BloomHasher, StdHasher};
//!
//! let hasher = StdHasher::new();
//! let (h1, h2) = hasher.hash_bytes_pair(b"hello world");
//! assert_ne!(h1, h2);
//! ```

#![allow(clippy::module_name_repetitions)]

use std::hash::Hasher;

/// Seed mixed into the second hash of a pair.
const PAIR_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Byte-oriented 64-bit hash function.
///
/// # Requirements
///
/// - **Determinism**: same input, same output, in every process
/// - **Uniform distribution** over `u64`
/// - **Independence**: different seeds give statistically independent outputs
pub trait BloomHasher: Send + Sync {
    /// Hash bytes to a 64-bit value.
    fn hash_bytes(&self, bytes: &[u8]) -> u64;

    /// Hash bytes with an extra seed.
    ///
    /// The default XORs the seed into the result, which is enough for
    /// independence but implementations with native seeding should override it.
    fn hash_bytes_with_seed(&self, bytes: &[u8], seed: u64) -> u64 {
        self.hash_bytes(bytes) ^ seed
    }

    /// Two independent hashes of the same input, for double hashing.
    fn hash_bytes_pair(&self, bytes: &[u8]) -> (u64, u64) {
        (
            self.hash_bytes(bytes),
            self.hash_bytes_with_seed(bytes, PAIR_SEED),
        )
    }

    /// Name used in debug output.
    fn name(&self) -> &'static str;
}

/// 64-bit FNV-1a state with a final avalanche.
///
/// Plain FNV-1a leaves the high bits poorly mixed for short inputs, and the
/// range reduction used for bucket offsets reads the high bits, so `finish`
/// runs the `splitmix64` finalizer over the state.
#[derive(Debug, Clone)]
pub struct DeterministicHasher {
    state: u64,
}

impl DeterministicHasher {
    /// Hasher at the FNV-1a offset basis.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: 0xcbf2_9ce4_8422_2325,
        }
    }
}

impl Default for DeterministicHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for DeterministicHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u64::from(byte);
            self.state = self.state.wrapping_mul(0x0000_0100_0000_01b3);
        }
    }

    fn finish(&self) -> u64 {
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }
}

/// Default hasher: seeded, deterministic FNV-1a.
///
/// Output is identical on every platform and in every process, so persisted
/// filters stay queryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StdHasher {
    seed: u64,
}

impl StdHasher {
    /// Hasher with the default seed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            seed: 0x517c_c1b7_2722_0a95,
        }
    }

    /// Hasher with an explicit seed.
    ///
    /// ```
    /// use slicebloom::hash::{BloomHasher, StdHasher};
    ///
    /// let h1 = StdHasher::with_seed(0).hash_bytes(b"test");
    /// let h2 = StdHasher::with_seed(42).hash_bytes(b"test");
    /// assert_ne!(h1, h2);
    /// ```
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

impl Default for StdHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl BloomHasher for StdHasher {
    #[inline]
    fn hash_bytes(&self, bytes: &[u8]) -> u64 {
        let mut hasher = DeterministicHasher::new();
        hasher.write_u64(self.seed);
        hasher.write(bytes);
        hasher.finish()
    }

    #[inline]
    fn hash_bytes_with_seed(&self, bytes: &[u8], seed: u64) -> u64 {
        let mut hasher = DeterministicHasher::new();
        hasher.write_u64(self.seed ^ seed);
        hasher.write(bytes);
        hasher.finish()
    }

    #[inline]
    fn name(&self) -> &'static str {
        "StdHasher"
    }
}
