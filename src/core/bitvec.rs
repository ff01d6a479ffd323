//! Fixed-length bit vector owned by a filter.
//!
//! Bits are packed into 64-bit words, little-endian bit order inside each word:
//!
//! ```text
//! Word 0: [bit 0][bit 1]...[bit 63]
//! Word 1: [bit 64][bit 65]...[bit 127]
//! ```
//!
//! Bits past `len` in the last word are padding and always zero; `from_raw`
//! rejects input that violates this so a decoded vector counts ones exactly
//! like the one that was encoded.
//!
//! # Examples
//!
//! ```
//! use slicebloom::core::bitvec::BitVec;
//!
//! let mut bv = BitVec::new(100).unwrap();
//! bv.set(42);
//! assert!(bv.get(42));
//! assert!(!bv.get(43));
//! assert_eq!(bv.count_ones(), 1);
//! ```

use crate::error::{Result, SliceBloomError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fixed-length bit array backed by `Box<[u64]>`.
///
/// Mutation goes through `&mut self`; a filter that owns one is therefore
/// mutated only through its own `&mut` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBitVec", into = "RawBitVec"))]
pub struct BitVec {
    words: Box<[u64]>,
    len: usize,
}

impl BitVec {
    /// Create a zeroed bit vector of `num_bits` bits.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFilterSize` if `num_bits` is 0 or the words can't be
    /// allocated.
    pub fn new(num_bits: usize) -> Result<Self> {
        if num_bits == 0 {
            return Err(SliceBloomError::invalid_filter_size(num_bits));
        }

        let num_words = words_for(num_bits);
        let mut words = Vec::new();
        words
            .try_reserve_exact(num_words)
            .map_err(|_| SliceBloomError::invalid_filter_size(num_bits))?;
        words.resize(num_words, 0u64);

        Ok(Self {
            words: words.into_boxed_slice(),
            len: num_bits,
        })
    }

    /// Number of bits.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// `true` if the vector holds no bits; never the case after `new` or `from_raw`.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set a bit to 1. Returns `true` if the bit was previously clear.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[inline]
    pub fn set(&mut self, index: usize) -> bool {
        assert!(
            index < self.len,
            "BitVec index out of bounds: index={} len={}",
            index,
            self.len
        );

        let mask = 1u64 << (index % 64);
        let word = &mut self.words[index / 64];
        let was_clear = *word & mask == 0;
        *word |= mask;
        was_clear
    }

    /// Read a bit.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(
            index < self.len,
            "BitVec index out of bounds: index={} len={}",
            index,
            self.len
        );

        self.words[index / 64] & (1u64 << (index % 64)) != 0
    }

    /// Number of bits set to 1.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Number of bits set to 1 within `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > len`.
    #[must_use]
    pub fn count_ones_in(&self, start: usize, end: usize) -> usize {
        assert!(
            start <= end && end <= self.len,
            "invalid range [{}..{}) for BitVec of length {}",
            start,
            end,
            self.len
        );
        if start == end {
            return 0;
        }

        let first = start / 64;
        let last = (end - 1) / 64;
        let head_mask = u64::MAX << (start % 64);
        let tail_mask = u64::MAX >> (63 - (end - 1) % 64);

        if first == last {
            return (self.words[first] & head_mask & tail_mask).count_ones() as usize;
        }

        let mut total = (self.words[first] & head_mask).count_ones() as usize;
        total += self.words[first + 1..last]
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum::<usize>();
        total + (self.words[last] & tail_mask).count_ones() as usize
    }

    /// Number of 64-bit words backing the vector.
    #[must_use]
    #[inline]
    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    /// Backing words, read-only.
    #[must_use]
    #[inline]
    pub fn as_words(&self) -> &[u64] {
        &self.words
    }

    /// Heap plus inline size in bytes.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>() + std::mem::size_of::<Self>()
    }

    /// Rebuild a vector from its words (for decoding).
    ///
    /// # Errors
    ///
    /// - `InvalidFilterSize` if `len == 0`
    /// - `InvalidParameters` if the word count doesn't match `len`, or any
    ///   padding bit past `len` is set
    ///
    /// # Examples
    ///
    /// ```
    /// use slicebloom::core::BitVec;
    ///
    /// let mut original = BitVec::new(128).unwrap();
    /// original.set(42);
    ///
    /// let restored = BitVec::from_raw(original.as_words().to_vec(), original.len()).unwrap();
    /// assert_eq!(restored, original);
    /// ```
    pub fn from_raw(words: Vec<u64>, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(SliceBloomError::invalid_filter_size(len));
        }

        let required = words_for(len);
        if words.len() != required {
            return Err(SliceBloomError::invalid_parameters(format!(
                "expected {} words for {} bits, got {}",
                required,
                len,
                words.len()
            )));
        }

        let tail_bits = len % 64;
        if tail_bits != 0 {
            let padding = words[required - 1] >> tail_bits;
            if padding != 0 {
                return Err(SliceBloomError::invalid_parameters(format!(
                    "padding bits past length {} are set",
                    len
                )));
            }
        }

        Ok(Self {
            words: words.into_boxed_slice(),
            len,
        })
    }
}

#[inline]
const fn words_for(bits: usize) -> usize {
    bits / 64 + (bits % 64 != 0) as usize
}

/// Wire shape of a [`BitVec`] for serde.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct RawBitVec {
    words: Vec<u64>,
    len: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBitVec> for BitVec {
    type Error = SliceBloomError;

    fn try_from(raw: RawBitVec) -> Result<Self> {
        BitVec::from_raw(raw.words, raw.len)
    }
}

#[cfg(feature = "serde")]
impl From<BitVec> for RawBitVec {
    fn from(bv: BitVec) -> Self {
        Self {
            words: bv.words.into_vec(),
            len: bv.len,
        }
    }
}
