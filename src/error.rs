//! Error types for sliced Bloom filter operations.
//!
//! Every fallible operation in the crate returns [`Result<T>`], whose error
//! type is [`SliceBloomError`]. Errors fall into three groups:
//!
//! - **Invalid parameters**: the filter could not be constructed from the
//!   requested capacity / false positive rate (see
//!   [`SliceBloomError::is_invalid_parameter`]).
//! - **Full**: an unchecked insertion was rejected because the filter already
//!   holds more than `capacity` insertions. The filter is unchanged and the caller may
//!   stop inserting or rebuild with a larger capacity.
//! - **I/O**: reading or writing the persisted form failed, including
//!   malformed or truncated streams.
//!
//! # Error Propagation
//!
//! ```
//! use slicebloom::{Result, SlicedBloomFilter};
//!
//! fn build_and_fill(items: &[&str]) -> Result<SlicedBloomFilter> {
//!     let mut filter = SlicedBloomFilter::new(items.len(), 0.01)?;
//!     for item in items {
//!         filter.add(item)?;
//!     }
//!     Ok(filter)
//! }
//! # assert!(build_and_fill(&["a", "b"]).is_ok());
//! ```

#![allow(clippy::module_name_repetitions)]

use std::fmt;
use std::io;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SliceBloomError>;

/// Errors that can occur while building, filling or persisting a filter.
///
/// `Clone` + `PartialEq` keep errors easy to compare in tests; for that reason
/// the I/O variant stores the [`io::ErrorKind`] and message rather than the
/// original `io::Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum SliceBloomError {
    /// Parameters that don't describe a usable filter.
    InvalidParameters {
        /// Human-readable description of what's invalid.
        message: String,
    },

    /// False positive rate outside the open interval (0, 1).
    ///
    /// NaN is reported through this variant as well.
    FalsePositiveRateOutOfBounds {
        /// The rejected rate.
        fp_rate: f64,
    },

    /// Capacity must be at least one element.
    InvalidCapacity {
        /// The rejected capacity.
        capacity: usize,
    },

    /// Derived slice count (number of hash functions) outside the supported range.
    InvalidHashCount {
        /// The derived count.
        count: usize,
        /// Minimum allowed value.
        min: usize,
        /// Maximum allowed value.
        max: usize,
    },

    /// Total bit array size is zero or cannot be represented.
    InvalidFilterSize {
        /// The rejected size in bits (saturated at `usize::MAX` on overflow).
        size: usize,
    },

    /// Unchecked insertion rejected: the filter already holds more than
    /// `capacity` insertions.
    FilterFull {
        /// Capacity the filter was built for.
        capacity: usize,
        /// Insertions performed so far.
        count: usize,
    },

    /// Reading or writing the persisted form failed.
    Io {
        /// Kind of the underlying I/O failure.
        kind: io::ErrorKind,
        /// Description of what failed.
        message: String,
    },
}

impl fmt::Display for SliceBloomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameters { message } => {
                write!(f, "Invalid sliced Bloom filter parameters: {}.", message)
            }
            Self::FalsePositiveRateOutOfBounds { fp_rate } => {
                write!(
                    f,
                    "False positive rate {} is out of bounds. Must be in range (0, 1).",
                    fp_rate
                )
            }
            Self::InvalidCapacity { capacity } => {
                write!(
                    f,
                    "Invalid capacity: {}. Capacity must be greater than 0.",
                    capacity
                )
            }
            Self::InvalidHashCount { count, min, max } => {
                write!(
                    f,
                    "Invalid slice count: {}. Must be in range [{}, {}].",
                    count, min, max
                )
            }
            Self::InvalidFilterSize { size } => {
                write!(
                    f,
                    "Invalid filter size: {} bits. Must be positive and within memory limits.",
                    size
                )
            }
            Self::FilterFull { capacity, count } => {
                write!(
                    f,
                    "Bloom filter is full: {} insertions recorded, capacity is {}.",
                    count, capacity
                )
            }
            Self::Io { kind, message } => {
                write!(f, "I/O error ({:?}): {}.", kind, message)
            }
        }
    }
}

impl std::error::Error for SliceBloomError {}

impl From<io::Error> for SliceBloomError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl SliceBloomError {
    /// Create an `InvalidParameters` error.
    #[must_use]
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    /// Create a `FalsePositiveRateOutOfBounds` error.
    #[must_use]
    pub fn fp_rate_out_of_bounds(fp_rate: f64) -> Self {
        Self::FalsePositiveRateOutOfBounds { fp_rate }
    }

    /// Create an `InvalidCapacity` error.
    #[must_use]
    pub fn invalid_capacity(capacity: usize) -> Self {
        Self::InvalidCapacity { capacity }
    }

    /// Create an `InvalidHashCount` error.
    #[must_use]
    pub fn invalid_hash_count(count: usize, min: usize, max: usize) -> Self {
        Self::InvalidHashCount { count, min, max }
    }

    /// Create an `InvalidFilterSize` error.
    #[must_use]
    pub fn invalid_filter_size(size: usize) -> Self {
        Self::InvalidFilterSize { size }
    }

    /// Create a `FilterFull` error.
    #[must_use]
    pub fn filter_full(capacity: usize, count: usize) -> Self {
        Self::FilterFull { capacity, count }
    }

    /// Whether this error means the filter could not be built from its parameters.
    #[must_use]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Self::InvalidParameters { .. }
                | Self::FalsePositiveRateOutOfBounds { .. }
                | Self::InvalidCapacity { .. }
                | Self::InvalidHashCount { .. }
                | Self::InvalidFilterSize { .. }
        )
    }

    /// Whether this error is an insertion rejected at capacity.
    #[must_use]
    pub fn is_full(&self) -> bool {
        matches!(self, Self::FilterFull { .. })
    }

    /// Whether this error came from the persisted-form reader or writer.
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}
