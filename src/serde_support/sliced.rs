//! Serde support for [`SlicedBloomFilter`].
//!
//! The filter goes through an intermediate record holding the capacity, the
//! false positive target, the raw bit words with their length, and the
//! insertion count. Slice geometry and the bucket generator are not part of
//! the record: deserialization derives the geometry again with
//! [`OptimalSlicing`] and uses `B::default()` as the generator.
//!
//! The same checks as the binary codec apply: the bit length must match the
//! derived geometry, padding bits must be clear and the count may not exceed
//! `capacity + 1`.
//!
//! # Examples
//!
//! ```
//! use slicebloom::SlicedBloomFilter;
//!
//! let mut filter = SlicedBloomFilter::new(100, 0.01).unwrap();
//! filter.add("a").unwrap();
//!
//! let json = serde_json::to_string(&filter).unwrap();
//! let restored: SlicedBloomFilter = serde_json::from_str(&json).unwrap();
//! assert!(restored.contains("a"));
//! ```

use crate::core::config::FilterConfig;
use crate::core::params::OptimalSlicing;
use crate::filters::sliced::SlicedBloomFilter;
use crate::hash::BucketGenerator;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;

/// Serializable representation of a sliced Bloom filter.
#[derive(Serialize, Deserialize)]
struct SlicedBloomFilterSerde<'a> {
    capacity: usize,
    false_positive_rate: f64,
    bit_len: usize,
    bits: Cow<'a, [u64]>,
    count: usize,
}

impl<'a> SlicedBloomFilterSerde<'a> {
    fn from_filter<B>(filter: &'a SlicedBloomFilter<B>) -> Self {
        Self {
            capacity: filter.capacity(),
            false_positive_rate: filter.false_positive_rate(),
            bit_len: filter.bits().len(),
            bits: Cow::Borrowed(filter.bits().as_words()),
            count: filter.size(),
        }
    }
}

impl<B> Serialize for SlicedBloomFilter<B> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        SlicedBloomFilterSerde::from_filter(self).serialize(serializer)
    }
}

impl<'de, B: BucketGenerator + Default> Deserialize<'de> for SlicedBloomFilter<B> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = SlicedBloomFilterSerde::deserialize(deserializer)?;

        let config =
            FilterConfig::new(repr.capacity, repr.false_positive_rate).map_err(de::Error::custom)?;

        SlicedBloomFilter::from_persisted(
            config,
            &OptimalSlicing,
            B::default(),
            repr.bits.into_owned(),
            repr.bit_len,
            repr.count,
        )
        .map_err(de::Error::custom)
    }
}
