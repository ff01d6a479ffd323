//! Persisted form of a [`SlicedBloomFilter`].
//!
//! # Format
//!
//! A gzip stream whose decompressed payload is, in big-endian order:
//!
//! ```text
//! capacity              u64
//! false positive rate   f64 (IEEE-754 bits)
//! bit length            u64
//! bit words             u64 × ⌈bit length / 64⌉
//! count                 u64
//! ```
//!
//! There is no magic number or version. Slice geometry is not stored: the
//! decoder derives it again from the capacity and rate, and rejects payloads
//! whose bit length disagrees with it. Padding bits past the bit length must
//! be zero, the count may exceed the capacity by at most one (a full
//! filter), and nothing may follow the count.
//!
//! Every decoding failure is reported as
//! [`SliceBloomError::Io`]; malformed content uses
//! [`io::ErrorKind::InvalidData`], a short stream uses
//! [`io::ErrorKind::UnexpectedEof`].
//!
//! # Examples
//!
//! ```
//! use slicebloom::SlicedBloomFilter;
//!
//! let mut filter = SlicedBloomFilter::new(1_000, 0.01)?;
//! filter.add("persisted")?;
//!
//! let bytes = filter.to_bytes()?;
//! let restored = SlicedBloomFilter::from_bytes(&bytes)?;
//! assert!(restored.contains("persisted"));
//! assert_eq!(restored.size(), 1);
//! # Ok::<(), slicebloom::SliceBloomError>(())
//! ```

mod decode;
mod encode;

use crate::core::config::FilterConfig;
use crate::core::params::{OptimalSlicing, ParameterDeriver};
use crate::error::{Result, SliceBloomError};
use crate::filters::sliced::{derive_geometry, SlicedBloomFilter};
use crate::hash::{BucketGenerator, DefaultBuckets};
use decode::PayloadReader;
use encode::PayloadWriter;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Malformed persisted content.
///
/// Surfaces to callers as an [`io::Error`] of kind `InvalidData`, and from
/// there as [`SliceBloomError::Io`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum CodecError {
    /// Capacity or false positive rate in the header is unusable
    #[error("invalid header: {0}")]
    InvalidHeader(SliceBloomError),

    /// Stored bit length disagrees with the geometry derived from the header
    #[error("stored bit length {stored} does not match derived length {derived}")]
    LengthMismatch {
        /// Bit length found in the payload
        stored: usize,
        /// `slices_count × bits_per_slice` derived from the header
        derived: usize,
    },

    /// Bits or count are inconsistent with the header
    #[error("invalid filter state: {0}")]
    InvalidState(SliceBloomError),

    /// A 64-bit field doesn't fit the platform's `usize`
    #[error("{field} value {value} is out of range")]
    OutOfRange {
        /// Field name
        field: &'static str,
        /// Stored value
        value: u64,
    },

    /// Data follows the count field
    #[error("unexpected bytes after payload")]
    TrailingBytes,
}

impl From<CodecError> for io::Error {
    fn from(err: CodecError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

impl From<CodecError> for SliceBloomError {
    fn from(err: CodecError) -> Self {
        SliceBloomError::from(io::Error::from(err))
    }
}

impl<B> SlicedBloomFilter<B> {
    /// Write the persisted form to `writer`.
    ///
    /// The gzip stream is finished and the writer flushed before returning.
    ///
    /// # Errors
    ///
    /// Returns `Io` if writing fails.
    pub fn encode<W: Write>(&self, writer: W) -> Result<()> {
        let mut gz = GzEncoder::new(writer, Compression::default());
        {
            let mut payload = PayloadWriter::new(&mut gz);
            payload.write_usize(self.capacity())?;
            payload.write_f64_be(self.false_positive_rate())?;
            payload.write_usize(self.bits().len())?;
            payload.write_words(self.bits().as_words())?;
            payload.write_usize(self.size())?;
        }
        let mut inner = gz.finish()?;
        inner.flush()?;

        tracing::debug!(
            capacity = self.capacity(),
            bit_len = self.bits().len(),
            count = self.size(),
            "encoded sliced bloom filter"
        );
        Ok(())
    }

    /// Persisted form as a byte vector.
    ///
    /// # Errors
    ///
    /// Returns `Io` if compression fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.encode(&mut bytes)?;
        Ok(bytes)
    }

    /// Write the persisted form to a file, creating or truncating it.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file can't be created or written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.encode(BufWriter::new(file))
    }
}

impl SlicedBloomFilter<DefaultBuckets> {
    /// Read a filter written by [`encode`](Self::encode) using the default
    /// deriver and bucket generator.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the stream is truncated, not gzip, or malformed.
    pub fn decode<R: Read>(reader: R) -> Result<Self> {
        Self::decode_with(reader, &OptimalSlicing, DefaultBuckets::default())
    }

    /// Read a filter from bytes produced by [`to_bytes`](Self::to_bytes).
    ///
    /// # Errors
    ///
    /// Same as [`decode`](Self::decode).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode(bytes)
    }

    /// Read a filter from a file written by [`save`](Self::save).
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file can't be opened, or as [`decode`](Self::decode).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::decode(BufReader::new(file))
    }
}

impl<B: BucketGenerator> SlicedBloomFilter<B> {
    /// Read a filter with explicit collaborators.
    ///
    /// `deriver` and `buckets` must behave like the ones the filter was
    /// built with, otherwise decoding fails or membership answers are wrong.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the stream is truncated, not gzip, or malformed.
    pub fn decode_with<R, D>(reader: R, deriver: &D, buckets: B) -> Result<Self>
    where
        R: Read,
        D: ParameterDeriver + ?Sized,
    {
        let mut payload = PayloadReader::new(MultiGzDecoder::new(reader));

        let capacity = payload.read_usize("capacity")?;
        let fp_rate = payload.read_f64_be()?;
        let config = FilterConfig::new(capacity, fp_rate).map_err(CodecError::InvalidHeader)?;
        let (_, _, derived) =
            derive_geometry(&config, deriver).map_err(CodecError::InvalidHeader)?;

        let bit_len = payload.read_usize("bit length")?;
        if bit_len != derived {
            return Err(CodecError::LengthMismatch {
                stored: bit_len,
                derived,
            }
            .into());
        }

        let words = payload.read_words(words_for(bit_len))?;
        let count = payload.read_usize("count")?;
        payload.expect_end()?;

        let filter = Self::from_persisted(config, deriver, buckets, words, bit_len, count)
            .map_err(CodecError::InvalidState)?;

        tracing::debug!(capacity, bit_len, count, "decoded sliced bloom filter");
        Ok(filter)
    }
}

fn words_for(bits: usize) -> usize {
    bits / 64 + usize::from(bits % 64 != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gzip(payload: &[u8]) -> Vec<u8> {
        let mut gz = GzEncoder::new(Vec::new(), Compression::default());
        gz.write_all(payload).unwrap();
        gz.finish().unwrap()
    }

    fn raw_payload(capacity: u64, fp: f64, bit_len: u64, words: &[u64], count: u64) -> Vec<u8> {
        let mut writer = PayloadWriter::new(Vec::new());
        writer.write_u64_be(capacity).unwrap();
        writer.write_f64_be(fp).unwrap();
        writer.write_u64_be(bit_len).unwrap();
        writer.write_words(words).unwrap();
        writer.write_u64_be(count).unwrap();
        writer.into_inner()
    }

    fn assert_invalid_data(result: Result<SlicedBloomFilter>) {
        match result {
            Err(SliceBloomError::Io { kind, .. }) => assert_eq!(kind, io::ErrorKind::InvalidData),
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }

    #[test]
    fn test_payload_layout() {
        let mut filter = SlicedBloomFilter::new(100, 0.01).unwrap();
        filter.add("a").unwrap();

        let bytes = filter.to_bytes().unwrap();
        let mut decoder = MultiGzDecoder::new(bytes.as_slice());
        let mut payload = Vec::new();
        decoder.read_to_end(&mut payload).unwrap();

        let expected = raw_payload(100, 0.01, 959, filter.bits().as_words(), 1);
        assert_eq!(payload, expected);
        // 8 + 8 + 8 + 15 words + 8
        assert_eq!(payload.len(), 32 + 15 * 8);
    }

    #[test]
    fn test_roundtrip_preserves_state() {
        let mut filter = SlicedBloomFilter::new(100, 0.01).unwrap();
        for word in ["x", "y", "z"] {
            filter.add(word).unwrap();
        }
        let restored = SlicedBloomFilter::from_bytes(&filter.to_bytes().unwrap()).unwrap();
        assert_eq!(restored, filter);
    }

    #[test]
    fn test_hand_built_payload_decodes() {
        let words = vec![0u64; 15];
        let bytes = gzip(&raw_payload(100, 0.01, 959, &words, 0));
        let filter = SlicedBloomFilter::from_bytes(&bytes).unwrap();
        assert_eq!(filter.slices_count(), 7);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let words = vec![0u64; 15];
        assert_invalid_data(SlicedBloomFilter::from_bytes(&gzip(&raw_payload(
            100, 0.01, 958, &words, 0,
        ))));
    }

    #[test]
    fn test_rejects_invalid_header() {
        let words = vec![0u64; 15];
        assert_invalid_data(SlicedBloomFilter::from_bytes(&gzip(&raw_payload(
            0, 0.01, 959, &words, 0,
        ))));
        assert_invalid_data(SlicedBloomFilter::from_bytes(&gzip(&raw_payload(
            100, 1.5, 959, &words, 0,
        ))));
        assert_invalid_data(SlicedBloomFilter::from_bytes(&gzip(&raw_payload(
            100,
            f64::NAN,
            959,
            &words,
            0,
        ))));
    }

    #[test]
    fn test_rejects_padding_bits() {
        let mut words = vec![0u64; 15];
        // 959 = 14 * 64 + 63; bit 63 of the last word is padding
        words[14] = 1 << 63;
        assert_invalid_data(SlicedBloomFilter::from_bytes(&gzip(&raw_payload(
            100, 0.01, 959, &words, 0,
        ))));
    }

    #[test]
    fn test_rejects_count_over_capacity() {
        let words = vec![0u64; 15];
        // capacity + 1 is a legitimately full filter
        let full = SlicedBloomFilter::from_bytes(&gzip(&raw_payload(
            100, 0.01, 959, &words, 101,
        )))
        .unwrap();
        assert!(full.is_full());

        assert_invalid_data(SlicedBloomFilter::from_bytes(&gzip(&raw_payload(
            100, 0.01, 959, &words, 102,
        ))));
    }

    #[test]
    fn test_rejects_trailing_payload() {
        let words = vec![0u64; 15];
        let mut payload = raw_payload(100, 0.01, 959, &words, 0);
        payload.push(0);
        assert_invalid_data(SlicedBloomFilter::from_bytes(&gzip(&payload)));
    }

    #[test]
    fn test_truncated_payload_is_eof() {
        let words = vec![0u64; 15];
        let mut payload = raw_payload(100, 0.01, 959, &words, 0);
        payload.truncate(payload.len() - 3);
        let err = SlicedBloomFilter::from_bytes(&gzip(&payload)).unwrap_err();
        assert!(matches!(
            err,
            SliceBloomError::Io {
                kind: io::ErrorKind::UnexpectedEof,
                ..
            }
        ));
    }

    #[test]
    fn test_not_gzip() {
        let err = SlicedBloomFilter::from_bytes(b"definitely not gzip").unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_full_filter_roundtrip() {
        let mut filter = SlicedBloomFilter::new(2, 0.1).unwrap();
        filter.add_without_check("a").unwrap();
        filter.add_without_check("b").unwrap();
        let at_capacity = SlicedBloomFilter::from_bytes(&filter.to_bytes().unwrap()).unwrap();
        assert!(!at_capacity.is_full());

        filter.add_without_check("c").unwrap();
        let restored = SlicedBloomFilter::from_bytes(&filter.to_bytes().unwrap()).unwrap();
        assert!(restored.is_full());
        assert_eq!(restored.size(), 3);
    }

    #[test]
    fn test_codec_error_maps_to_invalid_data() {
        let err: SliceBloomError = CodecError::TrailingBytes.into();
        assert!(matches!(
            err,
            SliceBloomError::Io {
                kind: io::ErrorKind::InvalidData,
                ..
            }
        ));
    }
}
