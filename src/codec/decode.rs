use super::CodecError;
use std::io;
use std::io::Read;

/// A thin wrapper around a reader that provides methods for reading big-endian payload fields.
pub struct PayloadReader<R> {
    inner: R,
}

impl<R: Read> PayloadReader<R> {
    /// Wraps the given reader.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Reads a 64-bit unsigned integer in big-endian byte order.
    pub fn read_u64_be(&mut self) -> io::Result<u64> {
        let mut buf = [0u8; 8];
        self.inner.read_exact(&mut buf)?;
        Ok(u64::from_be_bytes(buf))
    }

    /// Reads a 64-bit float stored as big-endian IEEE-754 bits.
    pub fn read_f64_be(&mut self) -> io::Result<f64> {
        self.read_u64_be().map(f64::from_bits)
    }

    /// Reads a 64-bit value that must fit in `usize`.
    pub fn read_usize(&mut self, field: &'static str) -> io::Result<usize> {
        let value = self.read_u64_be()?;
        usize::try_from(value).map_err(|_| CodecError::OutOfRange { field, value }.into())
    }

    /// Reads `count` words.
    ///
    /// The vector grows as words arrive, so a corrupted `count` fails with
    /// end-of-file instead of a huge up-front allocation.
    pub fn read_words(&mut self, count: usize) -> io::Result<Vec<u64>> {
        let mut words = Vec::with_capacity(count.min(1 << 16));
        for _ in 0..count {
            words.push(self.read_u64_be()?);
        }
        Ok(words)
    }

    /// Succeeds only if the underlying stream is exhausted.
    pub fn expect_end(&mut self) -> io::Result<()> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(()),
                Ok(_) => return Err(CodecError::TrailingBytes.into()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_fields() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&7u64.to_be_bytes());
        bytes.extend_from_slice(&0.25f64.to_bits().to_be_bytes());
        let mut reader = PayloadReader::new(bytes.as_slice());

        assert_eq!(reader.read_usize("capacity").unwrap(), 7);
        assert_eq!(reader.read_f64_be().unwrap(), 0.25);
        reader.expect_end().unwrap();
    }

    #[test]
    fn test_truncated_read_is_unexpected_eof() {
        let mut reader = PayloadReader::new(&[0u8, 1, 2][..]);
        let err = reader.read_u64_be().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_trailing_bytes_detected() {
        let mut reader = PayloadReader::new(&[0u8; 9][..]);
        reader.read_u64_be().unwrap();
        let err = reader.expect_end().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_huge_word_count_fails_cleanly() {
        let mut reader = PayloadReader::new(&[0u8; 16][..]);
        let err = reader.read_words(usize::MAX).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
