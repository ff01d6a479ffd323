use std::io;
use std::io::Write;

/// A thin wrapper around a writer that provides methods for writing big-endian payload fields.
pub struct PayloadWriter<W> {
    inner: W,
}

impl<W: Write> PayloadWriter<W> {
    /// Wraps the given writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Consumes the `PayloadWriter` and returns the underlying writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Writes a 64-bit unsigned integer in big-endian byte order.
    pub fn write_u64_be(&mut self, n: u64) -> io::Result<()> {
        self.inner.write_all(&n.to_be_bytes())
    }

    /// Writes a 64-bit float as its IEEE-754 bits in big-endian byte order.
    pub fn write_f64_be(&mut self, n: f64) -> io::Result<()> {
        self.write_u64_be(n.to_bits())
    }

    /// Writes a `usize` widened to 64 bits.
    pub fn write_usize(&mut self, n: usize) -> io::Result<()> {
        self.write_u64_be(n as u64)
    }

    /// Writes every word in order.
    pub fn write_words(&mut self, words: &[u64]) -> io::Result<()> {
        for &word in words {
            self.write_u64_be(word)?;
        }
        Ok(())
    }
}
