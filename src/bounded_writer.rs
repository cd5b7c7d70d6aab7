//! Allocation-free output into caller-owned fixed buffers.
//!
//! Every fixed-buffer formatter in this crate follows the classic bounded
//! formatting contract: it copies as much of the rendering as fits and
//! reports how many bytes the full rendering needs, so callers can detect
//! truncation and retry with a larger buffer.

use std::fmt;

/// Outcome of a bounded write.
///
/// `required` never depends on the capacity of the buffer that was written
/// to, which is what makes the try / measure / retry pattern work.
///
/// # Examples
///
/// ```
/// # use log_units::append_human_bytes;
/// let mut small = [0u8; 4];
/// let res = append_human_bytes(&mut small, 1536);
/// assert!(res.is_truncated());
/// assert_eq!(&small[..res.written], b"1.50");
///
/// let mut big = vec![0u8; res.required];
/// let res = append_human_bytes(&mut big, 1536);
/// assert!(!res.is_truncated());
/// assert_eq!(&big[..], b"1.50KB");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedWrite {
    /// Bytes actually copied into the buffer.
    pub written: usize,
    /// Bytes the complete rendering needs.
    pub required: usize,
}

impl BoundedWrite {
    /// True when the buffer was too small for the complete rendering.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.required > self.written
    }
}

/// A `fmt::Write` sink over a borrowed byte buffer.
///
/// Writes past the end of the buffer are dropped but still counted. The
/// writer never reports an error, so `write!` into it always succeeds.
pub struct BoundedWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
    required: usize,
}

impl<'a> BoundedWriter<'a> {
    #[inline]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0, required: 0 }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The bytes written so far.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Appends raw bytes, copying only the prefix that still fits.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        let room = self.buf.len() - self.pos;
        let n = bytes.len().min(room);
        self.buf[self.pos..self.pos + n].copy_from_slice(&bytes[..n]);
        self.pos += n;
        self.required = self.required.saturating_add(bytes.len());
    }

    #[inline]
    pub fn finish(self) -> BoundedWrite {
        BoundedWrite {
            written: self.pos,
            required: self.required,
        }
    }
}

impl fmt::Write for BoundedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_bytes(s.as_bytes());
        Ok(())
    }
}

/// Counts the bytes a rendering needs without storing any of them.
struct LengthCounter(usize);

impl fmt::Write for LengthCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 = self.0.saturating_add(s.len());
        Ok(())
    }
}

/// Types that can render themselves into a fixed buffer.
///
/// This is implemented for every type that implements `Display`, which
/// covers the human-readable adapters in [`crate::magnitude`] and
/// [`crate::escape`].
///
/// # Examples
///
/// ```
/// # use log_units::{BoundedFormat, HumanCount};
/// let mut buf = [0u8; 16];
/// let res = HumanCount(12_345).format_into(&mut buf);
/// assert_eq!(&buf[..res.written], b"12.34K");
/// assert_eq!(HumanCount(12_345).required_len(), 6);
/// ```
pub trait BoundedFormat {
    /// Renders self into `buf`, returning the bounded write outcome.
    fn format_into(&self, buf: &mut [u8]) -> BoundedWrite;

    /// Number of bytes `format_into` needs to avoid truncation.
    fn required_len(&self) -> usize;
}

impl<T> BoundedFormat for T
where
    T: fmt::Display + ?Sized,
{
    fn format_into(&self, buf: &mut [u8]) -> BoundedWrite {
        let mut w = BoundedWriter::new(buf);
        // BoundedWriter is infallible; an Err here can only come from a
        // Display impl and leaves whatever was written so far.
        let _ = fmt::write(&mut w, format_args!("{}", self));
        w.finish()
    }

    fn required_len(&self) -> usize {
        let mut counter = LengthCounter(0);
        let _ = fmt::write(&mut counter, format_args!("{}", self));
        counter.0
    }
}
