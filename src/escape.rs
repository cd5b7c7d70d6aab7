//! Escaping arbitrary bytes into single-line printable ASCII.
//!
//! Bytes from `' '` to `'~'` are copied through. Every other byte becomes
//! `\xNN` with two lowercase hex digits. The backslash itself is printable
//! and is not doubled, so the output is meant for human readers and log
//! scrapers rather than for reversing.

use std::fmt::{self, Write};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Whether `b` is copied verbatim by the escaper.
#[inline]
pub fn is_printable(b: u8) -> bool {
    (b' '..=b'~').contains(&b)
}

fn write_escaped<W: Write>(w: &mut W, value: &[u8]) -> fmt::Result {
    let mut rest = value;
    while !rest.is_empty() {
        // Copy the longest printable run in one go.
        let run = rest.iter().take_while(|&&b| is_printable(b)).count();
        if run > 0 {
            // Printable bytes are ASCII.
            w.write_str(std::str::from_utf8(&rest[..run]).map_err(|_| fmt::Error)?)?;
            rest = &rest[run..];
            continue;
        }
        let b = rest[0];
        w.write_str("\\x")?;
        w.write_char(char::from(HEX_DIGITS[usize::from(b >> 4)]))?;
        w.write_char(char::from(HEX_DIGITS[usize::from(b & 0x0f)]))?;
        rest = &rest[1..];
    }
    Ok(())
}

/// Length of the escaped rendering of `value`.
fn escaped_len(value: &[u8]) -> usize {
    value
        .iter()
        .map(|&b| if is_printable(b) { 1 } else { 4 })
        .sum()
}

/// Appends an escaped rendering of `value` to `out`.
///
/// # Examples
///
/// ```
/// # use log_units::append_escaped_string_to;
/// let mut s = String::from("key=");
/// append_escaped_string_to(&mut s, b"a\nb\xff");
/// assert_eq!(s, "key=a\\x0ab\\xff");
/// ```
pub fn append_escaped_string_to(out: &mut String, value: &[u8]) {
    out.reserve(value.len());
    // Writing into a String cannot fail.
    let _ = write_escaped(out, value);
}

/// Returns an escaped rendering of `value`.
pub fn escape_string(value: &[u8]) -> String {
    let mut s = String::with_capacity(value.len());
    append_escaped_string_to(&mut s, value);
    s
}

/// `Display` adapter that escapes bytes as they are formatted.
///
/// Width, fill and alignment flags apply to the escaped text; the input is
/// never copied.
#[derive(Debug, Clone, Copy)]
pub struct Escaped<'a>(pub &'a [u8]);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = match f.width() {
            Some(width) => width,
            None => return write_escaped(f, self.0),
        };
        let pad = width.saturating_sub(escaped_len(self.0));
        let (before, after) = match f.align() {
            Some(fmt::Alignment::Right) => (pad, 0),
            Some(fmt::Alignment::Center) => (pad / 2, pad - pad / 2),
            _ => (0, pad),
        };
        let fill = f.fill();
        for _ in 0..before {
            f.write_char(fill)?;
        }
        write_escaped(f, self.0)?;
        for _ in 0..after {
            f.write_char(fill)?;
        }
        Ok(())
    }
}
