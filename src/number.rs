//! Plain decimal rendering of unsigned integers.

use std::fmt::Write;

use crate::bounded_writer::{BoundedWrite, BoundedWriter};

/// Longest decimal rendering of a `u64` ("18446744073709551615").
pub const MAX_U64_DIGITS: usize = 20;

/// Writes the digits of `num` into the tail of `scratch`, returning the
/// index of the first digit.
#[inline]
fn render_digits(num: u64, scratch: &mut [u8; MAX_U64_DIGITS]) -> usize {
    let mut pos = MAX_U64_DIGITS;
    let mut n = num;
    loop {
        pos -= 1;
        scratch[pos] = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            return pos;
        }
    }
}

/// Appends the decimal digits of `num` to `out`.
///
/// # Examples
///
/// ```
/// # use log_units::append_number_to;
/// let mut s = String::from("count=");
/// append_number_to(&mut s, 42);
/// assert_eq!(s, "count=42");
/// ```
pub fn append_number_to(out: &mut String, num: u64) {
    let mut scratch = [0u8; MAX_U64_DIGITS];
    let start = render_digits(num, &mut scratch);
    for &d in &scratch[start..] {
        out.push(d as char);
    }
}

/// Returns the decimal digits of `num` as a new string.
pub fn number_to_string(num: u64) -> String {
    let mut s = String::with_capacity(MAX_U64_DIGITS);
    append_number_to(&mut s, num);
    s
}

/// Writes the decimal digits of `num` into a fixed buffer.
pub fn append_number(buf: &mut [u8], num: u64) -> BoundedWrite {
    let mut scratch = [0u8; MAX_U64_DIGITS];
    let start = render_digits(num, &mut scratch);
    let mut w = BoundedWriter::new(buf);
    w.push_bytes(&scratch[start..]);
    w.finish()
}

/// Writes `num` through any `fmt::Write` sink without allocating.
pub(crate) fn write_number<W: Write>(w: &mut W, num: u64) -> std::fmt::Result {
    let mut scratch = [0u8; MAX_U64_DIGITS];
    let start = render_digits(num, &mut scratch);
    // Digits are ASCII, so this never fails.
    match std::str::from_utf8(&scratch[start..]) {
        Ok(s) => w.write_str(s),
        Err(_) => Err(std::fmt::Error),
    }
}
