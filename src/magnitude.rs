//! Unit-scaled rendering of time, byte and count magnitudes.
//!
//! A magnitude is matched against its family's [`UnitScaleTable`]. Values in
//! the base tier print as exact integers; scaled values print with exactly
//! two fractional digits, truncated rather than rounded so a value never
//! spills into the next tier's range. There is no space between the number
//! and the suffix:
//!
//! | value              | rendering   |
//! |--------------------|-------------|
//! | 9_999 micros       | `9999us`    |
//! | 12_345 micros      | `12.34ms`   |
//! | 1_048_576 bytes    | `1.00MB`    |
//! | 10_000 (count)     | `10.00K`    |
//!
//! Suffix spelling and the two-digit convention are read back by log
//! scrapers, so they are part of the output contract.

use std::fmt::{self, Write};

use crate::bounded_writer::{BoundedWrite, BoundedWriter};
use crate::number::{write_number, MAX_U64_DIGITS};
use crate::unit_scale::{Tier, UnitScaleTable, BYTES, COUNT, TIME_MICROS};

/// Width of the numeric field in fixed-format time output.
pub const FIXED_NUMERIC_WIDTH: usize = 7;
/// Width of the suffix field in fixed-format time output.
pub const FIXED_SUFFIX_WIDTH: usize = 3;

// whole part + '.' + two fractional digits
const NUMERIC_CAP: usize = MAX_U64_DIGITS + 3;
// sign + numeric field + widest suffix
const ADAPTER_CAP: usize = 1 + NUMERIC_CAP + FIXED_SUFFIX_WIDTH;

/// A magnitude resolved against a table, with its numeric part rendered
/// on the stack.
struct Scaled {
    tier: &'static Tier,
    numeric: [u8; NUMERIC_CAP],
    len: usize,
}

impl Scaled {
    fn new(value: u64, table: &UnitScaleTable) -> Self {
        let tier = table.tier_for(value);
        let mut numeric = [0u8; NUMERIC_CAP];
        let mut w = BoundedWriter::new(&mut numeric);
        // Writes into the scratch buffer cannot fail and always fit.
        let _ = if tier.is_base() {
            write_number(&mut w, value)
        } else {
            // value * 100 / divisor stays below u64::MAX for every divisor >= 100
            let hundredths = (u128::from(value) * 100 / u128::from(tier.divisor)) as u64;
            write_number(&mut w, hundredths / 100).and_then(|_| {
                let frac = (hundredths % 100) as u8;
                w.write_char('.')?;
                w.write_char(char::from(b'0' + frac / 10))?;
                w.write_char(char::from(b'0' + frac % 10))
            })
        };
        let len = w.finish().written;
        Self { tier, numeric, len }
    }

    fn numeric(&self) -> &str {
        std::str::from_utf8(&self.numeric[..self.len]).unwrap_or("")
    }
}

fn write_magnitude<W: Write>(
    w: &mut W,
    value: u64,
    table: &UnitScaleTable,
    fixed_format: bool,
) -> fmt::Result {
    let scaled = Scaled::new(value, table);
    if fixed_format {
        write!(
            w,
            "{:>nw$}{:<sw$}",
            scaled.numeric(),
            scaled.tier.suffix,
            nw = FIXED_NUMERIC_WIDTH,
            sw = FIXED_SUFFIX_WIDTH
        )
    } else {
        w.write_str(scaled.numeric())?;
        w.write_str(scaled.tier.suffix)
    }
}

fn write_signed_count<W: Write>(w: &mut W, num: i64) -> fmt::Result {
    if num < 0 {
        w.write_char('-')?;
    }
    write_magnitude(w, num.unsigned_abs(), &COUNT, false)
}

fn bounded<F>(buf: &mut [u8], render: F) -> BoundedWrite
where
    F: FnOnce(&mut BoundedWriter<'_>) -> fmt::Result,
{
    let mut w = BoundedWriter::new(buf);
    let _ = render(&mut w);
    w.finish()
}

/// Renders on the stack, then lets the formatter apply width, fill and
/// alignment flags.
fn pad_rendered<F>(f: &mut fmt::Formatter<'_>, render: F) -> fmt::Result
where
    F: FnOnce(&mut BoundedWriter<'_>) -> fmt::Result,
{
    let mut scratch = [0u8; ADAPTER_CAP];
    let res = bounded(&mut scratch, render);
    f.pad(std::str::from_utf8(&scratch[..res.written]).map_err(|_| fmt::Error)?)
}

fn growable<F>(render: F) -> String
where
    F: FnOnce(&mut String) -> fmt::Result,
{
    let mut s = String::with_capacity(16);
    let _ = render(&mut s);
    s
}

/// Writes a human-readable elapsed time into `buf`.
///
/// With `fixed_format` the number is right-aligned in a
/// [`FIXED_NUMERIC_WIDTH`] column and the suffix is left-aligned in a
/// [`FIXED_SUFFIX_WIDTH`] column, so successive log lines stay aligned.
///
/// Never writes past `buf.len()`. The returned `required` is the length of
/// the full rendering regardless of capacity.
///
/// # Examples
///
/// ```
/// # use log_units::append_human_micros;
/// let mut buf = [0u8; 32];
/// let res = append_human_micros(&mut buf, 12_345, false);
/// assert_eq!(&buf[..res.written], b"12.34ms");
///
/// let res = append_human_micros(&mut buf, 5, true);
/// assert_eq!(&buf[..res.written], b"      5us ");
/// ```
pub fn append_human_micros(buf: &mut [u8], micros: u64, fixed_format: bool) -> BoundedWrite {
    bounded(buf, |w| write_magnitude(w, micros, &TIME_MICROS, fixed_format))
}

/// Writes a human-readable byte count into `buf`, using 1024-based units.
///
/// Never writes past `buf.len()`.
pub fn append_human_bytes(buf: &mut [u8], bytes: u64) -> BoundedWrite {
    bounded(buf, |w| write_magnitude(w, bytes, &BYTES, false))
}

/// Growable counterpart of [`append_human_micros`].
pub fn micros_to_human_string(micros: u64, fixed_format: bool) -> String {
    growable(|s| write_magnitude(s, micros, &TIME_MICROS, fixed_format))
}

/// Returns a human-readable byte count.
///
/// # Examples
///
/// ```
/// # use log_units::bytes_to_human_string;
/// assert_eq!(bytes_to_human_string(512), "512B");
/// assert_eq!(bytes_to_human_string(1024), "1.00KB");
/// assert_eq!(bytes_to_human_string(1_048_576), "1.00MB");
/// ```
pub fn bytes_to_human_string(bytes: u64) -> String {
    growable(|s| write_magnitude(s, bytes, &BYTES, false))
}

/// Returns a human-readable version of a signed count.
///
/// Values below 10,000 print exactly; from 10,000 on the value is scaled
/// to `K`, from 10,000,000 to `M` and from 10,000,000,000 to `G`. The sign is
/// kept and the absolute value is scaled.
///
/// # Examples
///
/// ```
/// # use log_units::number_to_human_string;
/// assert_eq!(number_to_human_string(9_999), "9999");
/// assert_eq!(number_to_human_string(10_000), "10.00K");
/// assert_eq!(number_to_human_string(-25_000_000), "-25.00M");
/// ```
pub fn number_to_human_string(num: i64) -> String {
    growable(|s| write_signed_count(s, num))
}

/// Unsigned counterpart of [`number_to_human_string`].
pub fn count_to_human_string(num: u64) -> String {
    growable(|s| write_magnitude(s, num, &COUNT, false))
}

/// `Display` adapter for elapsed microseconds.
///
/// Like the other adapters it honours width and alignment flags, so
/// `format!("{:>12}", HumanMicros::new(5))` is right-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanMicros {
    pub micros: u64,
    pub fixed_format: bool,
}

impl HumanMicros {
    pub fn new(micros: u64) -> Self {
        Self { micros, fixed_format: false }
    }

    /// Column-aligned variant, see [`append_human_micros`].
    pub fn fixed(micros: u64) -> Self {
        Self { micros, fixed_format: true }
    }
}

impl fmt::Display for HumanMicros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        pad_rendered(f, |w| write_magnitude(w, self.micros, &TIME_MICROS, self.fixed_format))
    }
}

/// `Display` adapter for byte counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanBytes(pub u64);

impl fmt::Display for HumanBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        pad_rendered(f, |w| write_magnitude(w, self.0, &BYTES, false))
    }
}

/// `Display` adapter for signed counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanCount(pub i64);

impl fmt::Display for HumanCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        pad_rendered(f, |w| write_signed_count(w, self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_tiers() {
        assert_eq!(micros_to_human_string(0, false), "0us");
        assert_eq!(micros_to_human_string(9_999, false), "9999us");
        assert_eq!(micros_to_human_string(10_000, false), "10.00ms");
        assert_eq!(micros_to_human_string(12_345, false), "12.34ms");
        assert_eq!(micros_to_human_string(9_999_999, false), "9999.99ms");
        assert_eq!(micros_to_human_string(10_000_000, false), "10.00s");
        assert_eq!(micros_to_human_string(599_999_999, false), "599.99s");
        assert_eq!(micros_to_human_string(600_000_000, false), "10.00min");
        assert_eq!(micros_to_human_string(36_000_000_000, false), "10.00h");
    }

    #[test]
    fn test_time_fixed_format() {
        assert_eq!(micros_to_human_string(5, true), "      5us ");
        assert_eq!(micros_to_human_string(12_345, true), "  12.34ms ");
        assert_eq!(micros_to_human_string(10_000_000, true), "  10.00s  ");
        assert_eq!(micros_to_human_string(600_000_000, true), "  10.00min");
        for micros in [1, 9_999, 10_000, 9_999_999, 123_456_789, 3_599_999_999_999] {
            assert_eq!(
                micros_to_human_string(micros, true).len(),
                FIXED_NUMERIC_WIDTH + FIXED_SUFFIX_WIDTH,
                "micros={}",
                micros
            );
        }
    }

    #[test]
    fn test_truncation_not_rounding() {
        assert_eq!(bytes_to_human_string(1_048_575), "1023.99KB");
        assert_eq!(count_to_human_string(9_999_999), "9999.99K");
    }

    #[test]
    fn test_extremes() {
        assert_eq!(bytes_to_human_string(u64::MAX), "15.99EB");
        assert_eq!(count_to_human_string(u64::MAX), "18446744073.70G");
        assert_eq!(number_to_human_string(i64::MIN), "-9223372036.85G");
        assert_eq!(number_to_human_string(i64::MAX), "9223372036.85G");
    }

    #[test]
    fn test_signed_counts() {
        assert_eq!(number_to_human_string(0), "0");
        assert_eq!(number_to_human_string(-5), "-5");
        assert_eq!(number_to_human_string(-9_999), "-9999");
        assert_eq!(number_to_human_string(-10_000), "-10.00K");
    }

    #[test]
    fn test_display_adapters() {
        assert_eq!(HumanBytes(1536).to_string(), "1.50KB");
        assert_eq!(HumanCount(12_345).to_string(), "12.34K");
        assert_eq!(HumanMicros::new(250).to_string(), "250us");
        assert_eq!(HumanMicros::fixed(250).to_string(), "    250us ");
        assert_eq!(format!("[{}]", HumanBytes(0)), "[0B]");
    }

    #[test]
    fn test_display_adapters_honour_padding() {
        assert_eq!(format!("{:>10}", HumanBytes(5)), "        5B");
        assert_eq!(format!("{:<8}|", HumanCount(-12_345)), "-12.34K |");
        assert_eq!(format!("{:^9}", HumanMicros::new(42)), "  42us   ");
        assert_eq!(format!("{:*>9}", HumanBytes(1 << 20)), "***1.00MB");
        // Widest possible rendering still fits the stack scratch
        assert_eq!(HumanCount(i64::MIN).to_string(), "-9223372036.85G");
        assert_eq!(HumanMicros::fixed(u64::MAX).to_string(), "5124095576.03h  ");
    }

    #[test]
    fn test_required_length_of_scaled_values() {
        // Zero capacity still reports the full length
        assert_eq!(append_human_micros(&mut [0u8; 0], 12_345, false).required, 7);
        assert_eq!(append_human_micros(&mut [0u8; 0], 12_345, true).required, 10);
        assert_eq!(append_human_bytes(&mut [0u8; 0], 1536).required, 6);
        assert_eq!(append_human_bytes(&mut [0u8; 0], 1 << 20).required, 6);
    }

    #[test]
    fn test_bounded_matches_growable() {
        let mut buf = [0u8; 64];
        for bytes in [0, 1, 1023, 1024, 5_000_000, u64::MAX] {
            let res = append_human_bytes(&mut buf, bytes);
            assert!(!res.is_truncated());
            assert_eq!(&buf[..res.written], bytes_to_human_string(bytes).as_bytes());
        }
    }
}
