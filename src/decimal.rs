//! Consuming decimal numbers from the front of a byte view.

use crate::error::{ParseNumberError, Result};

/// Parses the run of ASCII digits at the front of `input`.
///
/// Returns the value and the number of digits it spans. Does not look at
/// anything after the run.
fn parse_leading_digits(input: &[u8]) -> Result<(u64, usize)> {
    let mut value: u64 = 0;
    let mut digits = 0;
    for &b in input.iter().take_while(|b| b.is_ascii_digit()) {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .ok_or(ParseNumberError::Overflow)?;
        digits += 1;
    }
    if digits == 0 {
        return Err(ParseNumberError::NoDigits);
    }
    Ok((value, digits))
}

/// Consumes a decimal number from the front of `input`.
///
/// On success, `input` is advanced past the digits and the value is
/// returned. On failure, whether the input starts with a non-digit or the
/// digit run does not fit in a `u64`, `input` is left exactly as it was.
///
/// # Examples
///
/// ```
/// # use log_units::{consume_decimal_number, ParseNumberError};
/// let mut input: &[u8] = b"1234 rest";
/// assert_eq!(consume_decimal_number(&mut input), Ok(1234));
/// assert_eq!(input, b" rest");
///
/// let mut input: &[u8] = b"abc";
/// assert_eq!(consume_decimal_number(&mut input), Err(ParseNumberError::NoDigits));
/// assert_eq!(input, b"abc");
/// ```
pub fn consume_decimal_number(input: &mut &[u8]) -> Result<u64> {
    let view: &[u8] = *input;
    let (value, digits) = parse_leading_digits(view)?;
    *input = &view[digits..];
    Ok(value)
}

/// A borrowed view over bytes with a read position.
///
/// The cursor never copies the underlying data; it only moves its
/// position forward as numbers are consumed.
///
/// # Examples
///
/// ```
/// # use log_units::DecimalCursor;
/// let mut cursor = DecimalCursor::new(b"12:345");
/// assert_eq!(cursor.consume_decimal_number(), Ok(12));
/// cursor.skip(1);
/// assert_eq!(cursor.consume_decimal_number(), Ok(345));
/// assert!(cursor.is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DecimalCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> DecimalCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset of the cursor from the start of the view.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Moves past up to `n` bytes.
    pub fn skip(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.data.len());
    }

    /// Consumes a decimal number at the current position.
    ///
    /// Follows the same rules as [`consume_decimal_number`]: the position
    /// only moves on success.
    pub fn consume_decimal_number(&mut self) -> Result<u64> {
        let (value, digits) = parse_leading_digits(self.remaining())?;
        self.pos += digits;
        Ok(value)
    }

    /// Iterates over every digit run left in the view.
    ///
    /// Runs that overflow are reported as errors and skipped whole.
    ///
    /// # Examples
    ///
    /// ```
    /// # use log_units::DecimalCursor;
    /// let line = b"[db.cc:88] flushed 12 files, 4096 bytes";
    /// let fields: Vec<u64> = DecimalCursor::new(line)
    ///     .number_fields()
    ///     .filter_map(Result::ok)
    ///     .collect();
    /// assert_eq!(fields, vec![88, 12, 4096]);
    /// ```
    pub fn number_fields(self) -> NumberFields<'a> {
        NumberFields { cursor: self }
    }
}

/// Iterator returned by [`DecimalCursor::number_fields`].
#[derive(Debug, Clone)]
pub struct NumberFields<'a> {
    cursor: DecimalCursor<'a>,
}

impl Iterator for NumberFields<'_> {
    type Item = Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        let gap = self
            .cursor
            .remaining()
            .iter()
            .take_while(|b| !b.is_ascii_digit())
            .count();
        self.cursor.skip(gap);
        if self.cursor.is_empty() {
            return None;
        }
        match self.cursor.consume_decimal_number() {
            Ok(value) => Some(Ok(value)),
            Err(e) => {
                let run = self
                    .cursor
                    .remaining()
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .count();
                self.cursor.skip(run);
                Some(Err(e))
            }
        }
    }
}
