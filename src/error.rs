//! Error types for log_units.

use thiserror::Error;

/// Why a decimal number could not be consumed from the input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseNumberError {
    #[error("no decimal digits at the start of the input")]
    NoDigits,

    #[error("decimal number does not fit in 64 bits")]
    Overflow,
}

pub type Result<T> = std::result::Result<T, ParseNumberError>;
