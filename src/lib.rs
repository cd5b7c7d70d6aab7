//! # Log Units
//!
//! Human-readable encoding primitives for logging and statistics output:
//!
//! * **Magnitudes**: elapsed time, byte counts and plain counts rendered as
//!   compact unit-scaled strings (`12.34ms`, `1.50KB`, `10.00K`)
//! * **Plain numbers**: canonical decimal rendering of `u64`
//! * **Escaping**: arbitrary bytes turned into single-line printable ASCII
//! * **Parsing**: leading decimal numbers consumed back out of log text,
//!   with overflow detection
//!
//! ## Key Features
//!
//! * Allocation-free fixed-buffer writers for hot logging paths, following
//!   the bounded formatting contract (write what fits, report what is needed)
//! * Growable `String` variants and zero-copy `Display` adapters
//! * Read-only unit scale tables built at compile time
//! * No global mutable state: every function is safe to call from any thread
//!
//! ## Quick Start
//!
//! ```
//! use log_units::{append_human_micros, bytes_to_human_string, consume_decimal_number,
//!                 escape_string, number_to_human_string, HumanBytes};
//!
//! // Fixed buffer, retry on truncation
//! let mut buf = [0u8; 4];
//! let res = append_human_micros(&mut buf, 1_234_567, false);
//! assert!(res.is_truncated());
//! let mut buf = vec![0u8; res.required];
//! append_human_micros(&mut buf, 1_234_567, false);
//! assert_eq!(buf, b"1234.56ms");
//!
//! assert_eq!(bytes_to_human_string(3 << 20), "3.00MB");
//! assert_eq!(number_to_human_string(25_000), "25.00K");
//! assert_eq!(escape_string(b"line\n"), "line\\x0a");
//! assert_eq!(format!("used {}", HumanBytes(2048)), "used 2.00KB");
//!
//! let mut line: &[u8] = b"42 records";
//! assert_eq!(consume_decimal_number(&mut line), Ok(42));
//! assert_eq!(line, b" records");
//! ```

pub mod bounded_writer;
pub mod decimal;
pub mod error;
pub mod escape;
pub mod magnitude;
pub mod number;
pub mod unit_scale;

pub use bounded_writer::{BoundedFormat, BoundedWrite, BoundedWriter};
pub use decimal::{consume_decimal_number, DecimalCursor, NumberFields};
pub use error::{ParseNumberError, Result};
pub use escape::{append_escaped_string_to, escape_string, is_printable, Escaped};
pub use magnitude::{
    append_human_bytes, append_human_micros, bytes_to_human_string, count_to_human_string,
    micros_to_human_string, number_to_human_string, HumanBytes, HumanCount, HumanMicros,
};
pub use number::{append_number, append_number_to, number_to_string};
pub use unit_scale::{Tier, UnitFamily, UnitScaleTable};
