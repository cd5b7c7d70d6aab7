use log_units::{
    append_human_bytes, append_human_micros, append_number, BoundedFormat, BoundedWrite,
    Escaped, HumanBytes, HumanCount, HumanMicros,
};

const GUARD: u8 = 0xA5;

struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }
}

/// Runs `render` against every capacity up to `max_cap` inside a guarded
/// buffer and checks nothing past the capacity is touched. Returns the full
/// rendering.
fn check_capacities<F>(max_cap: usize, render: F) -> String
where
    F: Fn(&mut [u8]) -> BoundedWrite,
{
    let mut full = vec![0u8; 64];
    let reference = render(&mut full[..]);
    assert!(!reference.is_truncated());
    let expected = full[..reference.written].to_vec();

    for cap in 0..=max_cap {
        let mut buf = vec![GUARD; cap + 8];
        let res = render(&mut buf[..cap]);
        assert_eq!(res.required, reference.required, "cap={}", cap);
        assert_eq!(res.written, cap.min(res.required), "cap={}", cap);
        assert_eq!(res.is_truncated(), cap < res.required);
        assert_eq!(&buf[..res.written], &expected[..res.written]);
        assert!(buf[cap..].iter().all(|&b| b == GUARD), "overrun at cap={}", cap);
    }
    assert_eq!(reference.required, expected.len());
    String::from_utf8(expected).expect("renderings are ASCII")
}

#[test]
fn test_fuzz_micros_capacities() {
    let mut rng = XorShift(0xDEAD_BEEF_CAFE_F00D);
    for i in 0..200 {
        let micros = rng.next() >> (i % 64);
        let fixed = i % 3 == 0;
        check_capacities(24, |buf| append_human_micros(buf, micros, fixed));
    }
}

#[test]
fn test_fuzz_bytes_capacities() {
    let mut rng = XorShift(0x0123_4567_89AB_CDEF);
    for i in 0..200 {
        let bytes = rng.next() >> (i % 64);
        check_capacities(24, |buf| append_human_bytes(buf, bytes));
    }
}

#[test]
fn test_fuzz_number_capacities() {
    let mut rng = XorShift(7);
    for i in 0..200 {
        let n = rng.next() >> (i % 64);
        check_capacities(24, |buf| append_number(buf, n));
    }
}

#[test]
fn test_zero_capacity_writes_nothing() {
    let mut empty: [u8; 0] = [];
    let res = append_human_micros(&mut empty, 123_456, true);
    assert_eq!(res.written, 0);
    assert!(res.required > 0);
    assert!(res.is_truncated());
}

#[test]
fn test_display_adapters_through_bounded_format() {
    assert_eq!(check_capacities(16, |buf| HumanBytes(3 << 20).format_into(buf)), "3.00MB");
    assert_eq!(
        check_capacities(16, |buf| HumanCount(-123_456).format_into(buf)),
        "-123.45K"
    );
    assert_eq!(
        check_capacities(16, |buf| HumanMicros::fixed(42).format_into(buf)),
        "     42us "
    );
    assert_eq!(check_capacities(16, |buf| Escaped(b"\x01x").format_into(buf)), "\\x01x");
    assert_eq!(HumanCount(-123_456).required_len(), 8);
}

#[test]
fn test_required_lengths_are_literal() {
    // (rendering, expected text); `required` must not depend on capacity.
    let cases: [(fn(&mut [u8]) -> BoundedWrite, &str); 8] = [
        (|buf| append_human_micros(buf, 12_345, false), "12.34ms"),
        (|buf| append_human_micros(buf, 12_345, true), "  12.34ms "),
        (|buf| append_human_micros(buf, 999, false), "999us"),
        (|buf| append_human_micros(buf, 72_000_000_000, false), "20.00h"),
        (|buf| append_human_bytes(buf, 1023), "1023B"),
        (|buf| append_human_bytes(buf, 123_456_789), "117.73MB"),
        (|buf| append_number(buf, 0), "0"),
        (|buf| append_number(buf, u64::MAX), "18446744073709551615"),
    ];
    for (render, text) in cases {
        assert_eq!(render(&mut [0u8; 0]).required, text.len(), "{}", text);
        assert_eq!(render(&mut [0u8; 3]).required, text.len(), "{}", text);
        assert_eq!(check_capacities(24, render), text);
    }
}

#[test]
fn test_try_measure_retry() {
    let mut small = [0u8; 3];
    let first = append_human_bytes(&mut small, 123_456_789);
    assert!(first.is_truncated());

    let mut retry = vec![0u8; first.required];
    let second = append_human_bytes(&mut retry, 123_456_789);
    assert!(!second.is_truncated());
    assert_eq!(second.required, first.required);
    assert_eq!(retry, b"117.73MB");
}
