//! Unit scale tables.
//!
//! A table is an ordered list of tiers. Each tier carries the smallest
//! magnitude it applies to, the divisor used to scale the magnitude down,
//! and the suffix printed after the scaled value. Tables are plain `static`
//! data: they are built at compile time and shared read-only by every
//! caller.

/// One row of a unit scale table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    /// Smallest magnitude rendered with this tier.
    pub lower_bound: u64,
    /// Divisor applied to the magnitude. A divisor of 1 marks the base tier.
    pub divisor: u64,
    /// Unit suffix, written directly after the number.
    pub suffix: &'static str,
}

impl Tier {
    const fn new(lower_bound: u64, divisor: u64, suffix: &'static str) -> Self {
        Self { lower_bound, divisor, suffix }
    }

    /// Whether values in this tier are rendered as exact integers.
    #[inline]
    pub fn is_base(&self) -> bool {
        self.divisor == 1
    }
}

/// The semantic category a magnitude belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitFamily {
    /// Elapsed time in microseconds.
    TimeMicros,
    /// Byte counts, scaled by powers of 1024.
    Bytes,
    /// Plain counts, scaled by powers of 1000.
    Count,
}

impl UnitFamily {
    /// The scale table for this family.
    pub fn table(self) -> &'static UnitScaleTable {
        match self {
            UnitFamily::TimeMicros => &TIME_MICROS,
            UnitFamily::Bytes => &BYTES,
            UnitFamily::Count => &COUNT,
        }
    }
}

/// A sorted, covering sequence of tiers.
///
/// Tiers are ascending by `lower_bound` and the first tier starts at zero,
/// so every `u64` maps to exactly one tier.
#[derive(Debug)]
pub struct UnitScaleTable {
    tiers: &'static [Tier],
}

impl UnitScaleTable {
    pub fn tiers(&self) -> &'static [Tier] {
        self.tiers
    }

    /// Returns the tier with the largest lower bound not exceeding `value`.
    ///
    /// A value sitting exactly on a boundary belongs to the higher tier.
    ///
    /// # Examples
    ///
    /// ```
    /// # use log_units::unit_scale::COUNT;
    /// assert_eq!(COUNT.tier_for(9_999).suffix, "");
    /// assert_eq!(COUNT.tier_for(10_000).suffix, "K");
    /// ```
    pub fn tier_for(&self, value: u64) -> &'static Tier {
        // First tier whose lower bound exceeds the value; the one before it wins.
        let idx = self.tiers.partition_point(|t| t.lower_bound <= value);
        &self.tiers[idx.saturating_sub(1)]
    }
}

const MICROS_PER_MS: u64 = 1_000;
const MICROS_PER_SEC: u64 = 1_000_000;
const MICROS_PER_MIN: u64 = 60 * MICROS_PER_SEC;
const MICROS_PER_HOUR: u64 = 60 * MICROS_PER_MIN;

/// Elapsed time in microseconds. Each tier starts at ten of its own unit.
pub static TIME_MICROS: UnitScaleTable = UnitScaleTable {
    tiers: &[
        Tier::new(0, 1, "us"),
        Tier::new(10 * MICROS_PER_MS, MICROS_PER_MS, "ms"),
        Tier::new(10 * MICROS_PER_SEC, MICROS_PER_SEC, "s"),
        Tier::new(10 * MICROS_PER_MIN, MICROS_PER_MIN, "min"),
        Tier::new(10 * MICROS_PER_HOUR, MICROS_PER_HOUR, "h"),
    ],
};

const KIB: u64 = 1 << 10;

/// Byte counts. Each tier starts at one of its own unit.
pub static BYTES: UnitScaleTable = UnitScaleTable {
    tiers: &[
        Tier::new(0, 1, "B"),
        Tier::new(KIB, KIB, "KB"),
        Tier::new(KIB << 10, KIB << 10, "MB"),
        Tier::new(KIB << 20, KIB << 20, "GB"),
        Tier::new(KIB << 30, KIB << 30, "TB"),
        Tier::new(KIB << 40, KIB << 40, "PB"),
        Tier::new(KIB << 50, KIB << 50, "EB"),
    ],
};

/// Plain counts. Each tier starts at ten of its own unit.
pub static COUNT: UnitScaleTable = UnitScaleTable {
    tiers: &[
        Tier::new(0, 1, ""),
        Tier::new(10_000, 1_000, "K"),
        Tier::new(10_000_000, 1_000_000, "M"),
        Tier::new(10_000_000_000, 1_000_000_000, "G"),
    ],
};
