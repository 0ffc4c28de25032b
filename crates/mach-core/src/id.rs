//! Tick identifiers and the [`Time`] alias.

use std::fmt;

/// Wall-clock time in milliseconds.
///
/// Not sanitized anywhere in the core: NaN or negative values flow
/// straight through tick quantization.
pub type Time = f64;

/// A discrete simulation step.
///
/// Ticks are totally ordered and that ordering is the only source of
/// causality in the engine. The inner value is signed so that the floor
/// of a negative time stays representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Tick(pub i64);

impl Tick {
    /// The tick immediately after this one (saturating).
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Number of ticks from `earlier` to `self`, or `None` if `earlier`
    /// is after `self`.
    pub fn ticks_since(self, earlier: Tick) -> Option<u64> {
        let gap = self.0.checked_sub(earlier.0)?;
        u64::try_from(gap).ok()
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Tick {
    fn from(v: i64) -> Self {
        Self(v)
    }
}
