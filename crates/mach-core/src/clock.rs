//! Wall-clock to tick quantization.

use crate::error::ConfigError;
use crate::id::{Tick, Time};

/// Map a wall-clock time (ms) to its tick at the given rate.
///
/// Computes `floor(time / 1000 * ticks_per_second)`. No validation is
/// performed: NaN saturates to `Tick(0)` and infinities saturate to the
/// `i64` bounds, following Rust's float-to-int cast rules.
#[inline]
pub fn time_to_tick(ticks_per_second: f64, time: Time) -> Tick {
    Tick((time / 1000.0 * ticks_per_second).floor() as i64)
}

/// A validated, immutable tick rate.
///
/// Created once per engine and never mutated afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickClock {
    ticks_per_second: f64,
}

impl TickClock {
    /// Create a clock running at `ticks_per_second`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTickRate`] if the rate is not finite
    /// and strictly positive.
    pub fn new(ticks_per_second: f64) -> Result<Self, ConfigError> {
        if !ticks_per_second.is_finite() || ticks_per_second <= 0.0 {
            return Err(ConfigError::InvalidTickRate {
                value: ticks_per_second,
            });
        }
        Ok(Self { ticks_per_second })
    }

    /// The configured rate.
    pub fn ticks_per_second(&self) -> f64 {
        self.ticks_per_second
    }

    /// The tick that `time` falls into.
    #[inline]
    pub fn time_to_tick(&self, time: Time) -> Tick {
        time_to_tick(self.ticks_per_second, time)
    }

    /// Earliest wall-clock time that maps to `tick`.
    ///
    /// Floating-point rounding can place the result a hair before the
    /// boundary for rates that are not exactly representable.
    pub fn tick_start(&self, tick: Tick) -> Time {
        tick.0 as f64 * 1000.0 / self.ticks_per_second
    }
}
