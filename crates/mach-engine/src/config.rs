//! Engine configuration and validation.

use mach_core::{ConfigError, Tick, TickClock};

/// Builder-input for [`Mach::new`](crate::Mach::new).
///
/// All values are immutable once the engine is created.
#[derive(Clone, Debug, PartialEq)]
pub struct MachConfig {
    /// Simulation rate. Must be finite and positive.
    pub ticks_per_second: f64,
    /// Largest gap, in ticks, that a single `compute` will replay.
    ///
    /// A request further than this past its starting snapshot returns the
    /// starting state unchanged instead of replaying. Default: 1000.
    pub max_replay_ticks: u64,
    /// Tick at which `Game::init` holds. Default: `Tick(0)`.
    ///
    /// Replays with no retained snapshot start here, or at the earliest
    /// action's tick if that is earlier.
    pub origin_tick: Tick,
}

impl MachConfig {
    /// Default replay budget in ticks.
    pub const DEFAULT_MAX_REPLAY_TICKS: u64 = 1000;

    /// Config for the given rate with default budget and origin.
    pub fn new(ticks_per_second: f64) -> Self {
        Self {
            ticks_per_second,
            max_replay_ticks: Self::DEFAULT_MAX_REPLAY_TICKS,
            origin_tick: Tick(0),
        }
    }

    /// Override the replay budget.
    pub fn with_max_replay_ticks(mut self, max_replay_ticks: u64) -> Self {
        self.max_replay_ticks = max_replay_ticks;
        self
    }

    /// Override the origin tick.
    pub fn with_origin_tick(mut self, origin_tick: Tick) -> Self {
        self.origin_tick = origin_tick;
        self
    }

    /// Check structural invariants.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidTickRate`] for a non-finite or non-positive
    /// rate, [`ConfigError::ZeroReplayBudget`] for a zero budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validated_clock().map(|_| ())
    }

    /// Validate and build the tick clock in one step.
    pub(crate) fn validated_clock(&self) -> Result<TickClock, ConfigError> {
        let clock = TickClock::new(self.ticks_per_second)?;
        if self.max_replay_ticks == 0 {
            return Err(ConfigError::ZeroReplayBudget);
        }
        Ok(clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MachConfig::new(60.0);
        assert_eq!(config.max_replay_ticks, 1000);
        assert_eq!(config.origin_tick, Tick(0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_rate() {
        let err = MachConfig::new(-5.0).validate().unwrap_err();
        assert_eq!(err, ConfigError::InvalidTickRate { value: -5.0 });
    }

    #[test]
    fn rejects_zero_budget() {
        let err = MachConfig::new(10.0)
            .with_max_replay_ticks(0)
            .validate()
            .unwrap_err();
        assert_eq!(err, ConfigError::ZeroReplayBudget);
    }

    #[test]
    fn validated_clock_carries_rate() {
        let clock = MachConfig::new(25.0).validated_clock().unwrap();
        assert_eq!(clock.ticks_per_second(), 25.0);
        assert!(MachConfig::new(f64::NAN).validated_clock().is_err());
    }

    #[test]
    fn builders_override() {
        let config = MachConfig::new(10.0)
            .with_max_replay_ticks(5)
            .with_origin_tick(Tick(-4));
        assert_eq!(config.max_replay_ticks, 5);
        assert_eq!(config.origin_tick, Tick(-4));
    }
}
