//! Cumulative engine counters.
//!
//! [`MachMetrics`] is updated in place by every `register_action` and
//! `compute` call and read back through [`Mach::metrics`](crate::Mach::metrics).

/// Counters and gauges describing an engine's history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MachMetrics {
    /// Actions newly added to the action log.
    pub actions_registered: u64,
    /// Registrations dropped as duplicates.
    pub duplicate_actions: u64,
    /// Late actions that rolled the snapshot log back.
    pub rollbacks: u64,
    /// Snapshot nodes discarded by rollbacks.
    pub snapshots_dropped: u64,
    /// Rollbacks that had to clear the snapshot log entirely.
    pub log_resets: u64,
    /// Ticks re-simulated across all computes.
    pub ticks_replayed: u64,
    /// Computes refused because the gap exceeded the replay budget.
    pub budget_exceeded: u64,
    /// Computes for a tick before the snapshot head, served read-only.
    pub historical_queries: u64,
    /// Snapshots in the live chain after the latest call.
    pub snapshots_retained: usize,
    /// Wall-clock duration of the latest compute, in microseconds.
    pub last_compute_us: u64,
}
