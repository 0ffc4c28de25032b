//! Test utilities and fixture games for Mach development.
//!
//! Provides deterministic [`Game`](mach_core::Game) implementations and
//! action types shared by unit tests, integration tests, and benchmarks:
//!
//! - [`CounterGame`] with [`Deposit`]: adds one per tick and the deposit's
//!   value per action. Actions commute.
//! - [`LedgerGame`] with [`Stamp`]: records every tick and action in order,
//!   so any ordering mistake in replay shows up in the state.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{tick_time, CounterGame, Deposit, LedgerEntry, LedgerGame, Stamp};
