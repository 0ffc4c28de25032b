//! Core types and traits for the Mach re-simulation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the Mach workspace:
//! tick identifiers, the wall-clock to tick quantizer, the transition
//! function traits, and configuration errors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod clock;
pub mod error;
pub mod id;
pub mod traits;

pub use clock::{time_to_tick, TickClock};
pub use error::ConfigError;
pub use id::{Tick, Time};
pub use traits::{Game, GameFns, Timed};
