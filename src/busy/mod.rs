// SPDX-License-Identifier: MPL-2.0
//! Shared busy indicator as a saturating reference count.
//!
//! Any number of independent producers may claim "busy". The indicator is
//! shown while at least one claim is outstanding. Producers must release
//! every claim exactly once; [`BusyGuard`] does that on every exit path.
//!
//! # Components
//!
//! - [`counter`] - `BusyCounter`, the floor-at-zero count
//! - [`guard`] - `BusySource` seam and the RAII `BusyGuard`

mod counter;
mod guard;

pub use counter::{BusyCounter, Release};
pub use guard::{BusyGuard, BusySource};
