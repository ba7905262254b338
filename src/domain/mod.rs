// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects with no dependencies beyond `std`.
//!
//! # Modules
//!
//! - [`feedback`]: Validated configuration values
//!   ([`NotificationTtl`](feedback::NotificationTtl),
//!   [`BufferCapacity`](feedback::BufferCapacity))

pub mod feedback;
