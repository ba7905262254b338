// SPDX-License-Identifier: MPL-2.0
//! Feedback domain types.
//!
//! - [`NotificationTtl`]: Lifetime of a toast before it expires
//! - [`BufferCapacity`]: Size of the diagnostics event ring

mod newtypes;

pub use newtypes::{buffer_capacity_bounds, ttl_bounds, BufferCapacity, NotificationTtl};
