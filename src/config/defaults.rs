// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module is the single source of truth for defaults used across
//! the crate. Range bounds live with the domain newtypes and are mirrored
//! here so configuration code reads them from one place.
//!
//! # Categories
//!
//! - **Notifications**: Toast lifetime
//! - **Confirmation**: Fallback button labels
//! - **Diagnostics**: Event ring sizing

use crate::domain::feedback::{buffer_capacity_bounds, ttl_bounds};

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Default toast lifetime in milliseconds (3.5 s).
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = ttl_bounds::DEFAULT_MS;

/// Minimum toast lifetime in milliseconds.
pub const MIN_NOTIFICATION_TTL_MS: u64 = ttl_bounds::MIN_MS;

/// Maximum toast lifetime in milliseconds.
pub const MAX_NOTIFICATION_TTL_MS: u64 = ttl_bounds::MAX_MS;

// ==========================================================================
// Confirmation Defaults
// ==========================================================================

/// Label used for the affirmative button when a request omits one.
pub const DEFAULT_CONFIRM_LABEL: &str = "Delete";

/// Label used for the dismissive button when a request omits one.
pub const DEFAULT_CANCEL_LABEL: &str = "Cancel";

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Whether feedback events are recorded by default.
pub const DEFAULT_DIAGNOSTICS_ENABLED: bool = true;

/// Default number of retained diagnostic events.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::DEFAULT;

/// Minimum number of retained diagnostic events.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::MIN;

/// Maximum number of retained diagnostic events.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = buffer_capacity_bounds::MAX;

/// Capacity of the channel between diagnostics handles and the collector.
pub const DIAGNOSTICS_CHANNEL_CAPACITY: usize = 100;
