//! Core relay types.
//!
//! This module contains the frame representation, zone tags and the
//! fixed zone-to-channel routing table.

pub mod frame;
pub mod zone;

// Re-export commonly used types
pub use frame::Frame;
pub use zone::{ZoneRouter, ZoneTag};
