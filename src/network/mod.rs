//! Network module for relaying frames between zones.
//!
//! This module contains the components that receive frames from the
//! message bus, inspect and delay them, and publish them to the other zone.

pub mod core;
pub mod dissect;
pub mod modules;
pub mod processing;
pub mod transport;
pub mod types;
