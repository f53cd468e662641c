//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types and traits from the crate,
//! allowing users to import everything they need with a single use statement:
//!
//! ```rust
//! use zone_relay::prelude::*;
//! ```

// Error handling
pub use crate::error::{RelayError, Result};

// Network core
pub use crate::network::core::{Frame, ZoneRouter, ZoneTag};

// Dissection
pub use crate::network::dissect::{dissect, DecodeError, Dissection, LayerKind};

// Processing
pub use crate::network::modules::DelayModule;
pub use crate::network::processing::{Outcome, RelayPipeline, RelayProcessor};

// Transports
pub use crate::network::transport::{
    ChannelTransport, InboundMessage, MemoryTransport, NatsTransport, Subscription,
};

// Settings
pub use crate::settings::{
    DelayDistribution, DelayOptions, RelaySettings, RelaySettingsBuilder, TransportOptions,
};
