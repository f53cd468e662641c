//! # Zone Relay - A two-zone packet relay over a message bus
//!
//! Zone Relay sits between two network segments, a secure zone and an
//! insecure zone. Raw Ethernet frames captured in one zone arrive on a
//! message bus channel; each frame is held for a configurable delay,
//! dissected for diagnostics, and then published byte-for-byte to the
//! outbound channel of the other zone.
//!
//! ## Features
//!
//! * Layer dissection - Ethernet, IPv4, IPv6, TCP and UDP, logged per frame
//! * Malformed frame detection - frames that are not Ethernet are dropped
//! * Delay injection - fixed or exponentially distributed per-frame delay
//! * Zone routing - `inpktsec` goes to `outpktinsec`, everything else to `outpktsec`
//!
//! ## Architecture
//!
//! Every inbound message is processed on its own tokio task, so a frame
//! waiting out its delay never holds up another. The message bus sits
//! behind the [`ChannelTransport`](network::transport::ChannelTransport)
//! trait, implemented for NATS and for an in-process memory bus.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use zone_relay::prelude::*;
//!
//! # async fn run() -> zone_relay::Result<()> {
//! let settings = RelaySettingsBuilder::new()
//!     .delay(20)
//!     .servers("nats://127.0.0.1:4222")
//!     .build();
//!
//! let transport = NatsTransport::connect(&settings.transport).await?;
//! RelayProcessor::new(Arc::new(transport), &settings)
//!     .run(async {
//!         let _ = tokio::signal::ctrl_c().await;
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

/// Centralized error handling
pub mod error;
/// Console logger setup
pub mod logging;
/// Frame relaying functionality
pub mod network;
/// Prelude for convenient imports
pub mod prelude;
/// Configuration settings for the relay
pub mod settings;
/// Shared utility functions
pub mod utils;

// Re-export commonly used types
pub use error::{RelayError, Result};
