//! Settings module for the relay process.
//!
//! Settings are resolved once at startup from the environment, optionally
//! layered over a TOML file, and are read-only afterwards.
//!
//! # Example
//!
//! ```rust
//! use zone_relay::settings::RelaySettingsBuilder;
//!
//! let settings = RelaySettingsBuilder::new()
//!     .delay(5)
//!     .build();
//! ```

pub mod builder;
pub mod delay;
pub mod relay;
pub mod transport;

// Re-export commonly used types
pub use builder::RelaySettingsBuilder;
pub use delay::{DelayDistribution, DelayOptions};
pub use relay::RelaySettings;
pub use transport::TransportOptions;
