//! Relay settings builder.
//!
//! This module provides a fluent builder API for constructing
//! `RelaySettings` without going through the environment.
//!
//! # Example
//!
//! ```rust
//! use zone_relay::settings::builder::RelaySettingsBuilder;
//!
//! let settings = RelaySettingsBuilder::new()
//!     .delay(5)  // 5ms per frame
//!     .exponential_delay()
//!     .servers("nats://nats:4222")
//!     .build();
//! ```

use crate::settings::delay::DelayDistribution;
use crate::settings::relay::RelaySettings;

/// Builder for constructing `RelaySettings`.
#[derive(Debug, Default)]
pub struct RelaySettingsBuilder {
    settings: RelaySettings,
}

impl RelaySettingsBuilder {
    /// Creates a new builder with default settings (20ms fixed delay).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-frame delay.
    ///
    /// # Arguments
    ///
    /// * `delay_ms` - Delay in milliseconds
    pub fn delay(mut self, delay_ms: u64) -> Self {
        self.settings.delay.delay_ms = delay_ms as f64;
        self
    }

    /// Draws each frame's delay from an exponential distribution whose
    /// mean is the configured delay.
    pub fn exponential_delay(mut self) -> Self {
        self.settings.delay.distribution = DelayDistribution::Exponential;
        self
    }

    /// Sets the message bus server address.
    pub fn servers(mut self, servers: impl Into<String>) -> Self {
        self.settings.transport.servers = servers.into();
        self
    }

    /// Builds the final `RelaySettings`.
    pub fn build(self) -> RelaySettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        assert_eq!(RelaySettingsBuilder::new().build(), RelaySettings::default());
    }

    #[test]
    fn test_builder_chain() {
        let settings = RelaySettingsBuilder::new()
            .delay(5)
            .exponential_delay()
            .servers("nats://nats:4222")
            .build();

        assert_eq!(settings.delay.delay_ms, 5.0);
        assert_eq!(settings.delay.distribution, DelayDistribution::Exponential);
        assert_eq!(settings.transport.servers, "nats://nats:4222");
    }
}
