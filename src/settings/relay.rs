use crate::error::{RelayError, Result};
use crate::settings::delay::{DelayOptions, DELAY_DISTRIBUTION_ENV, DELAY_MS_ENV};
use crate::settings::transport::{TransportOptions, SERVERS_ENV};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Environment variable naming an optional TOML settings file.
pub const CONFIG_FILE_ENV: &str = "RELAY_CONFIG";

/// Immutable relay configuration resolved once at startup.
///
/// The pipeline receives this by reference when it is constructed and
/// never consults the environment afterwards.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct RelaySettings {
    /// Per-frame processing delay
    #[serde(default)]
    pub delay: DelayOptions,

    /// Message bus connection
    #[serde(default)]
    pub transport: TransportOptions,
}

impl RelaySettings {
    /// Resolves settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through `lookup`, which maps a variable name to its value.
    ///
    /// When `RELAY_CONFIG` names a file it provides the base values;
    /// `PACKET_DELAY_MS`, `PACKET_DELAY_DISTRIBUTION` and
    /// `NATS_SURVEYOR_SERVERS` then override them.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match lookup(CONFIG_FILE_ENV).filter(|path| !path.is_empty()) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        settings.delay.apply_env(
            lookup(DELAY_MS_ENV).as_deref(),
            lookup(DELAY_DISTRIBUTION_ENV).as_deref(),
        );
        settings.transport.apply_env(lookup(SERVERS_ENV).as_deref());

        Ok(settings)
    }

    /// Loads settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RelayError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let settings = Self::from_toml(&content)?;
        info!("Loaded relay settings from {}", path.display());
        Ok(settings)
    }

    /// Parses settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::delay::DelayDistribution;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_with_empty_environment() {
        let settings = RelaySettings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.delay.delay_ms, 20.0);
        assert_eq!(settings.delay.distribution, DelayDistribution::Fixed);
        assert_eq!(settings.transport.servers, "nats://127.0.0.1:4222");
    }

    #[test]
    fn test_environment_overrides() {
        let settings = RelaySettings::from_lookup(lookup_from(&[
            ("PACKET_DELAY_MS", "5"),
            ("PACKET_DELAY_DISTRIBUTION", "exponential"),
            ("NATS_SURVEYOR_SERVERS", "nats://nats:4222"),
        ]))
        .unwrap();

        assert_eq!(settings.delay.delay_ms, 5.0);
        assert_eq!(settings.delay.distribution, DelayDistribution::Exponential);
        assert_eq!(settings.transport.servers, "nats://nats:4222");
    }

    #[test]
    fn test_unparsable_delay_falls_back() {
        let settings =
            RelaySettings::from_lookup(lookup_from(&[("PACKET_DELAY_MS", "abc")])).unwrap();
        assert_eq!(settings.delay.delay_ms, 20.0);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings = RelaySettings::from_toml("[delay]\ndelay_ms = 7\n").unwrap();
        assert_eq!(settings.delay.delay_ms, 7.0);
        assert_eq!(settings.delay.distribution, DelayDistribution::Fixed);
        assert_eq!(settings.transport, TransportOptions::default());
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let result = RelaySettings::from_toml("[delay]\ndelay_ms = \"soon\"\n");
        assert!(matches!(result, Err(RelayError::ConfigParse(_))));
    }

    #[test]
    fn test_config_file_with_environment_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[delay]\ndelay_ms = 40\ndistribution = \"exponential\"\n\n[transport]\nservers = \"nats://file:4222\""
        )
        .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let settings = RelaySettings::from_lookup(lookup_from(&[
            ("RELAY_CONFIG", path.as_str()),
            ("PACKET_DELAY_MS", "9"),
        ]))
        .unwrap();

        assert_eq!(settings.delay.delay_ms, 9.0);
        assert_eq!(settings.delay.distribution, DelayDistribution::Exponential);
        assert_eq!(settings.transport.servers, "nats://file:4222");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = RelaySettings::from_lookup(lookup_from(&[(
            "RELAY_CONFIG",
            "/nonexistent/zone-relay.toml",
        )]));
        assert!(matches!(result, Err(RelayError::Config(_))));
    }

    #[test]
    fn test_settings_round_trip_through_toml() {
        let settings = RelaySettings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        assert_eq!(RelaySettings::from_toml(&text).unwrap(), settings);
    }
}
