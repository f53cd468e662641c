use serde::{Deserialize, Serialize};

/// Environment variable naming the message bus server address.
pub const SERVERS_ENV: &str = "NATS_SURVEYOR_SERVERS";

/// Endpoint used when no server address is configured.
pub const DEFAULT_SERVERS: &str = "nats://127.0.0.1:4222";

fn default_servers() -> String {
    DEFAULT_SERVERS.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    /// Message bus server address
    #[serde(default = "default_servers")]
    pub servers: String,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            servers: default_servers(),
        }
    }
}

impl TransportOptions {
    /// Applies `NATS_SURVEYOR_SERVERS`; an empty value counts as unset.
    pub fn apply_env(&mut self, servers: Option<&str>) {
        if let Some(servers) = servers.map(str::trim).filter(|s| !s.is_empty()) {
            self.servers = servers.to_string();
        }
    }
}
