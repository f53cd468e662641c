use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration file could not be interpreted
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file is not valid TOML for `RelaySettings`
    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Connecting to the message bus failed
    #[error("Failed to connect to {servers}: {reason}")]
    Connect { servers: String, reason: String },

    /// Registering interest in an inbound channel failed
    #[error("Failed to subscribe to '{channel}': {reason}")]
    Subscribe { channel: String, reason: String },

    /// A publish or flush on the message bus failed
    #[error("Transport error on '{channel}': {reason}")]
    Transport { channel: String, reason: String },

    /// Error when a mutex/rwlock is poisoned
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

/// A convenient Result type alias using `RelayError`.
pub type Result<T> = std::result::Result<T, RelayError>;

impl RelayError {
    /// Creates a new lock poisoned error with a descriptive message.
    pub fn lock_poisoned(resource: &str) -> Self {
        Self::LockPoisoned(format!("Failed to acquire lock on {}", resource))
    }

    /// Creates a transport error for the given channel.
    pub fn transport(channel: &str, reason: impl ToString) -> Self {
        Self::Transport {
            channel: channel.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a subscription error for the given channel.
    pub fn subscribe(channel: &str, reason: impl ToString) -> Self {
        Self::Subscribe {
            channel: channel.to_string(),
            reason: reason.to_string(),
        }
    }
}
