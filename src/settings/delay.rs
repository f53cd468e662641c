use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the per-frame delay in milliseconds.
pub const DELAY_MS_ENV: &str = "PACKET_DELAY_MS";

/// Environment variable selecting how each frame's delay is drawn.
pub const DELAY_DISTRIBUTION_ENV: &str = "PACKET_DELAY_DISTRIBUTION";

/// Delay applied when nothing valid is configured.
pub const DEFAULT_DELAY_MS: f64 = 20.0;

/// Returned when a distribution name is not recognised
#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a delay distribution (expected 'fixed' or 'exponential')")]
pub struct UnknownDistribution(String);

/// How the delay for each frame is derived from `delay_ms`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelayDistribution {
    /// Every frame waits exactly `delay_ms`
    #[default]
    Fixed,
    /// Each frame waits a sample from an exponential distribution with mean `delay_ms`
    Exponential,
}

impl FromStr for DelayDistribution {
    type Err = UnknownDistribution;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "exponential" => Ok(Self::Exponential),
            _ => Err(UnknownDistribution(s.to_string())),
        }
    }
}

impl fmt::Display for DelayDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Exponential => write!(f, "exponential"),
        }
    }
}

fn default_delay_ms() -> f64 {
    DEFAULT_DELAY_MS
}

#[derive(Debug, Serialize, Deserialize, Copy, Clone, PartialEq)]
pub struct DelayOptions {
    /// Delay in milliseconds to introduce for each frame, fractions allowed
    #[serde(default = "default_delay_ms")]
    pub delay_ms: f64,

    /// Distribution the per-frame delay is drawn from
    #[serde(default)]
    pub distribution: DelayDistribution,
}

impl Default for DelayOptions {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_DELAY_MS,
            distribution: DelayDistribution::Fixed,
        }
    }
}

impl DelayOptions {
    /// The configured delay as a `Duration`.
    ///
    /// A negative or non-finite value (only reachable through a config
    /// file) is treated as the 20 ms default.
    pub fn duration(&self) -> Duration {
        millis_to_duration(self.delay_ms)
            .unwrap_or(Duration::from_millis(DEFAULT_DELAY_MS as u64))
    }

    /// Applies the environment overrides on top of these options.
    ///
    /// An unset `PACKET_DELAY_MS` keeps the current value. A set but
    /// unparsable one falls back to the 20 ms default rather than the
    /// current value.
    pub fn apply_env(&mut self, delay_ms: Option<&str>, distribution: Option<&str>) {
        if let Some(raw) = delay_ms.filter(|raw| !raw.is_empty()) {
            self.delay_ms = parse_delay_ms(Some(raw));
        }

        if let Some(raw) = distribution {
            match raw.parse() {
                Ok(distribution) => self.distribution = distribution,
                Err(e) => warn!("{}, keeping {} delay", e, self.distribution),
            }
        }
    }
}

/// Resolves a raw `PACKET_DELAY_MS` value into milliseconds.
///
/// Absent or empty means `"20"`. The value is a plain decimal number of
/// milliseconds, fractions allowed (`"1.5"` is 1.5 ms). Anything else,
/// including a negative number or an exponent, logs the fallback and
/// yields 20.
pub fn parse_delay_ms(raw: Option<&str>) -> f64 {
    let raw = raw.filter(|raw| !raw.is_empty()).unwrap_or("20");
    let decimal = raw.bytes().all(|b| b.is_ascii_digit() || b == b'.');

    match raw.parse::<f64>() {
        Ok(ms) if decimal && millis_to_duration(ms).is_some() => ms,
        _ => {
            warn!(
                "Invalid delay value '{}', using default {}ms",
                raw, DEFAULT_DELAY_MS
            );
            DEFAULT_DELAY_MS
        }
    }
}

/// Converts milliseconds to a `Duration`, rejecting negative and
/// non-finite values.
fn millis_to_duration(ms: f64) -> Option<Duration> {
    if !ms.is_finite() || ms < 0.0 {
        return None;
    }
    Some(Duration::from_nanos((ms * 1_000_000.0).round() as u64))
}
