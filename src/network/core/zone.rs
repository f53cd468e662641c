use std::fmt;

/// Inbound channel carrying frames from the secure zone.
pub const SECURE_INBOUND: &str = "inpktsec";
/// Inbound channel carrying frames from the insecure zone.
pub const INSECURE_INBOUND: &str = "inpktinsec";
/// Outbound channel towards the insecure zone.
pub const INSECURE_OUTBOUND: &str = "outpktinsec";
/// Outbound channel towards the secure zone.
pub const SECURE_OUTBOUND: &str = "outpktsec";

/// The zone a frame arrived from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ZoneTag {
    Secure,
    Insecure,
}

impl ZoneTag {
    /// Both zones, in subscription order.
    pub const ALL: [ZoneTag; 2] = [ZoneTag::Secure, ZoneTag::Insecure];

    /// Tags a frame by the channel it arrived on.
    ///
    /// Only `inpktsec` is the secure zone; every other channel name is
    /// treated as insecure.
    pub fn from_channel(channel: &str) -> Self {
        if channel == SECURE_INBOUND {
            ZoneTag::Secure
        } else {
            ZoneTag::Insecure
        }
    }

    /// The channel this zone's frames are received on.
    pub fn inbound_channel(self) -> &'static str {
        match self {
            ZoneTag::Secure => SECURE_INBOUND,
            ZoneTag::Insecure => INSECURE_INBOUND,
        }
    }
}

impl fmt::Display for ZoneTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneTag::Secure => write!(f, "secure"),
            ZoneTag::Insecure => write!(f, "insecure"),
        }
    }
}

/// Maps an inbound zone to the outbound channel its frames are published on.
///
/// The mapping is fixed: secure goes to `outpktinsec`, anything else goes
/// to `outpktsec`. The names do not swap symmetrically and are kept that
/// way on purpose.
#[derive(Debug, Default, Copy, Clone)]
pub struct ZoneRouter;

impl ZoneRouter {
    pub fn new() -> Self {
        Self
    }

    /// Returns the outbound channel for a frame from `zone`.
    pub fn route(&self, zone: ZoneTag) -> &'static str {
        match zone {
            ZoneTag::Secure => INSECURE_OUTBOUND,
            ZoneTag::Insecure => SECURE_OUTBOUND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_routes_to_outpktinsec() {
        let router = ZoneRouter::new();
        assert_eq!(router.route(ZoneTag::from_channel("inpktsec")), "outpktinsec");
    }

    #[test]
    fn test_other_channels_route_to_outpktsec() {
        let router = ZoneRouter::new();
        for channel in ["inpktinsec", "outpktsec", "", "INPKTSEC", "inpktsec.extra"] {
            assert_eq!(router.route(ZoneTag::from_channel(channel)), "outpktsec");
        }
    }

    #[test]
    fn test_inbound_channel_round_trip() {
        for zone in ZoneTag::ALL {
            assert_eq!(ZoneTag::from_channel(zone.inbound_channel()), zone);
        }
    }
}
