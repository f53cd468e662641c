//! Layer stack produced for a single frame.

use crate::network::dissect::ethernet::{EthernetHeader, ETHERTYPE_IPV4, ETHERTYPE_IPV6};
use crate::network::dissect::ipv4::Ipv4Header;
use crate::network::dissect::ipv6::Ipv6Header;
use crate::network::dissect::tcp::{TcpHeader, IPPROTO_TCP};
use crate::network::dissect::udp::{UdpHeader, IPPROTO_UDP};
use log::debug;
use std::fmt;
use thiserror::Error;

/// The protocol layers the dissector recognises.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Ethernet,
    Ipv4,
    Ipv6,
    Tcp,
    Udp,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayerKind::Ethernet => "Ethernet",
            LayerKind::Ipv4 => "IPv4",
            LayerKind::Ipv6 => "IPv6",
            LayerKind::Tcp => "TCP",
            LayerKind::Udp => "UDP",
        };
        write!(f, "{}", name)
    }
}

/// Errors raised while decoding a single header
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer bytes than the header requires
    #[error("{layer} header truncated: need {needed} bytes, have {available}")]
    Truncated {
        layer: LayerKind,
        needed: usize,
        available: usize,
    },

    /// A header field holds a value the header cannot have
    #[error("{layer} header invalid: {reason}")]
    Invalid { layer: LayerKind, reason: String },
}

impl DecodeError {
    pub(crate) fn truncated(layer: LayerKind, needed: usize, available: usize) -> Self {
        Self::Truncated {
            layer,
            needed,
            available,
        }
    }

    pub(crate) fn invalid(layer: LayerKind, reason: impl Into<String>) -> Self {
        Self::Invalid {
            layer,
            reason: reason.into(),
        }
    }

    /// The layer that failed to decode.
    pub fn layer(&self) -> LayerKind {
        match self {
            Self::Truncated { layer, .. } | Self::Invalid { layer, .. } => *layer,
        }
    }
}

/// Read-only view of which layers a frame carries.
///
/// Only an Ethernet failure is recorded as an error; inner headers that
/// fail to decode are simply absent.
#[derive(Debug, Default, Clone)]
pub struct Dissection {
    ethernet: Option<EthernetHeader>,
    ipv4: Option<Ipv4Header>,
    ipv6: Option<Ipv6Header>,
    tcp: Option<TcpHeader>,
    udp: Option<UdpHeader>,
    error: Option<DecodeError>,
}

impl Dissection {
    /// The top-level decode error, if the frame is not Ethernet at all.
    pub fn error(&self) -> Option<&DecodeError> {
        self.error.as_ref()
    }

    pub fn ethernet(&self) -> Option<&EthernetHeader> {
        self.ethernet.as_ref()
    }

    pub fn ipv4(&self) -> Option<&Ipv4Header> {
        self.ipv4.as_ref()
    }

    pub fn ipv6(&self) -> Option<&Ipv6Header> {
        self.ipv6.as_ref()
    }

    pub fn tcp(&self) -> Option<&TcpHeader> {
        self.tcp.as_ref()
    }

    pub fn udp(&self) -> Option<&UdpHeader> {
        self.udp.as_ref()
    }

    /// Whether a layer of the given kind was recognised.
    pub fn has(&self, kind: LayerKind) -> bool {
        match kind {
            LayerKind::Ethernet => self.ethernet.is_some(),
            LayerKind::Ipv4 => self.ipv4.is_some(),
            LayerKind::Ipv6 => self.ipv6.is_some(),
            LayerKind::Tcp => self.tcp.is_some(),
            LayerKind::Udp => self.udp.is_some(),
        }
    }

    /// Present layers in trace order: Ethernet, IP, TCP, UDP.
    pub fn layers(&self) -> Vec<(LayerKind, &dyn fmt::Display)> {
        let mut layers: Vec<(LayerKind, &dyn fmt::Display)> = Vec::with_capacity(4);

        if let Some(ethernet) = &self.ethernet {
            layers.push((LayerKind::Ethernet, ethernet));
        }

        if let Some(ipv4) = &self.ipv4 {
            layers.push((LayerKind::Ipv4, ipv4));
        } else if let Some(ipv6) = &self.ipv6 {
            layers.push((LayerKind::Ipv6, ipv6));
        }

        if let Some(tcp) = &self.tcp {
            layers.push((LayerKind::Tcp, tcp));
        }

        if let Some(udp) = &self.udp {
            layers.push((LayerKind::Udp, udp));
        }

        layers
    }
}

/// Dissects a raw frame into its recognised layers.
///
/// Detection order is fixed: Ethernet, IPv4, then IPv6 only if IPv4 is
/// absent, then TCP and UDP each checked on whatever the IP layer carried.
/// An empty frame yields no layers and no error.
pub fn dissect(data: &[u8]) -> Dissection {
    let mut result = Dissection::default();

    if data.is_empty() {
        return result;
    }

    let (ethernet, payload) = match EthernetHeader::parse(data) {
        Ok(parsed) => parsed,
        Err(e) => {
            result.error = Some(e);
            return result;
        }
    };
    let ether_type = ethernet.ether_type;
    result.ethernet = Some(ethernet);

    let mut upper: Option<(u8, &[u8])> = None;

    if ether_type == ETHERTYPE_IPV4 {
        match Ipv4Header::parse(payload) {
            Ok((ipv4, ip_payload)) => {
                upper = ipv4.upper_layer(ip_payload);
                result.ipv4 = Some(ipv4);
            }
            Err(e) => debug!("IPv4 layer not recognised: {}", e),
        }
    }

    if result.ipv4.is_none() && ether_type == ETHERTYPE_IPV6 {
        match Ipv6Header::parse(payload) {
            Ok((ipv6, ip_payload)) => {
                upper = ipv6.upper_layer(ip_payload);
                result.ipv6 = Some(ipv6);
            }
            Err(e) => debug!("IPv6 layer not recognised: {}", e),
        }
    }

    let Some((protocol, segment)) = upper else {
        return result;
    };

    if protocol == IPPROTO_TCP {
        match TcpHeader::parse(segment) {
            Ok(tcp) => result.tcp = Some(tcp),
            Err(e) => debug!("TCP layer not recognised: {}", e),
        }
    }

    if protocol == IPPROTO_UDP {
        match UdpHeader::parse(segment) {
            Ok(udp) => result.udp = Some(udp),
            Err(e) => debug!("UDP layer not recognised: {}", e),
        }
    }

    result
}
