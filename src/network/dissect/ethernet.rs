//! Ethernet II header, optionally carrying 802.1Q / 802.1ad tags.
//!
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |                     destination_mac_addr                      |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  | destination_mac_addr (con't)  |        source_mac_addr        |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |                    source_mac_addr (con't)                    |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |           eth_type            |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+

use crate::network::dissect::dissection::{DecodeError, LayerKind};
use crate::network::types::mac_addr::MacAddr;
use std::fmt;

/// The length of the untagged Ethernet header.
pub const ETH_LEN: usize = 14;
/// Length of one VLAN tag (TPID is already counted as the EtherType).
const VLAN_TAG_LEN: usize = 4;
/// Tags followed before giving up (single tag or QinQ).
const MAX_VLAN_TAGS: usize = 2;

pub const ETHERTYPE_IPV4: u16 = 0x0800;
pub const ETHERTYPE_ARP: u16 = 0x0806;
pub const ETHERTYPE_VLAN: u16 = 0x8100;
pub const ETHERTYPE_IPV6: u16 = 0x86DD;
pub const ETHERTYPE_QINQ: u16 = 0x88A8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EthernetHeader {
    pub dst: MacAddr,
    pub src: MacAddr,
    /// EtherType of the payload, after any VLAN tags
    pub ether_type: u16,
    /// VLAN id of the innermost tag, if tagged
    pub vlan_id: Option<u16>,
    /// Whole frame length in bytes
    pub frame_len: usize,
}

impl EthernetHeader {
    /// Parses the header and returns it with the remaining payload.
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8]), DecodeError> {
        if data.len() < ETH_LEN {
            return Err(DecodeError::truncated(
                LayerKind::Ethernet,
                ETH_LEN,
                data.len(),
            ));
        }

        let dst = MacAddr::from_slice(&data[0..6]).unwrap_or_default();
        let src = MacAddr::from_slice(&data[6..12]).unwrap_or_default();
        let mut ether_type = u16::from_be_bytes([data[12], data[13]]);
        let mut offset = ETH_LEN;
        let mut vlan_id = None;

        for _ in 0..MAX_VLAN_TAGS {
            if ether_type != ETHERTYPE_VLAN && ether_type != ETHERTYPE_QINQ {
                break;
            }

            let needed = offset + VLAN_TAG_LEN;
            if data.len() < needed {
                return Err(DecodeError::truncated(
                    LayerKind::Ethernet,
                    needed,
                    data.len(),
                ));
            }

            let tci = u16::from_be_bytes([data[offset], data[offset + 1]]);
            vlan_id = Some(tci & 0x0FFF);
            ether_type = u16::from_be_bytes([data[offset + 2], data[offset + 3]]);
            offset = needed;
        }

        let header = EthernetHeader {
            dst,
            src,
            ether_type,
            vlan_id,
            frame_len: data.len(),
        };

        Ok((header, &data[offset..]))
    }
}

/// Human-readable name for well-known EtherTypes.
pub fn ether_type_name(ether_type: u16) -> Option<&'static str> {
    match ether_type {
        ETHERTYPE_IPV4 => Some("IPv4"),
        ETHERTYPE_ARP => Some("ARP"),
        ETHERTYPE_IPV6 => Some("IPv6"),
        ETHERTYPE_VLAN => Some("Dot1Q"),
        ETHERTYPE_QINQ => Some("QinQ"),
        0x88CC => Some("LLDP"),
        0x8847 => Some("MPLSUnicast"),
        _ => None,
    }
}

impl fmt::Display for EthernetHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ethernet {{SrcMAC={} DstMAC={} ", self.src, self.dst)?;
        match ether_type_name(self.ether_type) {
            Some(name) => write!(f, "EthernetType={}", name)?,
            None => write!(f, "EthernetType=0x{:04x}", self.ether_type)?,
        }
        if let Some(vlan_id) = self.vlan_id {
            write!(f, " VLAN={}", vlan_id)?;
        }
        write!(f, " Length={}}}", self.frame_len)
    }
}
