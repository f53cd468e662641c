//! IPv4 header (RFC 791).
//!
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |Version|  IHL  |Type of Service|          Total Length         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |         Identification        |Flags|      Fragment Offset    |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |  Time to Live |    Protocol   |         Header Checksum       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                       Source Address                          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    Destination Address                        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+

use crate::network::dissect::dissection::{DecodeError, LayerKind};
use std::fmt;
use std::net::Ipv4Addr;

/// Minimum IPv4 header length (IHL of 5).
pub const IPV4_MIN_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Header {
    pub ihl: u8,
    pub tos: u8,
    pub total_length: u16,
    pub id: u16,
    /// The three flag bits: reserved, DF, MF
    pub flags: u8,
    pub fragment_offset: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub checksum: u16,
    pub src: Ipv4Addr,
    pub dst: Ipv4Addr,
}

impl Ipv4Header {
    /// Parses the header and returns it with the payload it declares.
    ///
    /// A payload shorter than `total_length` is accepted and returned as
    /// far as it goes; trailing Ethernet padding is cut off.
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8]), DecodeError> {
        if data.len() < IPV4_MIN_LEN {
            return Err(DecodeError::truncated(
                LayerKind::Ipv4,
                IPV4_MIN_LEN,
                data.len(),
            ));
        }

        let version = data[0] >> 4;
        if version != 4 {
            return Err(DecodeError::invalid(
                LayerKind::Ipv4,
                format!("version {} is not 4", version),
            ));
        }

        let ihl = data[0] & 0x0F;
        if ihl < 5 {
            return Err(DecodeError::invalid(
                LayerKind::Ipv4,
                format!("IHL {} below minimum of 5", ihl),
            ));
        }

        let header_len = ihl as usize * 4;
        if data.len() < header_len {
            return Err(DecodeError::truncated(
                LayerKind::Ipv4,
                header_len,
                data.len(),
            ));
        }

        let total_length = u16::from_be_bytes([data[2], data[3]]);
        // Zero is what segmentation offload leaves behind; trust the capture
        let declared = if total_length == 0 {
            data.len()
        } else {
            total_length as usize
        };
        if declared < header_len {
            return Err(DecodeError::invalid(
                LayerKind::Ipv4,
                format!(
                    "total length {} shorter than header length {}",
                    total_length, header_len
                ),
            ));
        }

        let flags_fragment = u16::from_be_bytes([data[6], data[7]]);
        let header = Ipv4Header {
            ihl,
            tos: data[1],
            total_length,
            id: u16::from_be_bytes([data[4], data[5]]),
            flags: (flags_fragment >> 13) as u8,
            fragment_offset: flags_fragment & 0x1FFF,
            ttl: data[8],
            protocol: data[9],
            checksum: u16::from_be_bytes([data[10], data[11]]),
            src: Ipv4Addr::new(data[12], data[13], data[14], data[15]),
            dst: Ipv4Addr::new(data[16], data[17], data[18], data[19]),
        };

        let end = declared.min(data.len());
        Ok((header, &data[header_len..end]))
    }

    /// The protocol and bytes of the encapsulated layer.
    ///
    /// Non-first fragments carry no transport header.
    pub fn upper_layer<'a>(&self, payload: &'a [u8]) -> Option<(u8, &'a [u8])> {
        if self.fragment_offset != 0 {
            return None;
        }
        Some((self.protocol, payload))
    }

    pub fn dont_fragment(&self) -> bool {
        self.flags & 0b010 != 0
    }

    pub fn more_fragments(&self) -> bool {
        self.flags & 0b001 != 0
    }
}

/// Human-readable name for well-known IP protocol numbers.
pub fn ip_protocol_name(protocol: u8) -> Option<&'static str> {
    match protocol {
        0 => Some("IPv6HopByHop"),
        1 => Some("ICMPv4"),
        2 => Some("IGMP"),
        6 => Some("TCP"),
        17 => Some("UDP"),
        41 => Some("IPv6"),
        43 => Some("IPv6Routing"),
        44 => Some("IPv6Fragment"),
        47 => Some("GRE"),
        50 => Some("ESP"),
        51 => Some("AH"),
        58 => Some("ICMPv6"),
        59 => Some("NoNextHeader"),
        60 => Some("IPv6Destination"),
        132 => Some("SCTP"),
        _ => None,
    }
}

pub(crate) fn write_protocol(f: &mut fmt::Formatter<'_>, protocol: u8) -> fmt::Result {
    match ip_protocol_name(protocol) {
        Some(name) => write!(f, "{}", name),
        None => write!(f, "{}", protocol),
    }
}

impl fmt::Display for Ipv4Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IPv4 {{Version=4 IHL={} TOS={} Length={} Id={} Flags=",
            self.ihl, self.tos, self.total_length, self.id
        )?;
        match (self.dont_fragment(), self.more_fragments()) {
            (true, true) => write!(f, "DF|MF")?,
            (true, false) => write!(f, "DF")?,
            (false, true) => write!(f, "MF")?,
            (false, false) => {}
        }
        write!(
            f,
            " FragOffset={} TTL={} Protocol=",
            self.fragment_offset, self.ttl
        )?;
        write_protocol(f, self.protocol)?;
        write!(
            f,
            " Checksum={} SrcIP={} DstIP={}}}",
            self.checksum, self.src, self.dst
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::dissect::test_frames::ipv4_header;

    #[test]
    fn test_parse_header_fields() {
        let mut packet = ipv4_header(6, 4);
        packet.extend_from_slice(&[1, 2, 3, 4]);
        let (header, payload) = Ipv4Header::parse(&packet).unwrap();

        assert_eq!(header.ihl, 5);
        assert_eq!(header.total_length, 24);
        assert_eq!(header.ttl, 64);
        assert_eq!(header.protocol, 6);
        assert!(header.dont_fragment());
        assert!(!header.more_fragments());
        assert_eq!(header.src, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(header.dst, Ipv4Addr::new(10, 0, 0, 2));
        assert_eq!(payload, &[1, 2, 3, 4]);
    }

    #[test]
    fn test_padding_is_trimmed() {
        let mut packet = ipv4_header(17, 2);
        packet.extend_from_slice(&[9, 9, 0, 0, 0, 0]);
        let (_, payload) = Ipv4Header::parse(&packet).unwrap();
        assert_eq!(payload, &[9, 9]);
    }

    #[test]
    fn test_short_payload_is_accepted() {
        let mut packet = ipv4_header(17, 100);
        packet.extend_from_slice(&[7; 10]);
        let (_, payload) = Ipv4Header::parse(&packet).unwrap();
        assert_eq!(payload.len(), 10);
    }

    #[test]
    fn test_wrong_version() {
        let mut packet = ipv4_header(6, 0);
        packet[0] = 0x65;
        let err = Ipv4Header::parse(&packet).unwrap_err();
        assert!(matches!(err, DecodeError::Invalid { layer: LayerKind::Ipv4, .. }));
    }

    #[test]
    fn test_ihl_below_minimum() {
        let mut packet = ipv4_header(6, 0);
        packet[0] = 0x44;
        assert!(Ipv4Header::parse(&packet).is_err());
    }

    #[test]
    fn test_options_exceed_data() {
        let mut packet = ipv4_header(6, 0);
        packet[0] = 0x4F;
        let err = Ipv4Header::parse(&packet).unwrap_err();
        assert_eq!(err, DecodeError::truncated(LayerKind::Ipv4, 60, 20));
    }

    #[test]
    fn test_non_first_fragment_has_no_upper_layer() {
        let mut packet = ipv4_header(17, 8);
        packet[6] = 0x00;
        packet[7] = 0x10;
        packet.extend_from_slice(&[0; 8]);
        let (header, payload) = Ipv4Header::parse(&packet).unwrap();
        assert_eq!(header.fragment_offset, 16);
        assert_eq!(header.upper_layer(payload), None);
    }

    #[test]
    fn test_display() {
        let packet = ipv4_header(6, 0);
        let (header, _) = Ipv4Header::parse(&packet).unwrap();
        assert_eq!(
            header.to_string(),
            "IPv4 {Version=4 IHL=5 TOS=0 Length=20 Id=7238 Flags=DF FragOffset=0 TTL=64 Protocol=TCP Checksum=0 SrcIP=10.0.0.1 DstIP=10.0.0.2}"
        );
    }
}
