//! IPv6 fixed header (RFC 8200) and extension header walk.
//!
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |Version| Traffic Class |           Flow Label                  |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |         Payload Length        |  Next Header  |   Hop Limit   |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                         Source Address (128)                  |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                      Destination Address (128)                |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+

use crate::network::dissect::dissection::{DecodeError, LayerKind};
use crate::network::dissect::ipv4::write_protocol;
use log::debug;
use std::fmt;
use std::net::Ipv6Addr;

/// The fixed IPv6 header is always 40 bytes.
pub const IPV6_LEN: usize = 40;

const HOP_BY_HOP: u8 = 0;
const ROUTING: u8 = 43;
const FRAGMENT: u8 = 44;
const DESTINATION_OPTIONS: u8 = 60;
const FRAGMENT_HEADER_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv6Header {
    pub traffic_class: u8,
    pub flow_label: u32,
    pub payload_length: u16,
    pub next_header: u8,
    pub hop_limit: u8,
    pub src: Ipv6Addr,
    pub dst: Ipv6Addr,
}

impl Ipv6Header {
    /// Parses the fixed header and returns it with its payload.
    ///
    /// A payload length of zero (jumbogram) takes everything captured.
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8]), DecodeError> {
        if data.len() < IPV6_LEN {
            return Err(DecodeError::truncated(
                LayerKind::Ipv6,
                IPV6_LEN,
                data.len(),
            ));
        }

        let version = data[0] >> 4;
        if version != 6 {
            return Err(DecodeError::invalid(
                LayerKind::Ipv6,
                format!("version {} is not 6", version),
            ));
        }

        let first_word = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
        let payload_length = u16::from_be_bytes([data[4], data[5]]);

        let src: [u8; 16] = data[8..24].try_into().unwrap_or_default();
        let dst: [u8; 16] = data[24..40].try_into().unwrap_or_default();

        let header = Ipv6Header {
            traffic_class: ((first_word >> 20) & 0xFF) as u8,
            flow_label: first_word & 0x000F_FFFF,
            payload_length,
            next_header: data[6],
            hop_limit: data[7],
            src: Ipv6Addr::from(src),
            dst: Ipv6Addr::from(dst),
        };

        let end = if payload_length == 0 {
            data.len()
        } else {
            (IPV6_LEN + payload_length as usize).min(data.len())
        };

        Ok((header, &data[IPV6_LEN..end]))
    }

    /// Walks extension headers to the first upper-layer protocol.
    ///
    /// Returns `None` for non-first fragments and for extension headers
    /// that run past the captured bytes.
    pub fn upper_layer<'a>(&self, payload: &'a [u8]) -> Option<(u8, &'a [u8])> {
        let mut next = self.next_header;
        let mut rest = payload;

        loop {
            let header_len = match next {
                HOP_BY_HOP | ROUTING | DESTINATION_OPTIONS => {
                    let len_field = *rest.get(1)?;
                    (len_field as usize + 1) * 8
                }
                FRAGMENT => {
                    let offset_field = u16::from_be_bytes([*rest.get(2)?, *rest.get(3)?]);
                    if offset_field >> 3 != 0 {
                        return None;
                    }
                    FRAGMENT_HEADER_LEN
                }
                protocol => return Some((protocol, rest)),
            };

            if rest.len() < header_len {
                debug!(
                    "IPv6 extension header {} runs past captured data ({} > {})",
                    next,
                    header_len,
                    rest.len()
                );
                return None;
            }

            next = rest[0];
            rest = &rest[header_len..];
        }
    }
}

impl fmt::Display for Ipv6Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IPv6 {{Version=6 TrafficClass={} FlowLabel={} Length={} NextHeader=",
            self.traffic_class, self.flow_label, self.payload_length
        )?;
        write_protocol(f, self.next_header)?;
        write!(
            f,
            " HopLimit={} SrcIP={} DstIP={}}}",
            self.hop_limit, self.src, self.dst
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::dissect::test_frames::{ipv6_header, udp_datagram};

    #[test]
    fn test_parse_header_fields() {
        let mut packet = ipv6_header(17, 3);
        packet[1] = 0xA1;
        packet[2] = 0x23;
        packet[3] = 0x45;
        packet.extend_from_slice(&[1, 2, 3]);
        let (header, payload) = Ipv6Header::parse(&packet).unwrap();

        assert_eq!(header.traffic_class, 0x0A);
        assert_eq!(header.flow_label, 0x12345);
        assert_eq!(header.payload_length, 3);
        assert_eq!(header.next_header, 17);
        assert_eq!(header.hop_limit, 64);
        assert_eq!(header.src, "fe80::1".parse::<Ipv6Addr>().unwrap());
        assert_eq!(payload, &[1, 2, 3]);
    }

    #[test]
    fn test_truncated() {
        let packet = ipv6_header(6, 0);
        let err = Ipv6Header::parse(&packet[..39]).unwrap_err();
        assert_eq!(err, DecodeError::truncated(LayerKind::Ipv6, 40, 39));
    }

    #[test]
    fn test_wrong_version() {
        let mut packet = ipv6_header(6, 0);
        packet[0] = 0x45;
        assert!(Ipv6Header::parse(&packet).is_err());
    }

    #[test]
    fn test_upper_layer_skips_extension_headers() {
        let datagram = udp_datagram(b"dns");
        let mut extensions = vec![DESTINATION_OPTIONS, 0, 1, 4, 0, 0, 0, 0];
        extensions.extend_from_slice(&[17, 0, 0, 0, 0, 0, 0, 1]);
        extensions.extend_from_slice(&datagram);

        let mut packet = ipv6_header(HOP_BY_HOP, extensions.len());
        packet.extend_from_slice(&extensions);
        let (header, payload) = Ipv6Header::parse(&packet).unwrap();

        let (protocol, segment) = header.upper_layer(payload).unwrap();
        assert_eq!(protocol, 17);
        assert_eq!(segment, &datagram[..]);
    }

    #[test]
    fn test_upper_layer_through_first_fragment() {
        let datagram = udp_datagram(b"a");
        let mut body = vec![17, 0, 0x00, 0x01, 0, 0, 0, 9];
        body.extend_from_slice(&datagram);

        let mut packet = ipv6_header(FRAGMENT, body.len());
        packet.extend_from_slice(&body);
        let (header, payload) = Ipv6Header::parse(&packet).unwrap();
        assert_eq!(header.upper_layer(payload), Some((17, &datagram[..])));
    }

    #[test]
    fn test_non_first_fragment_has_no_upper_layer() {
        let body = vec![17, 0, 0x00, 0x08, 0, 0, 0, 9, 1, 2, 3, 4];
        let mut packet = ipv6_header(FRAGMENT, body.len());
        packet.extend_from_slice(&body);
        let (header, payload) = Ipv6Header::parse(&packet).unwrap();
        assert_eq!(header.upper_layer(payload), None);
    }

    #[test]
    fn test_truncated_extension_header() {
        let body = vec![6, 2, 0, 0];
        let mut packet = ipv6_header(ROUTING, body.len());
        packet.extend_from_slice(&body);
        let (header, payload) = Ipv6Header::parse(&packet).unwrap();
        assert_eq!(header.upper_layer(payload), None);
    }
}
