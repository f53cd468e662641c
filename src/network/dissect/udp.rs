//! UDP header (RFC 768).
//!
//!   0                   1                   2                   3
//!   0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |          Source Port          |       Destination Port        |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!  |          PDU Length           |           Checksum            |
//!  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+

use crate::network::dissect::dissection::{DecodeError, LayerKind};
use crate::utils::{hex_preview, PREVIEW_LEN};
use std::fmt;

pub const IPPROTO_UDP: u8 = 17;
pub const UDP_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    /// Header plus payload, as declared
    pub length: u16,
    pub checksum: u16,
    pub payload_preview: Vec<u8>,
    pub payload_len: usize,
}

impl UdpHeader {
    pub fn parse(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < UDP_LEN {
            return Err(DecodeError::truncated(LayerKind::Udp, UDP_LEN, data.len()));
        }

        let length = u16::from_be_bytes([data[4], data[5]]);
        let payload = &data[UDP_LEN..];

        Ok(UdpHeader {
            src_port: u16::from_be_bytes([data[0], data[1]]),
            dst_port: u16::from_be_bytes([data[2], data[3]]),
            length,
            checksum: u16::from_be_bytes([data[6], data[7]]),
            payload_preview: payload.iter().take(PREVIEW_LEN).copied().collect(),
            payload_len: payload.len(),
        })
    }
}

impl fmt::Display for UdpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UDP {{SrcPort={} DstPort={} Length={} Checksum={} Payload={}}}",
            self.src_port,
            self.dst_port,
            self.length,
            self.checksum,
            hex_preview(&self.payload_preview, self.payload_len)
        )
    }
}
