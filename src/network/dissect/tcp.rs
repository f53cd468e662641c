//! TCP header (RFC 9293).
//!
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          Source Port          |       Destination Port        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                        Sequence Number                        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    Acknowledgment Number                      |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |  Data |     |N|C|E|U|A|P|R|S|F|                               |
//! | Offset| Rsv |S|W|C|R|C|S|S|Y|I|            Window             |
//! |       |     | |R|E|G|K|H|T|N|N|                               |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           Checksum            |         Urgent Pointer        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+

use crate::network::dissect::dissection::{DecodeError, LayerKind};
use crate::utils::{hex_preview, PREVIEW_LEN};
use std::fmt;

pub const IPPROTO_TCP: u8 = 6;
pub const TCP_MIN_LEN: usize = 20;

const FLAG_NAMES: [(u16, &str); 9] = [
    (0x001, "FIN"),
    (0x002, "SYN"),
    (0x004, "RST"),
    (0x008, "PSH"),
    (0x010, "ACK"),
    (0x020, "URG"),
    (0x040, "ECE"),
    (0x080, "CWR"),
    (0x100, "NS"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    pub seq: u32,
    pub ack: u32,
    /// Header length in 32-bit words
    pub data_offset: u8,
    /// NS bit plus the eight classic flag bits
    pub flags: u16,
    pub window: u16,
    pub checksum: u16,
    pub urgent: u16,
    /// Leading bytes of the segment payload
    pub payload_preview: Vec<u8>,
    pub payload_len: usize,
}

impl TcpHeader {
    pub fn parse(data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() < TCP_MIN_LEN {
            return Err(DecodeError::truncated(
                LayerKind::Tcp,
                TCP_MIN_LEN,
                data.len(),
            ));
        }

        let data_offset = data[12] >> 4;
        if data_offset < 5 {
            return Err(DecodeError::invalid(
                LayerKind::Tcp,
                format!("data offset {} below minimum of 5", data_offset),
            ));
        }

        let header_len = data_offset as usize * 4;
        if data.len() < header_len {
            return Err(DecodeError::truncated(
                LayerKind::Tcp,
                header_len,
                data.len(),
            ));
        }

        let payload = &data[header_len..];

        Ok(TcpHeader {
            src_port: u16::from_be_bytes([data[0], data[1]]),
            dst_port: u16::from_be_bytes([data[2], data[3]]),
            seq: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
            ack: u32::from_be_bytes([data[8], data[9], data[10], data[11]]),
            data_offset,
            flags: u16::from_be_bytes([data[12] & 0x01, data[13]]),
            window: u16::from_be_bytes([data[14], data[15]]),
            checksum: u16::from_be_bytes([data[16], data[17]]),
            urgent: u16::from_be_bytes([data[18], data[19]]),
            payload_preview: payload.iter().take(PREVIEW_LEN).copied().collect(),
            payload_len: payload.len(),
        })
    }

    fn flag_names(&self) -> Vec<&'static str> {
        FLAG_NAMES
            .iter()
            .filter(|(bit, _)| self.flags & bit != 0)
            .map(|(_, name)| *name)
            .collect()
    }
}

impl fmt::Display for TcpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TCP {{SrcPort={} DstPort={} Seq={} Ack={} DataOffset={} Flags={} Window={} Checksum={} Urgent={} Payload={}}}",
            self.src_port,
            self.dst_port,
            self.seq,
            self.ack,
            self.data_offset,
            self.flag_names().join(","),
            self.window,
            self.checksum,
            self.urgent,
            hex_preview(&self.payload_preview, self.payload_len)
        )
    }
}
