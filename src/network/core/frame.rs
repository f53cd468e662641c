use crate::network::core::zone::ZoneTag;
use crate::network::transport::InboundMessage;
use bytes::Bytes;
use std::time::Instant;

/// A captured network frame together with the zone it arrived from.
///
/// The bytes are never modified; whatever is published is exactly what
/// was received.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw frame bytes as delivered by the transport
    pub payload: Bytes,

    /// Zone the frame arrived from
    pub zone: ZoneTag,

    /// Timestamp when the frame was received
    pub arrival_time: Instant,
}

impl Frame {
    /// Creates a frame, recording the current time as arrival time.
    pub fn new(payload: impl Into<Bytes>, zone: ZoneTag) -> Self {
        Frame {
            payload: payload.into(),
            zone,
            arrival_time: Instant::now(),
        }
    }

    /// Returns the size of the frame in bytes
    pub fn size(&self) -> usize {
        self.payload.len()
    }

    /// Returns the time elapsed since the frame was received
    pub fn age(&self) -> std::time::Duration {
        self.arrival_time.elapsed()
    }
}

impl From<InboundMessage> for Frame {
    /// Tags the message by the channel it arrived on.
    fn from(message: InboundMessage) -> Self {
        let zone = ZoneTag::from_channel(&message.channel);
        Frame::new(message.payload, zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let frame = Frame::new(vec![1, 2, 3, 4], ZoneTag::Secure);

        assert_eq!(frame.payload[..], [1, 2, 3, 4]);
        assert_eq!(frame.size(), 4);
        assert!(frame.age().as_secs() < 1);
    }

    #[test]
    fn test_frame_from_inbound_message() {
        let message = InboundMessage {
            channel: "inpktinsec".to_string(),
            payload: Bytes::from_static(&[0xde, 0xad]),
        };
        let frame = Frame::from(message);

        assert_eq!(frame.zone, ZoneTag::Insecure);
        assert_eq!(frame.payload, Bytes::from_static(&[0xde, 0xad]));
    }
}
