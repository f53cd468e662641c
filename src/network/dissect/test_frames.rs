//! Hand-built frames for dissector and pipeline tests.

pub fn ethernet(ether_type: u16, payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![0x02, 0x00, 0x00, 0x00, 0x00, 0x02];
    frame.extend_from_slice(&[0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
    frame.extend_from_slice(&ether_type.to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}

pub fn ipv4_header(protocol: u8, payload_len: usize) -> Vec<u8> {
    let total_len = (20 + payload_len) as u16;
    let mut header = vec![0x45, 0x00];
    header.extend_from_slice(&total_len.to_be_bytes());
    header.extend_from_slice(&[0x1c, 0x46, 0x40, 0x00, 0x40, protocol, 0x00, 0x00]);
    header.extend_from_slice(&[10, 0, 0, 1]);
    header.extend_from_slice(&[10, 0, 0, 2]);
    header
}

pub fn ipv6_header(next_header: u8, payload_len: usize) -> Vec<u8> {
    let mut header = vec![0x60, 0x00, 0x00, 0x00];
    header.extend_from_slice(&(payload_len as u16).to_be_bytes());
    header.extend_from_slice(&[next_header, 64]);
    header.extend_from_slice(&[0xfe, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x01]);
    header.extend_from_slice(&[0xfe, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x02]);
    header
}

pub fn tcp_segment(payload: &[u8]) -> Vec<u8> {
    let mut segment = Vec::with_capacity(20 + payload.len());
    segment.extend_from_slice(&40000u16.to_be_bytes());
    segment.extend_from_slice(&80u16.to_be_bytes());
    segment.extend_from_slice(&1u32.to_be_bytes());
    segment.extend_from_slice(&0u32.to_be_bytes());
    segment.extend_from_slice(&[0x50, 0x18]);
    segment.extend_from_slice(&64240u16.to_be_bytes());
    segment.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
    segment.extend_from_slice(payload);
    segment
}

pub fn udp_datagram(payload: &[u8]) -> Vec<u8> {
    let mut datagram = Vec::with_capacity(8 + payload.len());
    datagram.extend_from_slice(&53000u16.to_be_bytes());
    datagram.extend_from_slice(&53u16.to_be_bytes());
    datagram.extend_from_slice(&((8 + payload.len()) as u16).to_be_bytes());
    datagram.extend_from_slice(&[0x00, 0x00]);
    datagram.extend_from_slice(payload);
    datagram
}

fn ipv4_frame(protocol: u8, segment: Vec<u8>) -> Vec<u8> {
    let mut packet = ipv4_header(protocol, segment.len());
    packet.extend_from_slice(&segment);
    ethernet(0x0800, &packet)
}

fn ipv6_frame(next_header: u8, segment: Vec<u8>) -> Vec<u8> {
    let mut packet = ipv6_header(next_header, segment.len());
    packet.extend_from_slice(&segment);
    ethernet(0x86dd, &packet)
}

pub fn ipv4_tcp_frame(payload: &[u8]) -> Vec<u8> {
    ipv4_frame(6, tcp_segment(payload))
}

pub fn ipv4_udp_frame(payload: &[u8]) -> Vec<u8> {
    ipv4_frame(17, udp_datagram(payload))
}

pub fn ipv6_tcp_frame(payload: &[u8]) -> Vec<u8> {
    ipv6_frame(6, tcp_segment(payload))
}

pub fn ipv6_udp_frame(payload: &[u8]) -> Vec<u8> {
    ipv6_frame(17, udp_datagram(payload))
}
