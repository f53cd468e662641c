//! Layer dissection for captured frames.
//!
//! Frames are decoded as Ethernet and then searched for IPv4 or IPv6 and
//! TCP or UDP. Dissection is inspection only and never touches the bytes.

pub mod dissection;
pub mod ethernet;
pub mod ipv4;
pub mod ipv6;
pub mod tcp;
pub mod udp;

#[cfg(test)]
pub(crate) mod test_frames;

// Re-export commonly used types
pub use dissection::{dissect, DecodeError, Dissection, LayerKind};
