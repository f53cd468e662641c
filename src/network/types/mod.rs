//! Small value types shared by the network modules.

pub mod mac_addr;

pub use mac_addr::MacAddr;
