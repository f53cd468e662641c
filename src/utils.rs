//! Utility functions for frame diagnostics.
//!
//! This module contains shared helpers used when rendering layer dumps.

use std::fmt::Write;

/// Number of payload bytes kept for layer dumps.
pub const PREVIEW_LEN: usize = 16;

/// Renders a payload preview as `[N bytes] aa bb cc ...`.
///
/// `preview` holds the leading bytes and `total_len` the full payload size;
/// an ellipsis marks a preview shorter than the payload.
///
/// # Example
///
/// ```
/// use zone_relay::utils::hex_preview;
///
/// assert_eq!(hex_preview(&[0xde, 0xad], 2), "[2 bytes] de ad");
/// assert_eq!(hex_preview(&[0x01], 40), "[40 bytes] 01 ...");
/// ```
pub fn hex_preview(preview: &[u8], total_len: usize) -> String {
    let mut out = format!("[{} bytes]", total_len);

    for byte in preview {
        let _ = write!(out, " {:02x}", byte);
    }

    if preview.len() < total_len {
        out.push_str(" ...");
    }

    out
}
