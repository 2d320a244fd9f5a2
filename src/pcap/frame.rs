//! Raw frame representation.

/// One captured link-layer frame, in capture order.
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Frame number (1-indexed).
    pub frame_number: u64,

    /// Raw frame bytes, record header stripped.
    pub data: Vec<u8>,
}

impl RawFrame {
    /// Create a new raw frame.
    pub fn new(frame_number: u64, data: Vec<u8>) -> Self {
        Self { frame_number, data }
    }
}
