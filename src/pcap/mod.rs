//! Capture container reading.
//!
//! Parses a legacy pcap file into an ordered sequence of raw
//! link-layer frames.

mod frame;
mod reader;

pub use frame::RawFrame;
pub use reader::CaptureReader;
