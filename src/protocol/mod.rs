//! Per-frame protocol decoding.
//!
//! Decodes one captured frame's Ethernet/IPv4/TCP headers into a typed
//! segment descriptor. Frames outside that shape are irrelevant and
//! yield `None`.

mod segment;

pub use segment::{decode_segment, FlowKey, SegmentDescriptor};
