//! capsift - recover a bracketed secret token from a Brotli-compressed
//! HTTP response recorded in a pcap capture.
//!
//! The pipeline runs strictly forward: capture records, per-frame
//! Ethernet/IPv4/TCP decoding, sequence-number reassembly of the one
//! response flow, HTTP header/body split, and a Brotli scan with a
//! bounded direct attempt, an offset sweep, and a budgeted streaming
//! fallback.
//!
//! # Example
//!
//! ```no_run
//! use capsift::scan::TokenScanner;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let capture = std::fs::read("capture.pcap")?;
//!     let scanner = TokenScanner::new("PREFIX", capsift::scan::DEFAULT_SWEEP_STRIDE);
//!     let token = capsift::recover_token(&capture, &scanner).await?;
//!     println!("{token}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod pcap;
pub mod protocol;
pub mod scan;
pub mod stream;

pub use error::{Error, Result};

use tracing::{debug, trace};

/// Run the full pipeline over raw capture bytes.
pub async fn recover_token(capture: &[u8], scanner: &scan::TokenScanner) -> Result<String> {
    let frames: Vec<pcap::RawFrame> = pcap::CaptureReader::new(capture)?.collect();
    debug!(frames = frames.len(), "parsed capture records");

    let segments: Vec<protocol::SegmentDescriptor> = frames
        .iter()
        .filter_map(|frame| {
            let seg = protocol::decode_segment(frame)?;
            trace!(
                frame = frame.frame_number,
                seq = seg.seq,
                bytes = seg.payload.len(),
                "decoded TCP segment"
            );
            Some(seg)
        })
        .collect();
    debug!(segments = segments.len(), "decoded TCP segments");

    let reassembled = stream::reassemble_response(&segments)?;
    let message = stream::split_message(&reassembled)?;
    stream::ensure_brotli_encoding(message.header)?;
    debug!(body_bytes = message.body.len(), "scanning response body");

    scanner
        .scan(message.body)
        .await
        .ok_or(Error::TokenNotFound)
}
