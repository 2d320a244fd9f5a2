//! Sequence-number-based reassembly of the HTTP response flow.

use tracing::debug;

use crate::error::{Result, StreamError};
use crate::protocol::SegmentDescriptor;

/// Status line that identifies the response flow.
const STATUS_LINE: &[u8] = b"HTTP/1.1 200 OK";

/// Select the response flow and rebuild its contiguous byte stream.
///
/// The first segment (capture order) whose payload contains the HTTP
/// success status line fixes the target flow. Segments of that flow are
/// stable-sorted by sequence number and copied at `seq - base` into a
/// zero-filled buffer: on overlap the later-applied segment wins, and
/// bytes never covered by any segment read as zero. 32-bit sequence
/// wraparound is not handled; captures are assumed short-lived.
pub fn reassemble_response(segments: &[SegmentDescriptor]) -> Result<Vec<u8>> {
    if segments.is_empty() {
        return Err(StreamError::NoTcpPayload.into());
    }

    let response = segments
        .iter()
        .find(|s| contains(&s.payload, STATUS_LINE))
        .ok_or(StreamError::NoHttpResponse)?;
    let flow = response.flow;
    debug!(
        src = %flow.src_ip, sport = flow.src_port,
        dst = %flow.dst_ip, dport = flow.dst_port,
        "located response flow"
    );

    let mut flow_segments: Vec<&SegmentDescriptor> =
        segments.iter().filter(|s| s.flow == flow).collect();
    if flow_segments.is_empty() {
        return Err(StreamError::NoResponseSegments.into());
    }

    // Stable sort: on equal sequence numbers the later capture-order
    // segment is applied last and its bytes win.
    flow_segments.sort_by_key(|s| s.seq);

    let base = flow_segments[0].seq;
    let mut stream: Vec<u8> = Vec::new();
    for seg in &flow_segments {
        // Cannot go below base after the sort, but guard anyway.
        let Some(start) = seg.seq.checked_sub(base) else {
            continue;
        };
        let start = start as usize;
        let end = start + seg.payload.len();
        if end > stream.len() {
            stream.resize(end, 0);
        }
        stream[start..end].copy_from_slice(&seg.payload);
    }

    debug!(
        segments = flow_segments.len(),
        bytes = stream.len(),
        "reassembled response stream"
    );
    Ok(stream)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
