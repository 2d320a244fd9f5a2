//! Legacy pcap container reader.

use pcap_parser::{parse_pcap_frame, parse_pcap_frame_be, parse_pcap_header};

use super::RawFrame;
use crate::error::CaptureError;

/// Length of the pcap global header.
const GLOBAL_HEADER_LEN: usize = 24;

/// Reader over an in-memory legacy pcap buffer.
///
/// Yields frames in capture order. Iteration stops silently at the
/// first record whose header is partial or whose declared captured
/// length overruns the remaining buffer; a truncated capture is a
/// tolerated condition, not an error.
#[derive(Debug)]
pub struct CaptureReader<'a> {
    rem: &'a [u8],
    bigendian: bool,
    frame_number: u64,
}

impl<'a> CaptureReader<'a> {
    /// Parse the global header and position the reader at the first record.
    ///
    /// Accepts the microsecond and nanosecond magic constants in either
    /// byte order; timestamp precision is irrelevant here.
    pub fn new(capture: &'a [u8]) -> Result<Self, CaptureError> {
        if capture.len() < GLOBAL_HEADER_LEN {
            return Err(CaptureError::Malformed {
                reason: format!(
                    "container is {} bytes, need at least {GLOBAL_HEADER_LEN}",
                    capture.len()
                ),
            });
        }

        match parse_pcap_header(capture) {
            Ok((rem, header)) => Ok(Self {
                rem,
                bigendian: header.is_bigendian(),
                frame_number: 0,
            }),
            Err(_) => {
                let magic = u32::from_le_bytes([capture[0], capture[1], capture[2], capture[3]]);
                Err(CaptureError::UnsupportedFormat { magic })
            }
        }
    }
}

impl Iterator for CaptureReader<'_> {
    type Item = RawFrame;

    fn next(&mut self) -> Option<RawFrame> {
        let parsed = if self.bigendian {
            parse_pcap_frame_be(self.rem)
        } else {
            parse_pcap_frame(self.rem)
        };

        match parsed {
            Ok((rem, block)) => {
                self.rem = rem;
                self.frame_number += 1;
                Some(RawFrame::new(self.frame_number, block.data.to_vec()))
            }
            // Partial trailing record: tolerated end of capture.
            Err(_) => {
                self.rem = &[];
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a legacy pcap buffer around the given frame bodies.
    fn build_pcap(bigendian: bool, nanosecond: bool, frames: &[&[u8]]) -> Vec<u8> {
        let magic: u32 = if nanosecond { 0xa1b2_3c4d } else { 0xa1b2_c3d4 };
        let word = |v: u32| {
            if bigendian {
                v.to_be_bytes()
            } else {
                v.to_le_bytes()
            }
        };
        let half = |v: u16| {
            if bigendian {
                v.to_be_bytes()
            } else {
                v.to_le_bytes()
            }
        };

        let mut data = Vec::new();
        data.extend_from_slice(&word(magic));
        data.extend_from_slice(&half(2)); // version major
        data.extend_from_slice(&half(4)); // version minor
        data.extend_from_slice(&word(0)); // thiszone
        data.extend_from_slice(&word(0)); // sigfigs
        data.extend_from_slice(&word(65535)); // snaplen
        data.extend_from_slice(&word(1)); // network: Ethernet

        for frame in frames {
            data.extend_from_slice(&word(1_000_000_000)); // ts_sec
            data.extend_from_slice(&word(0)); // ts_usec
            data.extend_from_slice(&word(frame.len() as u32)); // caplen
            data.extend_from_slice(&word(frame.len() as u32)); // origlen
            data.extend_from_slice(frame);
        }

        data
    }

    fn frame_bodies(capture: &[u8]) -> Vec<Vec<u8>> {
        CaptureReader::new(capture)
            .unwrap()
            .map(|f| f.data)
            .collect()
    }

    #[test]
    fn test_little_endian_capture() {
        let capture = build_pcap(false, false, &[b"abc", b"defgh"]);
        let frames = frame_bodies(&capture);
        assert_eq!(frames, vec![b"abc".to_vec(), b"defgh".to_vec()]);
    }

    #[test]
    fn test_byte_order_detection() {
        // The same frames parse identically from either byte order and
        // either magic variant.
        let le = frame_bodies(&build_pcap(false, false, &[b"payload"]));
        let be = frame_bodies(&build_pcap(true, false, &[b"payload"]));
        let le_ns = frame_bodies(&build_pcap(false, true, &[b"payload"]));
        let be_ns = frame_bodies(&build_pcap(true, true, &[b"payload"]));
        assert_eq!(le, be);
        assert_eq!(le, le_ns);
        assert_eq!(le, be_ns);
    }

    #[test]
    fn test_truncated_record_tolerated() {
        let intact = build_pcap(false, false, &[b"one", b"two"]);

        // Append a record header declaring 100 bytes but provide only 4.
        let mut truncated = intact.clone();
        truncated.extend_from_slice(&0u32.to_le_bytes());
        truncated.extend_from_slice(&0u32.to_le_bytes());
        truncated.extend_from_slice(&100u32.to_le_bytes());
        truncated.extend_from_slice(&100u32.to_le_bytes());
        truncated.extend_from_slice(&[0xaa; 4]);

        assert_eq!(frame_bodies(&intact), frame_bodies(&truncated));
    }

    #[test]
    fn test_partial_record_header_tolerated() {
        let mut capture = build_pcap(false, false, &[b"one"]);
        capture.extend_from_slice(&[0x00; 7]); // 7 of 16 header bytes
        assert_eq!(frame_bodies(&capture), vec![b"one".to_vec()]);
    }

    #[test]
    fn test_short_container_rejected() {
        let err = CaptureReader::new(&[0u8; 10]).unwrap_err();
        assert!(matches!(err, CaptureError::Malformed { .. }));
    }

    #[test]
    fn test_unknown_magic_rejected() {
        let mut capture = build_pcap(false, false, &[]);
        capture[..4].copy_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let err = CaptureReader::new(&capture).unwrap_err();
        assert!(matches!(
            err,
            CaptureError::UnsupportedFormat { magic: 0xefbe_adde }
        ));
    }

    #[test]
    fn test_frame_numbers_sequential() {
        let capture = build_pcap(false, false, &[b"a", b"b", b"c"]);
        let numbers: Vec<u64> = CaptureReader::new(&capture)
            .unwrap()
            .map(|f| f.frame_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_capture_yields_no_frames() {
        let capture = build_pcap(false, false, &[]);
        assert!(frame_bodies(&capture).is_empty());
    }
}
