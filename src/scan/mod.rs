//! Brotli body scanning.
//!
//! The capture may have truncated the response, so decompressing the
//! body as one complete stream can fail or blow past any sane output
//! bound. The scanner therefore tries a cheap bounded whole-buffer
//! decompression first, then sweeps candidate start offsets across the
//! body (Brotli is self-framing, so a fresh stream may begin at an
//! irregular internal offset), and finally falls back to budgeted
//! streaming decompression for the offsets that were only rejected for
//! exceeding the output ceiling.

use std::io::Read;

use brotli::Decompressor;
use regex::bytes::Regex;
use tracing::{debug, trace};

/// Default sweep stride between candidate start offsets.
///
/// Tuned to the block granularity of the producer this tool was built
/// against; it is a heuristic, not a protocol constant, and stays
/// tunable through the CLI.
pub const DEFAULT_SWEEP_STRIDE: usize = 105;

/// Output ceiling for one bounded direct decompression attempt.
const MAX_DIRECT_OUT: usize = 1024 * 1024;

/// Cumulative output budget for one streaming candidate.
const MAX_STREAM_SCAN: usize = 8 * 1024 * 1024;

/// Sliding tail kept while streaming, and the portion retained when it
/// overflows. The tail must stay longer than the longest possible token
/// so a match straddling a chunk boundary survives the trim.
const TAIL_LIMIT: usize = 4096;
const TAIL_KEEP: usize = 2048;

/// Read granularity for chunked decompression.
const CHUNK_SIZE: usize = 16 * 1024;

/// Internal buffer size handed to the Brotli decoder.
const DECODER_BUF: usize = 4096;

/// Matcher for the bracketed token grammar:
/// `<prefix>{` + 1..=200 non-brace, non-newline bytes + `}`.
#[derive(Debug, Clone)]
pub struct TokenPattern {
    regex: Regex,
}

impl TokenPattern {
    pub fn new(prefix: &str) -> Self {
        let pattern = format!(r"{}\{{[^}}\r\n]{{1,200}}\}}", regex::escape(prefix));
        let regex = Regex::new(&pattern).expect("escaped prefix yields a valid pattern");
        Self { regex }
    }

    /// Find the first token in the haystack.
    fn find(&self, haystack: &[u8]) -> Option<String> {
        self.regex
            .find(haystack)
            .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
    }
}

/// Outcome of one bounded decompression attempt.
enum Bounded {
    /// Full plaintext, within the ceiling.
    Complete(Vec<u8>),
    /// Output exceeded the ceiling; streaming may still find the token.
    TooLarge,
    /// Decoder error; this offset is not a stream start.
    Invalid,
}

/// Decompress `input` completely, capping the output size.
fn decompress_bounded(input: &[u8], max_out: usize) -> Bounded {
    let mut decoder = Decompressor::new(input, DECODER_BUF);
    let mut out = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        match decoder.read(&mut chunk) {
            Ok(0) => return Bounded::Complete(out),
            Ok(n) => {
                if out.len() + n > max_out {
                    return Bounded::TooLarge;
                }
                out.extend_from_slice(&chunk[..n]);
            }
            Err(_) => return Bounded::Invalid,
        }
    }
}

/// Scan a chunked plaintext source against a byte budget.
///
/// Each read is appended to a sliding tail that is re-matched after
/// every chunk, so a token straddling a read boundary is still found.
fn scan_chunks<R: Read>(mut reader: R, pattern: &TokenPattern, budget: usize) -> Option<String> {
    let mut tail: Vec<u8> = Vec::new();
    let mut seen = 0usize;
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => return None, // stream ended without a match
            Ok(n) => n,
            Err(_) => return None, // corrupt past this point
        };
        seen += n;
        tail.extend_from_slice(&chunk[..n]);

        if let Some(token) = pattern.find(&tail) {
            return Some(token);
        }

        if tail.len() > TAIL_LIMIT {
            let cut = tail.len() - TAIL_KEEP;
            tail.drain(..cut);
        }

        if seen > budget {
            return None; // budget exhausted, give up on this offset
        }
    }
}

/// Chunked decompression of one candidate, run to a byte budget.
///
/// Returning early on a match drops the decoder and stops any further
/// decompression work for this candidate.
async fn stream_scan(input: Vec<u8>, pattern: TokenPattern, budget: usize) -> Option<String> {
    let task = tokio::task::spawn_blocking(move || {
        scan_chunks(Decompressor::new(input.as_slice(), DECODER_BUF), &pattern, budget)
    });
    task.await.unwrap_or(None)
}

/// Token search over a Brotli-compressed HTTP body.
#[derive(Debug, Clone)]
pub struct TokenScanner {
    pattern: TokenPattern,
    stride: usize,
}

impl TokenScanner {
    /// Create a scanner for the given token prefix and sweep stride.
    pub fn new(prefix: &str, stride: usize) -> Self {
        Self {
            pattern: TokenPattern::new(prefix),
            stride: stride.max(1),
        }
    }

    /// Search the body for the token.
    ///
    /// Per-offset decompression failures are expected and silently
    /// narrow the search; only a fully exhausted sweep yields `None`.
    pub async fn scan(&self, body: &[u8]) -> Option<String> {
        // Cheap path: the whole body is one intact, small stream.
        if let Bounded::Complete(plain) = decompress_bounded(body, MAX_DIRECT_OUT) {
            if let Some(token) = self.pattern.find(&plain) {
                debug!("token found by direct decompression");
                return Some(token);
            }
        }

        // Offset sweep: bounded attempts at each stride step. Attempts
        // that only failed on the output ceiling are kept for streaming.
        let mut candidates = Vec::new();
        let mut offset = 0;
        while offset < body.len() {
            match decompress_bounded(&body[offset..], MAX_DIRECT_OUT) {
                Bounded::Complete(plain) => {
                    if let Some(token) = self.pattern.find(&plain) {
                        debug!(offset, "token found during offset sweep");
                        return Some(token);
                    }
                }
                Bounded::TooLarge => {
                    trace!(offset, "sweep candidate exceeds ceiling");
                    candidates.push(offset);
                }
                Bounded::Invalid => {}
            }
            offset += self.stride;
        }
        debug!(
            candidates = candidates.len(),
            "sweep complete, starting streaming fallback"
        );

        // Streaming fallback, one candidate at a time in ascending order.
        for offset in candidates {
            let token = stream_scan(
                body[offset..].to_vec(),
                self.pattern.clone(),
                MAX_STREAM_SCAN,
            )
            .await;
            if let Some(token) = token {
                debug!(offset, "token found by streaming decompression");
                return Some(token);
            }
        }

        None
    }
}
