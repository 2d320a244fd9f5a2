//! Error types for capsift.

use thiserror::Error;

/// Main error type for capsift operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error reading or parsing the capture container
    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),

    /// Error locating or reassembling the response stream
    #[error("stream error: {0}")]
    Stream(#[from] StreamError),

    /// Error splitting or validating the HTTP response
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// All decompression strategies exhausted without a match
    #[error("token not found after exhausting all decompression strategies")]
    TokenNotFound,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to pcap container reading.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Container shorter than the 24-byte global header
    #[error("malformed capture: {reason}")]
    Malformed { reason: String },

    /// Unrecognized magic bytes
    #[error("unsupported capture format: magic {magic:#010x}")]
    UnsupportedFormat { magic: u32 },
}

/// Errors related to flow selection and reassembly.
#[derive(Error, Debug)]
pub enum StreamError {
    /// No frame decoded to a non-empty TCP payload
    #[error("no frame carried a TCP payload")]
    NoTcpPayload,

    /// No segment contains an HTTP success status line
    #[error("no segment contains an HTTP success status line")]
    NoHttpResponse,

    /// Defensive: the response flow filter matched nothing
    #[error("response flow matched no segments")]
    NoResponseSegments,
}

/// Errors related to the reassembled HTTP response.
#[derive(Error, Debug)]
pub enum HttpError {
    /// Reassembled stream lacks the header/body boundary
    #[error("reassembled stream has no header/body separator")]
    NoHeaderSeparator,

    /// Body is not declared as Brotli-encoded
    #[error("response does not declare Content-Encoding: br")]
    UnexpectedEncoding,
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
