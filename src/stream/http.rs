//! HTTP response header/body splitting.

use crate::error::{HttpError, Result};

/// Header/body boundary.
const SEPARATOR: &[u8] = b"\r\n\r\n";

/// Content-Encoding declaration the scanner requires, lowercased.
const BROTLI_DECLARATION: &[u8] = b"content-encoding: br";

/// An HTTP response split at the first header/body boundary.
///
/// The header block includes the separator; the body is passed on
/// unmodified.
#[derive(Debug)]
pub struct HttpMessage<'a> {
    pub header: &'a [u8],
    pub body: &'a [u8],
}

/// Split the reassembled stream at the first `\r\n\r\n`.
pub fn split_message(stream: &[u8]) -> Result<HttpMessage<'_>> {
    let idx = stream
        .windows(SEPARATOR.len())
        .position(|w| w == SEPARATOR)
        .ok_or(HttpError::NoHeaderSeparator)?;
    let boundary = idx + SEPARATOR.len();
    Ok(HttpMessage {
        header: &stream[..boundary],
        body: &stream[boundary..],
    })
}

/// Require a Brotli content-encoding declaration in the header block.
///
/// The scanner assumes Brotli unconditionally, so a response without
/// the declaration is rejected up front. Matching is case-insensitive
/// over the raw header bytes.
pub fn ensure_brotli_encoding(header: &[u8]) -> Result<()> {
    let lowered = header.to_ascii_lowercase();
    let declared = lowered
        .windows(BROTLI_DECLARATION.len())
        .any(|w| w == BROTLI_DECLARATION);
    if declared {
        Ok(())
    } else {
        Err(HttpError::UnexpectedEncoding.into())
    }
}
