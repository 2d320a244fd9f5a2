//! TCP stream reassembly and HTTP response handling.

mod http;
mod reassembly;

pub use http::{ensure_brotli_encoding, split_message, HttpMessage};
pub use reassembly::reassemble_response;
