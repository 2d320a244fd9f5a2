//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

use crate::scan;

/// Recover a bracketed secret token from a Brotli-compressed HTTP
/// response inside a pcap capture.
#[derive(Parser, Debug)]
#[command(name = "capsift")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// pcap file to scan
    #[arg(value_name = "FILE", default_value = "capture.pcap")]
    pub file: PathBuf,

    /// Token prefix preceding the braced payload
    #[arg(long = "prefix", value_name = "STR", default_value = "PREFIX")]
    pub prefix: String,

    /// Stride in bytes between candidate Brotli start offsets
    #[arg(long = "stride", value_name = "N", default_value_t = scan::DEFAULT_SWEEP_STRIDE)]
    pub stride: usize,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}
