//! CLI argument parsing

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pktdecode_core::Layer;

#[derive(Parser, Debug)]
#[command(name = "pktdecode")]
#[command(version, about = "Layer-by-layer packet header decoder", long_about = None)]
pub struct Cli {
    /// Verbose output (-v, -vv, -vvv for increasing verbosity)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a frame from a hex dump or a raw file
    Decode {
        /// Frame as hex; bytes may be separated and may carry a 0x prefix
        #[arg(
            short = 'x',
            long,
            value_name = "HEX",
            conflicts_with = "file",
            required_unless_present = "file"
        )]
        hex: Option<String>,

        /// File holding the raw frame bytes
        #[arg(short = 'f', long, value_name = "PATH")]
        file: Option<PathBuf>,

        /// Layer the frame starts at
        #[arg(short = 'l', long, value_enum, default_value_t = LinkLayer::Ethernet)]
        link: LinkLayer,

        /// Declared frame length, if shorter than the input (capture snaplen)
        #[arg(long, value_name = "BYTES")]
        len: Option<usize>,
    },

    /// Print the protocol-identification constants
    Constants,
}

/// First layer of the input
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkLayer {
    Ethernet,
    Ipv4,
    Ipv6,
}

impl From<LinkLayer> for Layer {
    fn from(link: LinkLayer) -> Self {
        match link {
            LinkLayer::Ethernet => Layer::Ethernet,
            LinkLayer::Ipv4 => Layer::Ipv4,
            LinkLayer::Ipv6 => Layer::Ipv6,
        }
    }
}

impl Cli {
    /// Default tracing directive for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
