//! Errors surfaced by the command-line frontend

use std::path::PathBuf;

use pktdecode_core::{DecodeError, Layer};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid hex input: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("input is empty")]
    EmptyInput,

    #[error("{layer} decode failed: {source}")]
    Decode {
        layer: Layer,
        #[source]
        source: DecodeError,
    },
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }
}
