//! Frame input: hex dumps and raw files

use std::path::Path;

use bytes::Bytes;
use tracing::debug;

use crate::error::{CliError, Result};

/// Parse a hex dump
///
/// Tokens are separated by whitespace, ':', '-' or ','. Each token may carry
/// its own `0x` prefix, so both `45000028` and `0x45 0x00 0x00 0x28` work.
pub fn parse_hex(text: &str) -> Result<Bytes> {
    let digits: String = text
        .split(|c: char| c.is_whitespace() || matches!(c, ':' | '-' | ','))
        .map(|token| {
            token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token)
        })
        .collect();
    let frame = hex::decode(digits)?;
    if frame.is_empty() {
        return Err(CliError::EmptyInput);
    }
    debug!(bytes = frame.len(), "parsed hex input");
    Ok(Bytes::from(frame))
}

/// Read a raw frame from disk
pub fn read_file(path: &Path) -> Result<Bytes> {
    let frame = std::fs::read(path).map_err(|err| CliError::io(path, err))?;
    if frame.is_empty() {
        return Err(CliError::EmptyInput);
    }
    debug!(path = %path.display(), bytes = frame.len(), "read frame file");
    Ok(Bytes::from(frame))
}
