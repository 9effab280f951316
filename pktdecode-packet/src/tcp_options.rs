//! TCP option chain parsing
//!
//! Options follow the fixed 20-byte header and are a type-length-value
//! chain. EOL and NOP are a single byte; every other option carries a
//! length byte counting the kind and length bytes themselves.
//!
//! ```text
//!  Kind  Length  Name            Reference
//!  0     1       EOL             RFC 793
//!  1     1       NOP             RFC 793
//!  2     4       MSS             RFC 793
//!  3     3       WSOPT           RFC 1323
//!  4     2       SACK-Permitted  RFC 2018
//!  5     var     SACK            RFC 2018
//!  8     10      Timestamps      RFC 1323
//!  19    18      TCP-MD5         RFC 2385
//!  28    4       UTO             RFC 5482
//!  29    var     TCP-AO          RFC 5925
//! ```
//!
//! Only MSS, window scale and SACK-permitted are kept. Everything else is
//! skipped using its declared length.

use std::fmt;

use pktdecode_core::{ByteView, DecodeError, Decoded, Result};
use tracing::{debug, trace};

/// TCP option kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TcpOptionKind {
    /// End of option list (0)
    Eol,
    /// No operation, used for padding (1)
    Nop,
    /// Maximum segment size (2)
    Mss,
    /// Window scale factor (3)
    WindowScale,
    /// SACK permitted (4)
    SackPermitted,
    /// SACK blocks (5)
    Sack,
    /// Timestamps (8)
    Timestamps,
    /// MD5 signature (19)
    Md5,
    /// User timeout (28)
    UserTimeout,
    /// TCP authentication option (29)
    AuthOption,
    /// Anything else, including experimental kinds 253/254
    Unknown(u8),
}

impl TcpOptionKind {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => TcpOptionKind::Eol,
            1 => TcpOptionKind::Nop,
            2 => TcpOptionKind::Mss,
            3 => TcpOptionKind::WindowScale,
            4 => TcpOptionKind::SackPermitted,
            5 => TcpOptionKind::Sack,
            8 => TcpOptionKind::Timestamps,
            19 => TcpOptionKind::Md5,
            28 => TcpOptionKind::UserTimeout,
            29 => TcpOptionKind::AuthOption,
            val => TcpOptionKind::Unknown(val),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            TcpOptionKind::Eol => 0,
            TcpOptionKind::Nop => 1,
            TcpOptionKind::Mss => 2,
            TcpOptionKind::WindowScale => 3,
            TcpOptionKind::SackPermitted => 4,
            TcpOptionKind::Sack => 5,
            TcpOptionKind::Timestamps => 8,
            TcpOptionKind::Md5 => 19,
            TcpOptionKind::UserTimeout => 28,
            TcpOptionKind::AuthOption => 29,
            TcpOptionKind::Unknown(val) => val,
        }
    }
}

impl fmt::Display for TcpOptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TcpOptionKind::Eol => write!(f, "EOL"),
            TcpOptionKind::Nop => write!(f, "NOP"),
            TcpOptionKind::Mss => write!(f, "MSS"),
            TcpOptionKind::WindowScale => write!(f, "WSOPT"),
            TcpOptionKind::SackPermitted => write!(f, "SACK-Permitted"),
            TcpOptionKind::Sack => write!(f, "SACK"),
            TcpOptionKind::Timestamps => write!(f, "Timestamps"),
            TcpOptionKind::Md5 => write!(f, "TCP-MD5"),
            TcpOptionKind::UserTimeout => write!(f, "UTO"),
            TcpOptionKind::AuthOption => write!(f, "TCP-AO"),
            TcpOptionKind::Unknown(val) => write!(f, "kind {}", val),
        }
    }
}

/// Options recovered from a TCP header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TcpOptions {
    /// Maximum segment size
    pub mss: Option<u16>,
    /// Selective acknowledgment permitted
    pub sack_permitted: bool,
    /// Window scale shift count
    pub window_scale: Option<u8>,
}

/// Result of a single walk step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Continue at `pos` with the updated options
    Next { pos: usize, options: TcpOptions },
    /// The chain ended (EOL or no bytes left)
    End(TcpOptions),
}

impl TcpOptions {
    /// Walk an option region (the bytes between offset 20 and the header length)
    ///
    /// On a malformed option the walk stops and the options decoded so far
    /// are returned with the error.
    pub fn parse(region: &[u8]) -> Decoded<TcpOptions> {
        let view = ByteView::new(region, region.len());
        let mut options = TcpOptions::default();
        if view.is_empty() {
            return Decoded::ok(options);
        }

        let mut pos = 0;

        loop {
            match step(&view, pos, options) {
                Ok(Step::Next { pos: next, options: updated }) => {
                    trace!(from = pos, to = next, "TCP option step");
                    pos = next;
                    options = updated;
                }
                Ok(Step::End(done)) => return Decoded::ok(done),
                Err(err) => {
                    debug!(pos, error = %err, "TCP option chain malformed");
                    return Decoded::partial(options, err);
                }
            }
        }
    }

    /// True if no option was recovered
    pub fn is_empty(&self) -> bool {
        *self == TcpOptions::default()
    }
}

/// Decode the option at `pos`
///
/// Each `Next` strictly advances the position and never past the region end.
fn step(view: &ByteView<'_>, pos: usize, mut options: TcpOptions) -> Result<Step> {
    let remaining = view.len().saturating_sub(pos);
    if remaining < 1 {
        return Ok(Step::End(options));
    }

    let kind = TcpOptionKind::from_u8(view.u8_at(pos)?);
    let malformed = |required: usize| DecodeError::MalformedOption {
        kind: kind.to_u8(),
        required,
        remaining,
    };

    let consumed = match kind {
        TcpOptionKind::Eol => {
            trace!(pos, padding = remaining - 1, "TCP option EOL");
            return Ok(Step::End(options));
        }
        TcpOptionKind::Nop => 1,
        TcpOptionKind::Mss => {
            if remaining < 4 {
                return Err(malformed(4));
            }
            options.mss = Some(view.be_u16_at(pos + 2)?);
            4
        }
        TcpOptionKind::WindowScale => {
            if remaining < 3 {
                return Err(malformed(3));
            }
            options.window_scale = Some(view.u8_at(pos + 2)?);
            3
        }
        TcpOptionKind::SackPermitted => {
            if remaining < 2 {
                return Err(malformed(2));
            }
            options.sack_permitted = true;
            2
        }
        _ => {
            if remaining < 2 {
                return Err(malformed(2));
            }
            let declared = usize::from(view.u8_at(pos + 1)?);
            if declared < 2 || declared > remaining {
                return Err(DecodeError::InvalidOptionLength {
                    kind: kind.to_u8(),
                    declared,
                    remaining,
                });
            }
            trace!(pos, kind = %kind, declared, "skipping TCP option");
            declared
        }
    };

    Ok(Step::Next {
        pos: pos + consumed,
        options,
    })
}

impl fmt::Display for TcpOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(mss) = self.mss {
            parts.push(format!("MSS: {}", mss));
        }
        if let Some(shift) = self.window_scale {
            parts.push(format!("WS: {}", shift));
        }
        if self.sack_permitted {
            parts.push("SACK-Permitted".to_string());
        }
        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mss_option() {
        let decoded = TcpOptions::parse(&[0x02, 0x04, 0x05, 0xB4]);
        assert!(decoded.is_ok());
        assert_eq!(decoded.header.mss, Some(1460));
        assert_eq!(decoded.header.window_scale, None);
        assert!(!decoded.header.sack_permitted);
    }

    #[test]
    fn test_eol_stops_walk() {
        // An MSS after EOL is padding and must not be read
        let decoded = TcpOptions::parse(&[0x00, 0x02, 0x04, 0x05, 0xB4]);
        assert!(decoded.is_ok());
        assert!(decoded.header.is_empty());

        // Garbage after EOL is ignored too
        let decoded = TcpOptions::parse(&[0x03, 0x03, 0x07, 0x00, 0x05]);
        assert!(decoded.is_ok());
        assert_eq!(decoded.header.window_scale, Some(7));
    }

    #[test]
    fn test_truncated_mss() {
        let decoded = TcpOptions::parse(&[0x02, 0x04]);
        assert_eq!(
            decoded.error,
            Some(DecodeError::MalformedOption {
                kind: 2,
                required: 4,
                remaining: 2
            })
        );
        assert!(decoded.error.unwrap().is_malformed_option());
    }

    #[test]
    fn test_truncated_window_scale_and_sack_permitted() {
        let decoded = TcpOptions::parse(&[0x01, 0x03, 0x03]);
        assert_eq!(
            decoded.error,
            Some(DecodeError::MalformedOption {
                kind: 3,
                required: 3,
                remaining: 2
            })
        );

        let decoded = TcpOptions::parse(&[0x01, 0x01, 0x01, 0x04]);
        assert_eq!(
            decoded.error,
            Some(DecodeError::MalformedOption {
                kind: 4,
                required: 2,
                remaining: 1
            })
        );
    }

    #[test]
    fn test_typical_syn_options() {
        // MSS 1460, SACK-Permitted, Timestamps, NOP, WS 7 (Linux SYN)
        let region = [
            0x02, 0x04, 0x05, 0xB4, // MSS
            0x04, 0x02, // SACK-Permitted
            0x08, 0x0A, 0x00, 0x01, 0x02, 0x03, 0x00, 0x00, 0x00, 0x00, // Timestamps
            0x01, // NOP
            0x03, 0x03, 0x07, // WS
        ];
        let decoded = TcpOptions::parse(&region);
        assert!(decoded.is_ok());
        assert_eq!(
            decoded.header,
            TcpOptions {
                mss: Some(1460),
                sack_permitted: true,
                window_scale: Some(7),
            }
        );
        assert_eq!(decoded.header.to_string(), "MSS: 1460 WS: 7 SACK-Permitted");
    }

    #[test]
    fn test_sack_blocks_skipped() {
        let region = [
            0x01, 0x01, // NOP NOP
            0x05, 0x0A, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x20, 0x00, // one SACK block
        ];
        let decoded = TcpOptions::parse(&region);
        assert!(decoded.is_ok());
        assert!(decoded.header.is_empty());
    }

    #[test]
    fn test_unknown_option_skipped() {
        let region = [0xFE, 0x04, 0xAA, 0xBB, 0x02, 0x04, 0x02, 0x18];
        let decoded = TcpOptions::parse(&region);
        assert!(decoded.is_ok());
        assert_eq!(decoded.header.mss, Some(536));
    }

    #[test]
    fn test_variable_length_overruns_region() {
        // Timestamps claims 10 bytes, 4 remain
        let decoded = TcpOptions::parse(&[0x02, 0x04, 0x05, 0xB4, 0x08, 0x0A, 0x00, 0x00]);
        assert_eq!(
            decoded.error,
            Some(DecodeError::InvalidOptionLength {
                kind: 8,
                declared: 10,
                remaining: 4
            })
        );
        // MSS decoded before the bad option survives
        assert_eq!(decoded.header.mss, Some(1460));
    }

    #[test]
    fn test_variable_length_too_small() {
        // A zero length would never advance the walk
        let decoded = TcpOptions::parse(&[0x05, 0x00, 0x01, 0x01]);
        assert_eq!(
            decoded.error,
            Some(DecodeError::InvalidOptionLength {
                kind: 5,
                declared: 0,
                remaining: 4
            })
        );

        let decoded = TcpOptions::parse(&[0x1D, 0x01]);
        assert!(decoded.error.unwrap().is_malformed_option());
    }

    #[test]
    fn test_variable_length_missing_length_byte() {
        let decoded = TcpOptions::parse(&[0x01, 0x08]);
        assert_eq!(
            decoded.error,
            Some(DecodeError::MalformedOption {
                kind: 8,
                required: 2,
                remaining: 1
            })
        );
    }

    #[test]
    fn test_empty_region() {
        let decoded = TcpOptions::parse(&[]);
        assert!(decoded.is_ok());
        assert!(decoded.header.is_empty());
    }

    #[test]
    fn test_step_advances() {
        let region = [0x01, 0x02, 0x04, 0x05, 0xB4];
        let view = ByteView::new(&region, region.len());

        let first = step(&view, 0, TcpOptions::default()).unwrap();
        assert_eq!(
            first,
            Step::Next {
                pos: 1,
                options: TcpOptions::default()
            }
        );

        let second = step(&view, 1, TcpOptions::default()).unwrap();
        let Step::Next { pos, options } = second else {
            panic!("expected another step");
        };
        assert_eq!(pos, 5);
        assert_eq!(options.mss, Some(1460));

        assert_eq!(step(&view, 5, options).unwrap(), Step::End(options));
    }

    #[test]
    fn test_option_kind_conversion() {
        assert_eq!(TcpOptionKind::from_u8(8), TcpOptionKind::Timestamps);
        assert_eq!(TcpOptionKind::from_u8(254), TcpOptionKind::Unknown(254));
        assert_eq!(TcpOptionKind::AuthOption.to_u8(), 29);
        assert_eq!(TcpOptionKind::WindowScale.to_string(), "WSOPT");
    }
}
