//! Error types for pktdecode

use thiserror::Error;

use crate::types::Layer;

/// Result type alias for decode operations
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors reported by the header decoders
///
/// None of these are fatal. Decoders always hand back a header value next
/// to the error, and the caller decides whether the partial result is usable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Declared length is shorter than the bytes the header needs
    #[error("{layer} header too short: need {required} bytes, have {available}")]
    Length {
        layer: Layer,
        required: usize,
        available: usize,
    },

    /// The header's own length field is below the protocol minimum
    #[error("{layer} header declares invalid length {header_len}")]
    HeaderLength { layer: Layer, header_len: usize },

    /// A fixed-size TCP option runs past the end of the option region
    #[error("TCP option {kind} needs {required} bytes, {remaining} remaining")]
    MalformedOption {
        kind: u8,
        required: usize,
        remaining: usize,
    },

    /// A variable-length TCP option carries an unusable length byte
    #[error("TCP option {kind} declares length {declared}, {remaining} remaining")]
    InvalidOptionLength {
        kind: u8,
        declared: usize,
        remaining: usize,
    },

    /// A read fell outside the declared buffer window
    #[error("read of {width} bytes at offset {offset} exceeds length {len}")]
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },
}

impl DecodeError {
    /// Create a length error for a layer
    pub fn length(layer: Layer, required: usize, available: usize) -> Self {
        DecodeError::Length {
            layer,
            required,
            available,
        }
    }

    /// True for errors meaning "not enough bytes for this header"
    pub fn is_length_error(&self) -> bool {
        matches!(
            self,
            DecodeError::Length { .. }
                | DecodeError::HeaderLength { .. }
                | DecodeError::OutOfBounds { .. }
        )
    }

    /// True for errors raised by the TCP option chain
    pub fn is_malformed_option(&self) -> bool {
        matches!(
            self,
            DecodeError::MalformedOption { .. } | DecodeError::InvalidOptionLength { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let err = DecodeError::length(Layer::Ethernet, 14, 13);
        assert!(err.is_length_error());
        assert!(!err.is_malformed_option());

        let err = DecodeError::InvalidOptionLength {
            kind: 8,
            declared: 0,
            remaining: 6,
        };
        assert!(err.is_malformed_option());
        assert!(!err.is_length_error());
    }

    #[test]
    fn test_error_display() {
        let err = DecodeError::length(Layer::Ipv4, 20, 19);
        assert_eq!(err.to_string(), "IPv4 header too short: need 20 bytes, have 19");

        let err = DecodeError::MalformedOption {
            kind: 2,
            required: 4,
            remaining: 2,
        };
        assert_eq!(err.to_string(), "TCP option 2 needs 4 bytes, 2 remaining");
    }
}
