//! Decoder trait and the best-effort decode result

use crate::error::{DecodeError, Result};
use crate::types::Layer;

/// A decoded header together with the outcome of decoding it
///
/// Decoders never abort without a value. On failure `header` holds either
/// a zero value or whatever fields were read before the failure, and
/// `error` says why it should not be trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Decoded<H> {
    pub header: H,
    pub error: Option<DecodeError>,
}

impl<H> Decoded<H> {
    /// Successful decode
    pub fn ok(header: H) -> Self {
        Self {
            header,
            error: None,
        }
    }

    /// Failed decode carrying a best-effort header
    pub fn partial(header: H, error: DecodeError) -> Self {
        Self {
            header,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn error(&self) -> Option<&DecodeError> {
        self.error.as_ref()
    }

    /// Discard the partial header on failure
    pub fn into_result(self) -> Result<H> {
        match self.error {
            None => Ok(self.header),
            Some(err) => Err(err),
        }
    }

    /// Split into the header and the outcome
    pub fn into_parts(self) -> (H, Result<()>) {
        let outcome = match self.error {
            None => Ok(()),
            Some(err) => Err(err),
        };
        (self.header, outcome)
    }
}

/// A protocol header that can be decoded from a byte buffer
pub trait Header: Sized + Default {
    /// Layer this header belongs to
    const LAYER: Layer;

    /// Fewest bytes a decode can succeed with
    const MIN_LEN: usize;

    /// Decode from the first `len` valid bytes of `data`
    fn decode(data: &[u8], len: usize) -> Decoded<Self>;

    /// Bytes this header occupies once decoded
    fn header_len(&self) -> usize;

    /// Fail with a zero-valued header unless `len` covers `MIN_LEN`
    fn check_min_len(len: usize) -> std::result::Result<(), Decoded<Self>> {
        if len < Self::MIN_LEN {
            return Err(Decoded::partial(
                Self::default(),
                DecodeError::length(Self::LAYER, Self::MIN_LEN, len),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoded_parts() {
        let ok = Decoded::ok(7u8);
        assert!(ok.is_ok());
        assert_eq!(ok.clone().into_result(), Ok(7));
        assert_eq!(ok.into_parts(), (7, Ok(())));

        let err = DecodeError::length(Layer::Udp, 8, 4);
        let failed = Decoded::partial(0u8, err.clone());
        assert!(!failed.is_ok());
        assert_eq!(failed.error(), Some(&err));
        assert_eq!(failed.into_parts(), (0, Err(err)));
    }
}
