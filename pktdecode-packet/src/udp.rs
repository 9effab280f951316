//! UDP header decoding
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          Source Port          |       Destination Port        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           Length              |            Checksum           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use std::fmt;

use pktdecode_core::{header_lengths, ByteView, Decoded, Header, Layer, Result};
use tracing::debug;

/// Decoded UDP header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UdpHeader {
    /// Source port
    pub source_port: u16,
    /// Destination port
    pub destination_port: u16,
    /// Length (header + data)
    pub length: u16,
    /// Checksum
    pub checksum: u16,
}

impl UdpHeader {
    /// UDP header size in bytes
    pub const HEADER_SIZE: usize = header_lengths::UDP;

    /// Payload bytes announced by the length field
    pub fn payload_len(&self) -> usize {
        usize::from(self.length).saturating_sub(Self::HEADER_SIZE)
    }

    fn read(view: &ByteView<'_>) -> Result<Self> {
        Ok(UdpHeader {
            source_port: view.be_u16_at(0)?,
            destination_port: view.be_u16_at(2)?,
            length: view.be_u16_at(4)?,
            checksum: view.be_u16_at(6)?,
        })
    }
}

impl Header for UdpHeader {
    const LAYER: Layer = Layer::Udp;
    const MIN_LEN: usize = Self::HEADER_SIZE;

    fn decode(data: &[u8], len: usize) -> Decoded<Self> {
        let view = ByteView::new(data, len);
        if let Err(failed) = Self::check_min_len(view.len()) {
            debug!(available = view.len(), "UDP header truncated");
            return failed;
        }

        match Self::read(&view) {
            Ok(header) => Decoded::ok(header),
            Err(err) => Decoded::partial(Self::default(), err),
        }
    }

    fn header_len(&self) -> usize {
        Self::HEADER_SIZE
    }
}

impl fmt::Display for UdpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UDP, Src: {} Dst: {} , Length: {}",
            self.source_port, self.destination_port, self.length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pktdecode_core::DecodeError;

    #[test]
    fn test_udp_decode() {
        let data = [
            0x00, 0x50, // Source port (80)
            0x30, 0x39, // Dest port (12345)
            0x00, 0x0C, // Length (12)
            0xAB, 0xCD, // Checksum
        ];

        let decoded = UdpHeader::decode(&data, data.len());
        assert!(decoded.is_ok());
        assert_eq!(
            decoded.header,
            UdpHeader {
                source_port: 80,
                destination_port: 12345,
                length: 12,
                checksum: 0xABCD,
            }
        );
        assert_eq!(decoded.header.payload_len(), 4);
        assert_eq!(decoded.header.header_len(), 8);
    }

    #[test]
    fn test_udp_too_short() {
        let data = [0x00, 0x35, 0x00, 0x35, 0x00, 0x08, 0x00];
        let decoded = UdpHeader::decode(&data, data.len());
        assert_eq!(decoded.header, UdpHeader::default());
        assert_eq!(decoded.error, Some(DecodeError::length(Layer::Udp, 8, 7)));
    }

    #[test]
    fn test_udp_display() {
        let data = [0x00, 0x35, 0xC0, 0x00, 0x00, 0x08, 0x00, 0x00];
        let header = UdpHeader::decode(&data, 8).header;
        assert_eq!(header.to_string(), "UDP, Src: 53 Dst: 49152 , Length: 8");
    }
}
