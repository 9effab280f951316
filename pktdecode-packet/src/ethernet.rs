//! Ethernet II header decoding
//!
//! Destination MAC (6 bytes), source MAC (6 bytes), EtherType (2 bytes).
//! 802.1Q tags are not unwrapped; a tagged frame reports EtherType 0x8100.

use std::fmt;

use pktdecode_core::{header_lengths, ByteView, Decoded, EtherType, Header, Layer, MacAddr, Result};
use tracing::debug;

/// Decoded Ethernet II header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EthernetHeader {
    /// Destination MAC address
    pub destination: MacAddr,
    /// Source MAC address
    pub source: MacAddr,
    /// EtherType of the encapsulated payload
    pub ether_type: u16,
    /// Header length, always 14 after a successful decode
    pub length: usize,
}

impl EthernetHeader {
    /// Ethernet header size (dst + src + type)
    pub const HEADER_SIZE: usize = header_lengths::ETHERNET;

    /// Typed view of the EtherType
    pub fn ether_type(&self) -> EtherType {
        EtherType::from_u16(self.ether_type)
    }

    fn read(view: &ByteView<'_>) -> Result<Self> {
        Ok(EthernetHeader {
            destination: view.mac_at(0)?,
            source: view.mac_at(6)?,
            ether_type: view.be_u16_at(12)?,
            length: Self::HEADER_SIZE,
        })
    }
}

impl Header for EthernetHeader {
    const LAYER: Layer = Layer::Ethernet;
    const MIN_LEN: usize = Self::HEADER_SIZE;

    fn decode(data: &[u8], len: usize) -> Decoded<Self> {
        let view = ByteView::new(data, len);
        if let Err(failed) = Self::check_min_len(view.len()) {
            debug!(available = view.len(), "Ethernet header truncated");
            return failed;
        }

        match Self::read(&view) {
            Ok(header) => Decoded::ok(header),
            Err(err) => Decoded::partial(Self::default(), err),
        }
    }

    fn header_len(&self) -> usize {
        self.length
    }
}

impl fmt::Display for EthernetHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ethernet, EtherType: 0x{:04x} ({}) Src: {} Dst: {}",
            self.ether_type,
            self.ether_type(),
            self.source,
            self.destination
        )?;
        if self.destination.is_broadcast() {
            write!(f, " (broadcast)")?;
        } else if self.destination.is_multicast() {
            write!(f, " (multicast)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pktdecode_core::{ethertypes, DecodeError};

    fn frame() -> Vec<u8> {
        vec![
            0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, // dst
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, // src
            0x08, 0x00, // IPv4
            0x45, 0x00, // start of payload
        ]
    }

    #[test]
    fn test_ethernet_decode() {
        let data = frame();
        let decoded = EthernetHeader::decode(&data, data.len());
        assert!(decoded.is_ok());

        let header = decoded.header;
        assert_eq!(header.destination.0, [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(header.source.0, [0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        assert_eq!(header.ether_type, ethertypes::IPV4);
        assert_eq!(header.ether_type(), EtherType::IPv4);
        assert_eq!(header.length, 14);
        assert_eq!(header.header_len(), 14);
    }

    #[test]
    fn test_ethernet_exact_length() {
        let data = frame();
        let decoded = EthernetHeader::decode(&data[..14], 14);
        assert!(decoded.is_ok());
        assert_eq!(decoded.header.ether_type, 0x0800);
    }

    #[test]
    fn test_ethernet_too_short() {
        let data = frame();
        let decoded = EthernetHeader::decode(&data, 13);

        assert_eq!(decoded.header, EthernetHeader::default());
        assert_eq!(
            decoded.error,
            Some(DecodeError::length(Layer::Ethernet, 14, 13))
        );
        assert!(decoded.error.unwrap().is_length_error());
    }

    #[test]
    fn test_ethernet_declared_beyond_buffer() {
        let data = frame();
        let decoded = EthernetHeader::decode(&data[..10], 64);
        assert_eq!(
            decoded.error,
            Some(DecodeError::length(Layer::Ethernet, 14, 10))
        );
    }

    #[test]
    fn test_ethernet_display() {
        let data = frame();
        let header = EthernetHeader::decode(&data, data.len()).header;
        assert_eq!(
            header.to_string(),
            "Ethernet, EtherType: 0x0800 (IPv4) Src: 00:11:22:33:44:55 Dst: aa:bb:cc:dd:ee:ff"
        );
    }

    #[test]
    fn test_ethernet_display_group_destinations() {
        let mut data = frame();
        data[..6].copy_from_slice(&[0xFF; 6]);
        let header = EthernetHeader::decode(&data, data.len()).header;
        assert!(header.to_string().ends_with("Dst: ff:ff:ff:ff:ff:ff (broadcast)"));

        data[..6].copy_from_slice(&[0x01, 0x00, 0x5E, 0x00, 0x00, 0xFB]);
        let header = EthernetHeader::decode(&data, data.len()).header;
        assert!(header.to_string().ends_with("Dst: 01:00:5e:00:00:fb (multicast)"));
    }
}
