//! IPv6 fixed header decoding
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |Version| Traffic Class |           Flow Label                  |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |         Payload Length        |  Next Header  |   Hop Limit   |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                   Source Address (16 bytes)                   |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                Destination Address (16 bytes)                 |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Extension headers are not followed: `next_header` is reported as-is.

use std::fmt;
use std::net::Ipv6Addr;

use pktdecode_core::{header_lengths, ByteView, Decoded, Header, IpProtocol, Layer, Result};
use tracing::debug;

/// Decoded IPv6 fixed header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv6Header {
    pub version: u8,
    pub traffic_class: u8,
    /// 20-bit flow label
    pub flow_label: u32,
    pub payload_length: u16,
    pub next_header: u8,
    pub hop_limit: u8,
    pub source: Ipv6Addr,
    pub destination: Ipv6Addr,
    /// Header length, always 40 after a successful decode
    pub length: usize,
}

impl Default for Ipv6Header {
    fn default() -> Self {
        Ipv6Header {
            version: 0,
            traffic_class: 0,
            flow_label: 0,
            payload_length: 0,
            next_header: 0,
            hop_limit: 0,
            source: Ipv6Addr::UNSPECIFIED,
            destination: Ipv6Addr::UNSPECIFIED,
            length: 0,
        }
    }
}

impl Ipv6Header {
    pub const HEADER_SIZE: usize = header_lengths::IPV6;

    /// Typed view of the next header
    pub fn next_header(&self) -> IpProtocol {
        IpProtocol::from_u8(self.next_header)
    }

    fn read(view: &ByteView<'_>) -> Result<Self> {
        let [b0, b1, b2, b3] = view.window::<4>(0)?;

        Ok(Ipv6Header {
            version: b0 >> 4,
            traffic_class: (b0 & 0x0F) << 4 | b1 >> 4,
            flow_label: u32::from(b1 & 0x0F) << 16 | u32::from(b2) << 8 | u32::from(b3),
            payload_length: view.be_u16_at(4)?,
            next_header: view.u8_at(6)?,
            hop_limit: view.u8_at(7)?,
            source: view.ipv6_at(8)?,
            destination: view.ipv6_at(24)?,
            length: Self::HEADER_SIZE,
        })
    }
}

impl Header for Ipv6Header {
    const LAYER: Layer = Layer::Ipv6;
    const MIN_LEN: usize = Self::HEADER_SIZE;

    fn decode(data: &[u8], len: usize) -> Decoded<Self> {
        let view = ByteView::new(data, len);
        if let Err(failed) = Self::check_min_len(view.len()) {
            debug!(available = view.len(), "IPv6 header truncated");
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

impl fmt::Display for Ipv6Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IPv6, Src: {} Dst: {} , Length: {} Next: {} Hops: {}",
            self.source,
            self.destination,
            self.payload_length,
            self.next_header(),
            self.hop_limit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};
    use pktdecode_core::DecodeError;

    fn header_bytes(first_word: [u8; 4]) -> BytesMut {
        let src: Ipv6Addr = "2001:db8::1".parse().unwrap();
        let dst: Ipv6Addr = "2001:db8::2".parse().unwrap();

        let mut buf = BytesMut::with_capacity(40);
        buf.put_slice(&first_word);
        buf.put_u16(32); // payload length
        buf.put_u8(17); // UDP
        buf.put_u8(255); // hop limit
        buf.put_slice(&src.octets());
        buf.put_slice(&dst.octets());
        buf
    }

    #[test]
    fn test_ipv6_zero_first_word() {
        let data = header_bytes([0x60, 0x00, 0x00, 0x00]);
        let decoded = Ipv6Header::decode(&data, data.len());
        assert!(decoded.is_ok());

        let header = decoded.header;
        assert_eq!(header.version, 6);
        assert_eq!(header.traffic_class, 0);
        assert_eq!(header.flow_label, 0);
        assert_eq!(header.payload_length, 32);
        assert_eq!(header.next_header(), IpProtocol::UDP);
        assert_eq!(header.hop_limit, 255);
        assert_eq!(header.source, "2001:db8::1".parse::<Ipv6Addr>().unwrap());
        assert_eq!(header.destination, "2001:db8::2".parse::<Ipv6Addr>().unwrap());
        assert_eq!(header.length, 40);
    }

    #[test]
    fn test_ipv6_packed_fields() {
        // version 6, traffic class 0xAB, flow label 0xCDEF1
        let data = header_bytes([0x6A, 0xBC, 0xDE, 0xF1]);
        let header = Ipv6Header::decode(&data, data.len()).header;
        assert_eq!(header.version, 6);
        assert_eq!(header.traffic_class, 0xAB);
        assert_eq!(header.flow_label, 0xCDEF1);

        let data = header_bytes([0x6F, 0xFF, 0xFF, 0xFF]);
        let header = Ipv6Header::decode(&data, data.len()).header;
        assert_eq!(header.traffic_class, 0xFF);
        assert_eq!(header.flow_label, 0xFFFFF);
    }

    #[test]
    fn test_ipv6_too_short() {
        let data = header_bytes([0x60, 0, 0, 0]);
        let decoded = Ipv6Header::decode(&data, 39);
        assert_eq!(decoded.header, Ipv6Header::default());
        assert_eq!(decoded.error, Some(DecodeError::length(Layer::Ipv6, 40, 39)));
    }
}
