//! IPv4 header decoding
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |Version|  IHL  |Type of Service|          Total Length         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |         Identification        |Flags|      Fragment Offset    |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |  Time to Live |    Protocol   |         Header Checksum       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                       Source Address                          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    Destination Address                        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Options are covered by the header length but not parsed.

use std::fmt;
use std::net::Ipv4Addr;

use pktdecode_core::{
    header_lengths, ByteView, DecodeError, Decoded, Header, IpProtocol, Layer, Result,
};
use tracing::debug;

/// Don't Fragment bit of the flags/fragment-offset word
const FLAG_DF: u16 = 0x4000;
/// More Fragments bit
const FLAG_MF: u16 = 0x2000;
const FRAGMENT_OFFSET_MASK: u16 = 0x1FFF;

/// Decoded IPv4 header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Header {
    /// Version (4 for a well-formed header)
    pub version: u8,
    /// Header length in bytes (IHL * 4)
    pub header_len: usize,
    /// Type of Service / DSCP+ECN byte
    pub tos: u8,
    /// Total length (header + data) in bytes
    pub total_length: u16,
    /// Identification
    pub identification: u16,
    /// Don't Fragment flag
    pub dont_fragment: bool,
    /// More Fragments flag
    pub more_fragments: bool,
    /// Fragment offset (in 8-byte blocks)
    pub fragment_offset: u16,
    /// Time to Live
    pub ttl: u8,
    /// Protocol of the payload
    pub protocol: u8,
    /// Header checksum, as carried (not verified)
    pub checksum: u16,
    /// Source IP address
    pub source: Ipv4Addr,
    /// Destination IP address
    pub destination: Ipv4Addr,
}

impl Default for Ipv4Header {
    fn default() -> Self {
        Ipv4Header {
            version: 0,
            header_len: 0,
            tos: 0,
            total_length: 0,
            identification: 0,
            dont_fragment: false,
            more_fragments: false,
            fragment_offset: 0,
            ttl: 0,
            protocol: 0,
            checksum: 0,
            source: Ipv4Addr::UNSPECIFIED,
            destination: Ipv4Addr::UNSPECIFIED,
        }
    }
}

impl Ipv4Header {
    /// Minimum IPv4 header size (without options)
    pub const MIN_HEADER_SIZE: usize = header_lengths::IPV4_MIN;

    /// Typed view of the payload protocol
    pub fn protocol(&self) -> IpProtocol {
        IpProtocol::from_u8(self.protocol)
    }

    /// True if this header belongs to a fragment of a larger datagram
    pub fn is_fragment(&self) -> bool {
        self.more_fragments || self.fragment_offset != 0
    }

    /// Bytes of options between the fixed header and the payload
    pub fn options_len(&self) -> usize {
        self.header_len.saturating_sub(Self::MIN_HEADER_SIZE)
    }

    fn read(view: &ByteView<'_>) -> Result<Self> {
        let version_ihl = view.u8_at(0)?;
        let flags_and_offset = view.be_u16_at(6)?;

        Ok(Ipv4Header {
            version: version_ihl >> 4,
            header_len: usize::from(version_ihl & 0x0F) * 4,
            tos: view.u8_at(1)?,
            total_length: view.be_u16_at(2)?,
            identification: view.be_u16_at(4)?,
            dont_fragment: flags_and_offset & FLAG_DF != 0,
            more_fragments: flags_and_offset & FLAG_MF != 0,
            fragment_offset: flags_and_offset & FRAGMENT_OFFSET_MASK,
            ttl: view.u8_at(8)?,
            protocol: view.u8_at(9)?,
            checksum: view.be_u16_at(10)?,
            source: view.ipv4_at(12)?,
            destination: view.ipv4_at(16)?,
        })
    }
}

impl Header for Ipv4Header {
    const LAYER: Layer = Layer::Ipv4;
    const MIN_LEN: usize = Self::MIN_HEADER_SIZE;

    fn decode(data: &[u8], len: usize) -> Decoded<Self> {
        let view = ByteView::new(data, len);
        if let Err(failed) = Self::check_min_len(view.len()) {
            debug!(available = view.len(), "IPv4 header truncated");
            return failed;
        }

        let header = match Self::read(&view) {
            Ok(header) => header,
            Err(err) => return Decoded::partial(Self::default(), err),
        };

        if header.header_len < Self::MIN_HEADER_SIZE {
            debug!(header_len = header.header_len, "IPv4 IHL below minimum");
            return Decoded::partial(
                header,
                DecodeError::HeaderLength {
                    layer: Layer::Ipv4,
                    header_len: header.header_len,
                },
            );
        }

        if view.len() < header.header_len {
            debug!(
                header_len = header.header_len,
                available = view.len(),
                "IPv4 options truncated"
            );
            return Decoded::partial(
                header,
                DecodeError::length(Layer::Ipv4, header.header_len, view.len()),
            );
        }

        Decoded::ok(header)
    }

    fn header_len(&self) -> usize {
        self.header_len
    }
}

impl fmt::Display for Ipv4Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IPv4, Src: {} Dst: {} , Length: {} Proto: {} TTL: {}",
            self.source,
            self.destination,
            self.total_length,
            self.protocol(),
            self.ttl
        )?;
        if self.dont_fragment {
            write!(f, " DF")?;
        }
        if self.is_fragment() {
            let more = if self.more_fragments { "+" } else { "" };
            write!(f, " Frag: {}{}", self.fragment_offset, more)?;
        }
        Ok(())
    }
}
