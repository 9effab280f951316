//! Protocol header decoders for pktdecode
//!
//! Each decoder takes a byte slice plus the number of bytes the caller
//! vouches for, and returns a [`Decoded`] value: the header, and an error
//! when the bytes could not be fully trusted. Decoders never panic and never
//! read past `min(len, data.len())`.
//!
//! - [`ethernet`] - Ethernet II header
//! - [`ip`] - IPv4 header (options skipped)
//! - [`ipv6`] - IPv6 fixed header
//! - [`tcp`] - TCP header and flags
//! - [`tcp_options`] - TCP option chain (MSS, window scale, SACK-permitted)
//! - [`udp`] - UDP header
//!
//! Decoders do not chain. The caller inspects the EtherType or protocol
//! field and advances by [`Header::header_len`] itself.
//!
//! # Example
//!
//! ```rust
//! use pktdecode_packet::{Header, Ipv4Header, TcpHeader};
//!
//! let packet = [
//!     0x45, 0x00, 0x00, 0x2C, 0x00, 0x01, 0x40, 0x00, 0x40, 0x06, 0x00, 0x00,
//!     0xC0, 0xA8, 0x01, 0x01, 0xC0, 0xA8, 0x01, 0x02,
//!     0x30, 0x39, 0x00, 0x50, 0x00, 0x00, 0x03, 0xE8, 0x00, 0x00, 0x00, 0x00,
//!     0x60, 0x02, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00,
//!     0x02, 0x04, 0x05, 0xB4,
//! ];
//!
//! let ip = Ipv4Header::decode(&packet, packet.len());
//! assert!(ip.is_ok());
//! assert!(ip.header.dont_fragment);
//!
//! let offset = ip.header.header_len();
//! let tcp = TcpHeader::decode(&packet[offset..], packet.len() - offset);
//! assert!(tcp.header.flags.syn);
//! assert_eq!(tcp.header.options.mss, Some(1460));
//! ```

pub mod ethernet;
pub mod ip;
pub mod ipv6;
pub mod tcp;
pub mod tcp_options;
pub mod udp;

// Re-export commonly used types for convenience
pub use ethernet::EthernetHeader;
pub use ip::Ipv4Header;
pub use ipv6::Ipv6Header;
pub use pktdecode_core::{DecodeError, Decoded, Header};
pub use tcp::{TcpFlags, TcpHeader};
pub use tcp_options::{TcpOptionKind, TcpOptions};
pub use udp::UdpHeader;
