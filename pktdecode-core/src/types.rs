//! Common types and protocol-identification constants

use std::fmt;

/// MAC Address (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// Broadcast MAC address (ff:ff:ff:ff:ff:ff)
    pub const BROADCAST: MacAddr = MacAddr([0xff; 6]);

    /// Check if this is a broadcast address
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Check if this is a multicast address (bit 0 of first octet is 1)
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 == 0x01
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(bytes: [u8; 6]) -> Self {
        MacAddr(bytes)
    }
}

/// Protocol layer a header belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Ethernet,
    Ipv4,
    Ipv6,
    Tcp,
    Udp,
}

impl Layer {
    /// Numeric layer identifier
    ///
    /// Link and network layers use the collector ids 3, 4 and 6; transport
    /// layers are identified by their IP protocol number.
    pub fn id(self) -> u8 {
        match self {
            Layer::Ethernet => 3,
            Layer::Ipv4 => 4,
            Layer::Ipv6 => 6,
            Layer::Tcp => ip_protocols::TCP,
            Layer::Udp => ip_protocols::UDP,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Ethernet => write!(f, "Ethernet"),
            Layer::Ipv4 => write!(f, "IPv4"),
            Layer::Ipv6 => write!(f, "IPv6"),
            Layer::Tcp => write!(f, "TCP"),
            Layer::Udp => write!(f, "UDP"),
        }
    }
}

/// Ethertype constants
pub mod ethertypes {
    pub const IPV4: u16 = 0x0800;
    pub const ARP: u16 = 0x0806;
    pub const VLAN: u16 = 0x8100;
    pub const MPLS: u16 = 0x8847;
    pub const IPV6: u16 = 0x86dd;
}

/// IP protocol numbers
pub mod ip_protocols {
    pub const ICMP: u8 = 0x01;
    pub const TCP: u8 = 0x06;
    pub const UDP: u8 = 0x11;
    pub const GRE: u8 = 0x2f;
    pub const ICMPV6: u8 = 0x3a;
}

/// Minimum header lengths in bytes
pub mod header_lengths {
    pub const ETHERNET: usize = 14;
    pub const VLAN: usize = 4;
    pub const MPLS: usize = 4;
    pub const IPV4_MIN: usize = 20;
    pub const IPV6: usize = 40;
    pub const ICMP: usize = 8;
    pub const TCP_MIN: usize = 20;
    pub const UDP: usize = 8;
    pub const ARP: usize = 28;
    pub const GRE: usize = 4;
}

/// TCP flag bits as found in byte 13 of the TCP header
pub mod tcp_flags {
    pub const FIN: u8 = 0x01;
    pub const SYN: u8 = 0x02;
    pub const RST: u8 = 0x04;
    pub const PSH: u8 = 0x08;
    pub const ACK: u8 = 0x10;
    pub const URG: u8 = 0x20;
    pub const ECE: u8 = 0x40;
    pub const CWR: u8 = 0x80;
}

/// Typed view of an EtherType value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EtherType {
    /// IPv4 (0x0800)
    IPv4,
    /// ARP (0x0806)
    ARP,
    /// VLAN-tagged frame (0x8100)
    VLAN,
    /// MPLS unicast (0x8847)
    MPLS,
    /// IPv6 (0x86DD)
    IPv6,
    /// Anything else
    Custom(u16),
}

impl EtherType {
    /// Convert EtherType to u16 value
    pub fn to_u16(self) -> u16 {
        match self {
            EtherType::IPv4 => ethertypes::IPV4,
            EtherType::ARP => ethertypes::ARP,
            EtherType::VLAN => ethertypes::VLAN,
            EtherType::MPLS => ethertypes::MPLS,
            EtherType::IPv6 => ethertypes::IPV6,
            EtherType::Custom(val) => val,
        }
    }

    /// Create EtherType from u16 value
    pub fn from_u16(value: u16) -> Self {
        match value {
            ethertypes::IPV4 => EtherType::IPv4,
            ethertypes::ARP => EtherType::ARP,
            ethertypes::VLAN => EtherType::VLAN,
            ethertypes::MPLS => EtherType::MPLS,
            ethertypes::IPV6 => EtherType::IPv6,
            val => EtherType::Custom(val),
        }
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EtherType::IPv4 => write!(f, "IPv4"),
            EtherType::ARP => write!(f, "ARP"),
            EtherType::VLAN => write!(f, "VLAN"),
            EtherType::MPLS => write!(f, "MPLS"),
            EtherType::IPv6 => write!(f, "IPv6"),
            EtherType::Custom(val) => write!(f, "0x{:04X}", val),
        }
    }
}

/// Typed view of an IP protocol / next-header number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpProtocol {
    /// ICMP (1)
    ICMP,
    /// TCP (6)
    TCP,
    /// UDP (17)
    UDP,
    /// GRE (47)
    GRE,
    /// ICMPv6 (58)
    ICMPv6,
    /// Custom protocol number
    Custom(u8),
}

impl IpProtocol {
    pub fn to_u8(self) -> u8 {
        match self {
            IpProtocol::ICMP => ip_protocols::ICMP,
            IpProtocol::TCP => ip_protocols::TCP,
            IpProtocol::UDP => ip_protocols::UDP,
            IpProtocol::GRE => ip_protocols::GRE,
            IpProtocol::ICMPv6 => ip_protocols::ICMPV6,
            IpProtocol::Custom(val) => val,
        }
    }

    pub fn from_u8(value: u8) -> Self {
        match value {
            ip_protocols::ICMP => IpProtocol::ICMP,
            ip_protocols::TCP => IpProtocol::TCP,
            ip_protocols::UDP => IpProtocol::UDP,
            ip_protocols::GRE => IpProtocol::GRE,
            ip_protocols::ICMPV6 => IpProtocol::ICMPv6,
            val => IpProtocol::Custom(val),
        }
    }
}

impl fmt::Display for IpProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpProtocol::ICMP => write!(f, "ICMP"),
            IpProtocol::TCP => write!(f, "TCP"),
            IpProtocol::UDP => write!(f, "UDP"),
            IpProtocol::GRE => write!(f, "GRE"),
            IpProtocol::ICMPv6 => write!(f, "ICMPv6"),
            IpProtocol::Custom(val) => write!(f, "{}", val),
        }
    }
}
