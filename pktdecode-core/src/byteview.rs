//! Endian-aware field extraction over raw packet bytes
//!
//! The free functions turn fixed-size windows into integers and addresses.
//! They are total: given exactly `N` bytes they always succeed. Bounds are
//! the job of [`ByteView`], which hands out windows only when they lie
//! inside the caller's declared length.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::ops::Range;

use crate::error::{DecodeError, Result};
use crate::types::MacAddr;

/// Big-endian u16: byte 0 is most significant
pub fn be_u16(b: [u8; 2]) -> u16 {
    u16::from_be_bytes(b)
}

/// Big-endian u32
pub fn be_u32(b: [u8; 4]) -> u32 {
    u32::from_be_bytes(b)
}

/// Big-endian u64
pub fn be_u64(b: [u8; 8]) -> u64 {
    u64::from_be_bytes(b)
}

/// Little-endian u16: byte 0 is least significant
pub fn le_u16(b: [u8; 2]) -> u16 {
    u16::from_le_bytes(b)
}

/// Little-endian u32
pub fn le_u32(b: [u8; 4]) -> u32 {
    u32::from_le_bytes(b)
}

/// Little-endian u64
pub fn le_u64(b: [u8; 8]) -> u64 {
    u64::from_le_bytes(b)
}

/// Swap the two bytes of a u16 stored in non-network order
pub fn swap_u16(x: u16) -> u16 {
    x.rotate_left(8)
}

pub fn mac_addr(b: [u8; 6]) -> MacAddr {
    MacAddr(b)
}

pub fn ipv4_addr(b: [u8; 4]) -> Ipv4Addr {
    Ipv4Addr::from(b)
}

pub fn ipv6_addr(b: [u8; 16]) -> Ipv6Addr {
    Ipv6Addr::from(b)
}

/// Bounds-checked reader over the valid prefix of a packet buffer
///
/// The view covers `min(declared, data.len())` bytes, so a caller that
/// over-states its length still cannot make a decoder read past the slice.
#[derive(Debug, Clone, Copy)]
pub struct ByteView<'a> {
    data: &'a [u8],
}

impl<'a> ByteView<'a> {
    /// Create a view over the first `declared` bytes of `data`
    pub fn new(data: &'a [u8], declared: usize) -> Self {
        let len = declared.min(data.len());
        Self { data: &data[..len] }
    }

    /// Number of readable bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copy out an `N`-byte window starting at `offset`
    pub fn window<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        let bytes = self.slice(offset..offset.saturating_add(N))?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Borrow a sub-range of the view
    pub fn slice(&self, range: Range<usize>) -> Result<&'a [u8]> {
        let width = range.end.saturating_sub(range.start);
        self.data
            .get(range.clone())
            .ok_or(DecodeError::OutOfBounds {
                offset: range.start,
                width,
                len: self.data.len(),
            })
    }

    pub fn u8_at(&self, offset: usize) -> Result<u8> {
        self.window::<1>(offset).map(|[b]| b)
    }

    pub fn be_u16_at(&self, offset: usize) -> Result<u16> {
        self.window(offset).map(be_u16)
    }

    pub fn be_u32_at(&self, offset: usize) -> Result<u32> {
        self.window(offset).map(be_u32)
    }

    pub fn mac_at(&self, offset: usize) -> Result<MacAddr> {
        self.window(offset).map(mac_addr)
    }

    pub fn ipv4_at(&self, offset: usize) -> Result<Ipv4Addr> {
        self.window(offset).map(ipv4_addr)
    }

    pub fn ipv6_at(&self, offset: usize) -> Result<Ipv6Addr> {
        self.window(offset).map(ipv6_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endianness() {
        assert_eq!(be_u16([0x12, 0x34]), 0x1234);
        assert_eq!(le_u16([0x12, 0x34]), 0x3412);
        assert_eq!(be_u32([0x12, 0x34, 0x56, 0x78]), 0x1234_5678);
        assert_eq!(le_u32([0x12, 0x34, 0x56, 0x78]), 0x7856_3412);
        assert_eq!(
            be_u64([0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]),
            0x0102_0304_0506_0708
        );
        assert_eq!(
            le_u64([0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]),
            0x0807_0605_0403_0201
        );
    }

    #[test]
    fn test_swap_u16() {
        assert_eq!(swap_u16(0x1234), 0x3412);
        assert_eq!(swap_u16(swap_u16(0xBEEF)), 0xBEEF);
    }

    #[test]
    fn test_addresses() {
        assert_eq!(
            mac_addr([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]).to_string(),
            "aa:bb:cc:dd:ee:ff"
        );
        assert_eq!(ipv4_addr([192, 168, 1, 1]), Ipv4Addr::new(192, 168, 1, 1));

        let mut v6 = [0u8; 16];
        v6[0] = 0xfe;
        v6[1] = 0x80;
        v6[15] = 0x01;
        assert_eq!(ipv6_addr(v6), "fe80::1".parse::<Ipv6Addr>().unwrap());
    }

    #[test]
    fn test_view_respects_declared_length() {
        let data = [0x12, 0x34, 0x56, 0x78];
        let view = ByteView::new(&data, 3);
        assert_eq!(view.len(), 3);
        assert_eq!(view.be_u16_at(0).unwrap(), 0x1234);
        assert_eq!(view.u8_at(2).unwrap(), 0x56);
        assert_eq!(
            view.be_u16_at(2),
            Err(DecodeError::OutOfBounds {
                offset: 2,
                width: 2,
                len: 3
            })
        );
    }

    #[test]
    fn test_view_clamps_to_buffer() {
        let data = [0x01, 0x02];
        let view = ByteView::new(&data, 100);
        assert_eq!(view.len(), 2);
        assert!(view.be_u32_at(0).is_err());
        assert!(view.u8_at(usize::MAX).is_err());
    }
}
