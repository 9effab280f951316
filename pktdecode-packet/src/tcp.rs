//! TCP header decoding
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |          Source Port          |       Destination Port        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                        Sequence Number                        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    Acknowledgment Number                      |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |  Data |       |C|E|U|A|P|R|S|F|                               |
//! | Offset|  Res. |W|C|R|C|S|S|Y|I|            Window             |
//! |       |       |R|E|G|K|H|T|N|N|                               |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           Checksum            |         Urgent Pointer        |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                    Options                    |    Padding    |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use std::fmt;

use pktdecode_core::{
    header_lengths, tcp_flags, ByteView, DecodeError, Decoded, Header, Layer, Result,
};
use tracing::debug;

use crate::tcp_options::TcpOptions;

/// TCP flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TcpFlags {
    /// FIN - No more data from sender
    pub fin: bool,
    /// SYN - Synchronize sequence numbers
    pub syn: bool,
    /// RST - Reset the connection
    pub rst: bool,
    /// PSH - Push function
    pub psh: bool,
    /// ACK - Acknowledgment field is significant
    pub ack: bool,
    /// URG - Urgent pointer field is significant
    pub urg: bool,
    /// ECE - ECN-Echo
    pub ece: bool,
    /// CWR - Congestion Window Reduced
    pub cwr: bool,
}

impl TcpFlags {
    /// Parse flags from the 14th header byte
    pub fn from_u8(value: u8) -> Self {
        TcpFlags {
            fin: value & tcp_flags::FIN != 0,
            syn: value & tcp_flags::SYN != 0,
            rst: value & tcp_flags::RST != 0,
            psh: value & tcp_flags::PSH != 0,
            ack: value & tcp_flags::ACK != 0,
            urg: value & tcp_flags::URG != 0,
            ece: value & tcp_flags::ECE != 0,
            cwr: value & tcp_flags::CWR != 0,
        }
    }

    /// Convert flags back to the wire byte
    pub fn to_u8(self) -> u8 {
        [
            (self.fin, tcp_flags::FIN),
            (self.syn, tcp_flags::SYN),
            (self.rst, tcp_flags::RST),
            (self.psh, tcp_flags::PSH),
            (self.ack, tcp_flags::ACK),
            (self.urg, tcp_flags::URG),
            (self.ece, tcp_flags::ECE),
            (self.cwr, tcp_flags::CWR),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .fold(0, |acc, (_, bit)| acc | bit)
    }
}

impl fmt::Display for TcpFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.cwr, "CWR"),
            (self.ece, "ECE"),
            (self.urg, "URG"),
            (self.ack, "ACK"),
            (self.psh, "PSH"),
            (self.rst, "RST"),
            (self.syn, "SYN"),
            (self.fin, "FIN"),
        ];
        let set: Vec<&str> = names
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, name)| *name)
            .collect();
        write!(f, "[{}]", set.join(", "))
    }
}

/// Decoded TCP header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TcpHeader {
    pub source_port: u16,
    pub destination_port: u16,
    pub sequence_number: u32,
    pub acknowledgment_number: u32,
    /// Header length in bytes (data offset * 4), options included
    pub header_len: usize,
    pub flags: TcpFlags,
    pub window: u16,
    /// Checksum, as carried (not verified)
    pub checksum: u16,
    pub urgent_pointer: u16,
    /// Options recovered from the header, empty when there are none
    pub options: TcpOptions,
}

impl TcpHeader {
    /// Minimum TCP header size (without options)
    pub const MIN_HEADER_SIZE: usize = header_lengths::TCP_MIN;

    /// Bytes of options between the fixed header and the payload
    pub fn options_len(&self) -> usize {
        self.header_len.saturating_sub(Self::MIN_HEADER_SIZE)
    }

    fn read(view: &ByteView<'_>) -> Result<Self> {
        Ok(TcpHeader {
            source_port: view.be_u16_at(0)?,
            destination_port: view.be_u16_at(2)?,
            sequence_number: view.be_u32_at(4)?,
            acknowledgment_number: view.be_u32_at(8)?,
            header_len: usize::from(view.u8_at(12)? >> 4) * 4,
            flags: TcpFlags::from_u8(view.u8_at(13)?),
            window: view.be_u16_at(14)?,
            checksum: view.be_u16_at(16)?,
            urgent_pointer: view.be_u16_at(18)?,
            options: TcpOptions::default(),
        })
    }
}

impl Header for TcpHeader {
    const LAYER: Layer = Layer::Tcp;
    const MIN_LEN: usize = Self::MIN_HEADER_SIZE;

    fn decode(data: &[u8], len: usize) -> Decoded<Self> {
        let view = ByteView::new(data, len);
        if let Err(failed) = Self::check_min_len(view.len()) {
            debug!(available = view.len(), "TCP header truncated");
            return failed;
        }

        let mut header = match Self::read(&view) {
            Ok(header) => header,
            Err(err) => return Decoded::partial(Self::default(), err),
        };

        if header.header_len < Self::MIN_HEADER_SIZE {
            debug!(header_len = header.header_len, "TCP data offset below minimum");
            return Decoded::partial(
                header,
                DecodeError::HeaderLength {
                    layer: Layer::Tcp,
                    header_len: header.header_len,
                },
            );
        }

        if view.len() < header.header_len {
            debug!(
                header_len = header.header_len,
                available = view.len(),
                "TCP options truncated"
            );
            return Decoded::partial(
                header,
                DecodeError::length(Layer::Tcp, header.header_len, view.len()),
            );
        }

        if header.header_len == Self::MIN_HEADER_SIZE {
            return Decoded::ok(header);
        }

        let region = match view.slice(Self::MIN_HEADER_SIZE..header.header_len) {
            Ok(region) => region,
            Err(err) => return Decoded::partial(header, err),
        };
        let options = TcpOptions::parse(region);
        header.options = options.header;
        match options.error {
            None => Decoded::ok(header),
            Some(err) => {
                debug!(
                    src = header.source_port,
                    dst = header.destination_port,
                    error = %err,
                    "TCP options malformed"
                );
                Decoded::partial(header, err)
            }
        }
    }

    fn header_len(&self) -> usize {
        self.header_len
    }
}

impl fmt::Display for TcpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TCP, Src: {} Dst: {} , Length: {} {} Seq: {} Ack: {} Win: {}",
            self.source_port,
            self.destination_port,
            self.header_len,
            self.flags,
            self.sequence_number,
            self.acknowledgment_number,
            self.window
        )?;
        if !self.options.is_empty() {
            write!(f, " Options: {}", self.options)?;
        }
        Ok(())
    }
}
