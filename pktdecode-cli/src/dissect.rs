//! Layer-by-layer walk over a frame
//!
//! The decoders do not chain, so this module plays the caller: it decodes a
//! header, picks the next decoder from the EtherType or protocol number, and
//! advances by the decoded header length.

use std::fmt;

use bytes::Bytes;
use pktdecode_core::{DecodeError, EtherType, Header, IpProtocol, Layer};
use pktdecode_packet::{EthernetHeader, Ipv4Header, Ipv6Header, TcpHeader, UdpHeader};
use tracing::{debug, info};

/// One decoded layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerReport {
    pub layer: Layer,
    /// Offset of the header within the frame
    pub offset: usize,
    /// Display line of the (possibly partial) header
    pub summary: String,
    pub error: Option<DecodeError>,
}

impl fmt::Display for LayerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>4}] {}", self.offset, self.summary)?;
        if let Some(err) = &self.error {
            write!(f, "\n       error: {}", err)?;
        }
        Ok(())
    }
}

/// Why the walk ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stop {
    /// A transport header was decoded
    Transport,
    /// A layer failed to decode
    Error(Layer),
    /// The next protocol has no decoder here
    Unsupported(String),
    /// Non-first IPv4 fragment, no transport header present
    Fragment,
}

/// Result of walking a frame
#[derive(Debug, Clone)]
pub struct Dissection {
    pub layers: Vec<LayerReport>,
    pub stop: Stop,
    /// Bytes after the last decoded header
    pub payload: Bytes,
}

impl Dissection {
    /// First decode error encountered, with its layer
    pub fn error(&self) -> Option<(Layer, &DecodeError)> {
        self.layers
            .iter()
            .find_map(|report| report.error.as_ref().map(|err| (report.layer, err)))
    }
}

impl fmt::Display for Dissection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for report in &self.layers {
            writeln!(f, "{}", report)?;
        }
        match &self.stop {
            Stop::Error(layer) => write!(f, "       stopped at {}", layer),
            Stop::Unsupported(what) => {
                writeln!(f, "       next: {} (not decoded)", what)?;
                write!(f, "       payload: {} bytes", self.payload.len())
            }
            Stop::Transport | Stop::Fragment => {
                write!(f, "       payload: {} bytes", self.payload.len())
            }
        }
    }
}

/// Walk `frame` starting at `first`, trusting at most `len` bytes
pub fn dissect(frame: &Bytes, len: usize, first: Layer) -> Dissection {
    let mut data = frame.slice(..len.min(frame.len()));
    let mut offset = 0;
    let mut layers = Vec::new();
    let mut layer = first;

    loop {
        let step = match layer {
            Layer::Ethernet => decode_layer::<EthernetHeader, _>(&data, offset, |eth| {
                next_from_ethertype(eth.ether_type())
            }),
            Layer::Ipv4 => decode_layer::<Ipv4Header, _>(&data, offset, |ip| {
                if ip.fragment_offset != 0 {
                    return Err(Stop::Fragment);
                }
                next_from_protocol(ip.protocol())
            }),
            Layer::Ipv6 => decode_layer::<Ipv6Header, _>(&data, offset, |ip| {
                next_from_protocol(ip.next_header())
            }),
            Layer::Tcp => decode_layer::<TcpHeader, _>(&data, offset, |_| Err(Stop::Transport)),
            Layer::Udp => decode_layer::<UdpHeader, _>(&data, offset, |_| Err(Stop::Transport)),
        };

        layers.push(step.report);
        let consumed = step.consumed.min(data.len());
        data = data.slice(consumed..);
        offset += consumed;
        if let Some(bound) = step.payload_len {
            data = data.slice(..bound.min(data.len()));
        }

        match step.next {
            Ok(next) => layer = next,
            Err(stop) => {
                info!(layers = layers.len(), stop = ?stop, "walk finished");
                return Dissection {
                    layers,
                    stop,
                    payload: data,
                };
            }
        }
    }
}

struct LayerStep {
    report: LayerReport,
    consumed: usize,
    /// Bytes after the header that belong to this layer, if the header declares it
    payload_len: Option<usize>,
    next: Result<Layer, Stop>,
}

/// Length of the data a header encloses
///
/// Link-layer padding after an IP datagram must not reach the transport
/// decoder, so the walk trims to this before moving on.
trait PayloadLen {
    fn payload_len(&self) -> Option<usize>;
}

impl PayloadLen for EthernetHeader {
    fn payload_len(&self) -> Option<usize> {
        None
    }
}

impl PayloadLen for Ipv4Header {
    fn payload_len(&self) -> Option<usize> {
        // Zero when the capture was taken before segmentation offload filled it in
        if self.total_length == 0 {
            return None;
        }
        Some(usize::from(self.total_length).saturating_sub(self.header_len))
    }
}

impl PayloadLen for Ipv6Header {
    fn payload_len(&self) -> Option<usize> {
        // Zero means a jumbo payload carried in a hop-by-hop option
        if self.payload_length == 0 {
            return None;
        }
        Some(usize::from(self.payload_length))
    }
}

impl PayloadLen for UdpHeader {
    fn payload_len(&self) -> Option<usize> {
        Some(UdpHeader::payload_len(self))
    }
}

impl PayloadLen for TcpHeader {
    fn payload_len(&self) -> Option<usize> {
        None
    }
}

fn decode_layer<H, F>(data: &Bytes, offset: usize, next: F) -> LayerStep
where
    H: Header + PayloadLen + fmt::Display,
    F: FnOnce(&H) -> Result<Layer, Stop>,
{
    let decoded = H::decode(data, data.len());
    let report = LayerReport {
        layer: H::LAYER,
        offset,
        summary: decoded.header.to_string(),
        error: decoded.error.clone(),
    };

    if let Some(err) = &decoded.error {
        debug!(layer = %H::LAYER, offset, error = %err, "layer failed");
        return LayerStep {
            report,
            consumed: 0,
            payload_len: None,
            next: Err(Stop::Error(H::LAYER)),
        };
    }

    LayerStep {
        report,
        consumed: decoded.header.header_len(),
        payload_len: PayloadLen::payload_len(&decoded.header),
        next: next(&decoded.header),
    }
}

fn next_from_ethertype(ether_type: EtherType) -> Result<Layer, Stop> {
    match ether_type {
        EtherType::IPv4 => Ok(Layer::Ipv4),
        EtherType::IPv6 => Ok(Layer::Ipv6),
        other => Err(Stop::Unsupported(format!("EtherType {}", other))),
    }
}

fn next_from_protocol(protocol: IpProtocol) -> Result<Layer, Stop> {
    match protocol {
        IpProtocol::TCP => Ok(Layer::Tcp),
        IpProtocol::UDP => Ok(Layer::Udp),
        other => Err(Stop::Unsupported(format!("protocol {}", other))),
    }
}
