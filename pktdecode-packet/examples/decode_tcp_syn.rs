//! Example: Decoding a captured TCP SYN frame
//!
//! Walks an Ethernet/IPv4/TCP frame by hand, the way a caller of the
//! decoders is expected to: decode, check the next-protocol field, advance.

use pktdecode_packet::{EthernetHeader, Header, Ipv4Header, TcpHeader};

fn main() {
    #[rustfmt::skip]
    let frame: [u8; 74] = [
        // Ethernet
        0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x08, 0x00,
        // IPv4, DF, TTL 64, TCP
        0x45, 0x00, 0x00, 0x3C, 0x1C, 0x46, 0x40, 0x00, 0x40, 0x06, 0x00, 0x00,
        0xC0, 0xA8, 0x01, 0x64, 0xC0, 0xA8, 0x01, 0x01,
        // TCP 54321 -> 80, SYN, data offset 10
        0xD4, 0x31, 0x00, 0x50, 0x00, 0x00, 0x03, 0xE8, 0x00, 0x00, 0x00, 0x00,
        0xA0, 0x02, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00,
        // MSS 1460, SACK-Permitted, Timestamps, NOP, WS 7
        0x02, 0x04, 0x05, 0xB4, 0x04, 0x02, 0x08, 0x0A, 0x00, 0x9C, 0x41, 0x10,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x03, 0x07,
    ];

    let eth = EthernetHeader::decode(&frame, frame.len());
    println!("{}", eth.header);

    let mut offset = eth.header.header_len();
    let ip = Ipv4Header::decode(&frame[offset..], frame.len() - offset);
    println!("{}", ip.header);
    if let Some(err) = ip.error() {
        println!("IPv4 decode failed: {}", err);
        return;
    }

    offset += ip.header.header_len();
    let tcp = TcpHeader::decode(&frame[offset..], frame.len() - offset);
    println!("{}", tcp.header);

    match tcp.error {
        None => {
            println!("MSS: {:?}", tcp.header.options.mss);
            println!("Window scale: {:?}", tcp.header.options.window_scale);
            println!("SACK permitted: {}", tcp.header.options.sack_permitted);
        }
        Some(err) => println!("TCP decode failed: {}", err),
    }
}
