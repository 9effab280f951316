//! Table of the protocol-identification constants

use std::fmt::Write;

use pktdecode_core::{ethertypes, header_lengths, ip_protocols, tcp_flags};

/// Render every constant group as aligned text
pub fn render() -> String {
    let groups: [(&str, Vec<(&str, String)>); 4] = [
        (
            "EtherTypes",
            vec![
                ("IPV4", format!("0x{:04x}", ethertypes::IPV4)),
                ("ARP", format!("0x{:04x}", ethertypes::ARP)),
                ("VLAN", format!("0x{:04x}", ethertypes::VLAN)),
                ("MPLS", format!("0x{:04x}", ethertypes::MPLS)),
                ("IPV6", format!("0x{:04x}", ethertypes::IPV6)),
            ],
        ),
        (
            "IP protocols",
            vec![
                ("ICMP", format!("0x{:02x}", ip_protocols::ICMP)),
                ("TCP", format!("0x{:02x}", ip_protocols::TCP)),
                ("UDP", format!("0x{:02x}", ip_protocols::UDP)),
                ("GRE", format!("0x{:02x}", ip_protocols::GRE)),
                ("ICMPV6", format!("0x{:02x}", ip_protocols::ICMPV6)),
            ],
        ),
        (
            "Header lengths",
            vec![
                ("ETHERNET", header_lengths::ETHERNET.to_string()),
                ("VLAN", header_lengths::VLAN.to_string()),
                ("MPLS", header_lengths::MPLS.to_string()),
                ("IPV4_MIN", header_lengths::IPV4_MIN.to_string()),
                ("IPV6", header_lengths::IPV6.to_string()),
                ("ICMP", header_lengths::ICMP.to_string()),
                ("TCP_MIN", header_lengths::TCP_MIN.to_string()),
                ("UDP", header_lengths::UDP.to_string()),
                ("ARP", header_lengths::ARP.to_string()),
                ("GRE", header_lengths::GRE.to_string()),
            ],
        ),
        (
            "TCP flags",
            vec![
                ("FIN", format!("0x{:02x}", tcp_flags::FIN)),
                ("SYN", format!("0x{:02x}", tcp_flags::SYN)),
                ("RST", format!("0x{:02x}", tcp_flags::RST)),
                ("PSH", format!("0x{:02x}", tcp_flags::PSH)),
                ("ACK", format!("0x{:02x}", tcp_flags::ACK)),
                ("URG", format!("0x{:02x}", tcp_flags::URG)),
                ("ECE", format!("0x{:02x}", tcp_flags::ECE)),
                ("CWR", format!("0x{:02x}", tcp_flags::CWR)),
            ],
        ),
    ];

    let mut out = String::new();
    for (title, entries) in groups.iter() {
        let _ = writeln!(out, "{}:", title);
        for (name, value) in entries {
            let _ = writeln!(out, "  {:<10} {}", name, value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_constants() {
        let table = render();
        assert!(table.starts_with("EtherTypes:\n"));
        assert!(table.contains("  IPV6       0x86dd\n"));
        assert!(table.contains("  UDP        0x11\n"));
        assert!(table.contains("  TCP_MIN    20\n"));
        assert!(table.contains("  CWR        0x80\n"));
    }
}
