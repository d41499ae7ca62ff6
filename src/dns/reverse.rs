//! Reverse-lookup (PTR) query names.
//!
//! IPv4 addresses map into `in-addr.arpa` by reversing their octets, IPv6
//! addresses map into `ip6.arpa` by reversing all 32 nibbles of the fully
//! expanded address (RFC 3596 section 2.5).

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::config::{IPV4_REVERSE_ZONE, IPV6_REVERSE_ZONE};
use crate::error_handling::DnsLookupError;

/// Builds the PTR query name for `ip`.
///
/// # Examples
///
/// ```
/// use std::net::IpAddr;
/// use spf_dns::dns::reverse_pointer_name;
///
/// let ip: IpAddr = "192.0.2.1".parse().unwrap();
/// assert_eq!(reverse_pointer_name(ip), "1.2.0.192.in-addr.arpa");
/// ```
pub fn reverse_pointer_name(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => reverse_ipv4_name(v4),
        IpAddr::V6(v6) => reverse_ipv6_name(v6),
    }
}

/// Builds the PTR query name for an address literal received as text.
///
/// The family is taken from parsing the literal, so IPv4-mapped IPv6
/// literals such as `::ffff:192.0.2.1` stay in the `ip6.arpa` tree.
///
/// # Errors
///
/// Returns `DnsLookupError::Resolution` naming the literal if it is not a
/// valid IPv4 or IPv6 address.
pub fn reverse_pointer_name_from_literal(literal: &str) -> Result<String, DnsLookupError> {
    let ip = parse_ip_literal(literal)?;
    Ok(reverse_pointer_name(ip))
}

pub(crate) fn parse_ip_literal(literal: &str) -> Result<IpAddr, DnsLookupError> {
    literal.trim().parse::<IpAddr>().map_err(|e| {
        DnsLookupError::resolution(
            literal,
            anyhow::Error::new(e).context("invalid IP address literal"),
        )
    })
}

fn reverse_ipv4_name(ip: Ipv4Addr) -> String {
    let [a, b, c, d] = ip.octets();
    format!("{d}.{c}.{b}.{a}.{IPV4_REVERSE_ZONE}")
}

fn reverse_ipv6_name(ip: Ipv6Addr) -> String {
    let nibbles: String = expand_ipv6(ip).chars().filter(|c| *c != ':').collect();
    let mut name = String::with_capacity(nibbles.len() * 2 + IPV6_REVERSE_ZONE.len());
    for nibble in nibbles.chars().rev() {
        name.push(nibble);
        name.push('.');
    }
    name.push_str(IPV6_REVERSE_ZONE);
    name
}

/// Renders `ip` as eight zero-padded lowercase hex groups joined by `:`.
///
/// ```
/// use spf_dns::dns::expand_ipv6;
///
/// let ip = "2001:db8::1".parse().unwrap();
/// assert_eq!(expand_ipv6(ip), "2001:0db8:0000:0000:0000:0000:0000:0001");
/// ```
pub fn expand_ipv6(ip: Ipv6Addr) -> String {
    ip.segments()
        .iter()
        .map(|segment| format!("{segment:04x}"))
        .collect::<Vec<_>>()
        .join(":")
}
