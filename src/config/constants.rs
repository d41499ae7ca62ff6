//! Configuration constants.
//!
//! This module defines the protocol limits and DNS defaults used by the
//! lookup facade.

/// Maximum number of DNS-querying mechanisms per SPF evaluation (RFC 7208 section 4.6.4).
pub const DNS_LOOKUP_LIMIT: usize = 10;

/// Maximum number of PTR targets returned by a reverse lookup.
///
/// Answers beyond this are dropped so a stuffed PTR RRset cannot
/// multiply follow-up lookups.
pub const PTR_RESULT_LIMIT: usize = 10;

/// Version marker that identifies SPF TXT records (compared case-insensitively).
pub const SPF_VERSION_MARKER: &str = "v=spf1";

/// Version marker that identifies DKIM key TXT records (compared case-insensitively).
pub const DKIM_VERSION_MARKER: &str = "v=dkim1";

/// Label placed between the DKIM selector and the signing domain.
pub const DKIM_DOMAIN_LABEL: &str = "_domainkey";

/// Reverse-lookup zone for IPv4 addresses.
pub const IPV4_REVERSE_ZONE: &str = "in-addr.arpa";

/// Reverse-lookup zone for IPv6 addresses.
pub const IPV6_REVERSE_ZONE: &str = "ip6.arpa";

// Network operation timeouts
/// DNS query timeout in seconds
/// Most DNS queries complete in <1s, 3s provides good buffer while failing fast
pub const DNS_TIMEOUT_SECS: u64 = 3;
/// Number of attempts the resolver makes per query before giving up
pub const DNS_ATTEMPTS: usize = 2;
