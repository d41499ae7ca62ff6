//! spf_dns library: bounded DNS lookups for SPF and DKIM evaluation
//!
//! This library provides a lookup facade that an SPF (RFC 7208) or DKIM
//! evaluator drives while it walks a policy. The facade:
//! - reduces raw TXT/A/AAAA/MX/PTR answers to the values an evaluator needs
//! - builds `in-addr.arpa` and `ip6.arpa` reverse-lookup names
//! - tracks the RFC 7208 limit of 10 DNS-querying terms per evaluation
//!
//! # Example
//!
//! ```no_run
//! use spf_dns::dns::{DnsRecordGetter, HickoryTransport};
//! use spf_dns::initialization::init_resolver;
//! use spf_dns::{DnsLookupError, ResolverSettings};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = init_resolver(&ResolverSettings::default())?;
//! let getter = DnsRecordGetter::new(HickoryTransport::new(resolver));
//!
//! // Once per top-level check; nested includes share the budget
//! getter.reset_lookup_count();
//! for record in getter.get_spf_records("example.com").await? {
//!     println!("{record}");
//! }
//!
//! // `a` mechanism: charge the budget, then query
//! match getter.count_lookup() {
//!     Ok(_) => {
//!         let addresses = getter.resolve_addresses("example.com", false).await?;
//!         println!("{addresses:?}");
//!     }
//!     Err(DnsLookupError::LookupLimitExceeded { .. }) => println!("permerror"),
//!     Err(e) => return Err(e.into()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! `HickoryTransport` requires a Tokio runtime. Custom transports only need
//! to implement [`dns::DnsTransport`].

pub mod config;
pub mod dns;
mod error_handling;
pub mod initialization;

// Re-export public API
pub use config::{LogFormat, LogLevel, ResolverSettings, DNS_LOOKUP_LIMIT, PTR_RESULT_LIMIT};
pub use dns::{DnsRecordGetter, DnsTransport, HickoryTransport, LookupSession, RecordGetter};
pub use error_handling::{DnsLookupError, InitializationError};
