//! DNS lookups for SPF and DKIM evaluation.
//!
//! This module provides:
//! - A transport abstraction (`DnsTransport`) and its `hickory-resolver` implementation
//! - SPF/DKIM TXT record filtering by version marker
//! - Reverse-lookup name construction for IPv4 and IPv6
//! - The lookup budget (`LookupSession`) and the facade that ties it together
//!   (`DnsRecordGetter`), exposed to evaluators through `RecordGetter`

mod extract;
mod getter;
mod hickory;
mod record_getter;
mod reverse;
mod session;
mod transport;

// Re-export public API
pub use extract::{filter_marked_records, has_version_marker, is_dkim_record, is_spf_record};
pub use getter::{dkim_query_name, DnsRecordGetter};
pub use hickory::HickoryTransport;
pub use record_getter::RecordGetter;
pub use reverse::{expand_ipv6, reverse_pointer_name, reverse_pointer_name_from_literal};
pub use session::LookupSession;
pub use transport::{Answer, DnsTransport, RecordKind};
