//! DNS transport abstraction.
//!
//! The lookup facade never talks to the network directly; it asks a
//! [`DnsTransport`] for raw answers and shapes them itself. This keeps the
//! facade testable with a scripted transport and lets callers plug in any
//! resolver library.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use anyhow::Result;
use async_trait::async_trait;

/// Record types the facade asks a transport for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Txt,
    Soa,
    A,
    Aaaa,
    Mx,
    Ptr,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Txt => "TXT",
            RecordKind::Soa => "SOA",
            RecordKind::A => "A",
            RecordKind::Aaaa => "AAAA",
            RecordKind::Mx => "MX",
            RecordKind::Ptr => "PTR",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single answer record, tagged with its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// TXT record with its character strings concatenated.
    Txt(String),
    /// SOA record; only its presence matters to the facade.
    Soa,
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    /// MX record. `exchange` has no trailing root dot.
    Mx { preference: u16, exchange: String },
    /// PTR target without the trailing root dot.
    Ptr(String),
}

impl Answer {
    pub fn kind(&self) -> RecordKind {
        match self {
            Answer::Txt(_) => RecordKind::Txt,
            Answer::Soa => RecordKind::Soa,
            Answer::A(_) => RecordKind::A,
            Answer::Aaaa(_) => RecordKind::Aaaa,
            Answer::Mx { .. } => RecordKind::Mx,
            Answer::Ptr(_) => RecordKind::Ptr,
        }
    }
}

/// Source of raw DNS answers.
///
/// Implementations must keep "the query succeeded with zero answers"
/// (`Ok(vec![])`) apart from "the query failed" (`Err`). When several kinds
/// are requested, answers come back grouped in the order the kinds were given.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Queries `name` for every record kind in `kinds`.
    async fn query(&self, name: &str, kinds: &[RecordKind]) -> Result<Vec<Answer>>;
}

#[async_trait]
impl<T: DnsTransport + ?Sized> DnsTransport for std::sync::Arc<T> {
    async fn query(&self, name: &str, kinds: &[RecordKind]) -> Result<Vec<Answer>> {
        (**self).query(name, kinds).await
    }
}
