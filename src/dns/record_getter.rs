//! Lookup contract consumed by SPF and DKIM evaluators.
//!
//! Evaluators depend on [`RecordGetter`] instead of a concrete facade so a
//! test double or an alternative budgeting policy can stand in for
//! [`DnsRecordGetter`](crate::dns::DnsRecordGetter).

use std::net::IpAddr;

use async_trait::async_trait;

use crate::error_handling::DnsLookupError;

/// Typed DNS lookups plus lookup-budget bookkeeping.
///
/// Lookup methods never charge the budget; the evaluator calls
/// [`count_lookup`](RecordGetter::count_lookup) once per DNS-querying term.
#[async_trait]
pub trait RecordGetter: Send + Sync {
    /// Lowercased SPF records published at `domain`.
    async fn get_spf_records(&self, domain: &str) -> Result<Vec<String>, DnsLookupError>;

    /// Lowercased DKIM key records for `selector` at `domain`.
    async fn get_dkim_records(
        &self,
        domain: &str,
        selector: &str,
    ) -> Result<Vec<String>, DnsLookupError>;

    /// Address literals of `domain`; A records only when `ipv4_only` is set.
    async fn resolve_addresses(
        &self,
        domain: &str,
        ipv4_only: bool,
    ) -> Result<Vec<String>, DnsLookupError>;

    /// MX target host names of `domain`.
    async fn resolve_mail_exchangers(&self, domain: &str) -> Result<Vec<String>, DnsLookupError>;

    /// PTR names of `ip`, at most `PTR_RESULT_LIMIT`.
    async fn resolve_pointer(&self, ip: IpAddr) -> Result<Vec<String>, DnsLookupError>;

    /// PTR names of an address given as text.
    async fn resolve_pointer_literal(&self, literal: &str) -> Result<Vec<String>, DnsLookupError>;

    /// Whether `domain` has at least one A record; failures read as `false`.
    async fn exists(&self, domain: &str) -> bool;

    /// Charges one lookup and returns the new count.
    fn count_lookup(&self) -> Result<usize, DnsLookupError>;

    /// Starts a fresh budget for a new top-level evaluation.
    fn reset_lookup_count(&self);

    /// Lookups charged since the last reset.
    fn lookup_count(&self) -> usize;

    /// Enables or disables failing on the budget.
    fn set_lookup_limit_enforcement(&self, enabled: bool);
}
