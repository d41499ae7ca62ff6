//! Budget-aware DNS lookup facade for SPF and DKIM evaluation.
//!
//! [`DnsRecordGetter`] turns typed questions ("which SPF records does this
//! domain publish?") into raw transport queries and reduces the answers to
//! the minimal values an evaluator needs. It also owns the evaluation's
//! [`LookupSession`].
//!
//! None of the lookup methods charge the budget. RFC 7208 counts per
//! mechanism, not per query, so the evaluator calls
//! [`DnsRecordGetter::count_lookup`] for each term that requires DNS.

use std::net::IpAddr;

use async_trait::async_trait;

use crate::config::{DKIM_DOMAIN_LABEL, PTR_RESULT_LIMIT};
use crate::dns::extract::{filter_marked_records, is_dkim_record, is_spf_record};
use crate::dns::reverse::{parse_ip_literal, reverse_pointer_name};
use crate::dns::session::LookupSession;
use crate::dns::record_getter::RecordGetter;
use crate::dns::transport::{Answer, DnsTransport, RecordKind};
use crate::error_handling::DnsLookupError;

/// Typed DNS lookups plus lookup-budget bookkeeping for one evaluation.
///
/// # Examples
///
/// ```no_run
/// use spf_dns::dns::{DnsRecordGetter, HickoryTransport};
/// use spf_dns::initialization::init_resolver;
/// use spf_dns::ResolverSettings;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let resolver = init_resolver(&ResolverSettings::default())?;
/// let getter = DnsRecordGetter::new(HickoryTransport::new(resolver));
///
/// getter.reset_lookup_count();
/// let records = getter.get_spf_records("example.com").await?;
/// for record in records {
///     println!("{record}");
/// }
/// # Ok(())
/// # }
/// ```
pub struct DnsRecordGetter<T> {
    transport: T,
    session: LookupSession,
}

impl<T: DnsTransport> DnsRecordGetter<T> {
    /// Creates a facade with a fresh session (count 0, enforcement on).
    pub fn new(transport: T) -> Self {
        Self::with_session(transport, LookupSession::new())
    }

    /// Creates a facade around an existing session, e.g. one with a custom limit.
    pub fn with_session(transport: T, session: LookupSession) -> Self {
        DnsRecordGetter { transport, session }
    }

    /// The transport answering this facade's queries.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The lookup budget of the current evaluation.
    pub fn session(&self) -> &LookupSession {
        &self.session
    }

    async fn query(&self, name: &str, kinds: &[RecordKind]) -> Result<Vec<Answer>, DnsLookupError> {
        log::debug!("Querying {name} for {kinds:?}");
        self.transport
            .query(name, kinds)
            .await
            .map_err(|e| DnsLookupError::resolution(name, e))
    }

    async fn txt_values(
        &self,
        name: &str,
        kinds: &[RecordKind],
    ) -> Result<Vec<String>, DnsLookupError> {
        let answers = self.query(name, kinds).await?;
        Ok(answers
            .into_iter()
            .filter_map(|answer| match answer {
                Answer::Txt(txt) => Some(txt),
                _ => None,
            })
            .collect())
    }

    /// Returns the lowercased SPF records published at `domain`.
    ///
    /// SOA is queried alongside TXT so the transport can settle a negative
    /// answer. Zero matching records is a successful empty result.
    ///
    /// The SOA answers themselves are discarded, and a failed SOA query fails
    /// the whole lookup even when TXT succeeded. Both are intentional: a zone
    /// whose SOA cannot be fetched is treated as a temporary failure.
    ///
    /// # Errors
    ///
    /// Returns `DnsLookupError::Resolution` if the transport fails.
    pub async fn get_spf_records(&self, domain: &str) -> Result<Vec<String>, DnsLookupError> {
        let values = self
            .txt_values(domain, &[RecordKind::Txt, RecordKind::Soa])
            .await?;
        Ok(filter_marked_records(values, is_spf_record))
    }

    /// Returns the lowercased DKIM key records at `selector._domainkey.domain`.
    ///
    /// # Errors
    ///
    /// Returns `DnsLookupError::Resolution` if the transport fails.
    pub async fn get_dkim_records(
        &self,
        domain: &str,
        selector: &str,
    ) -> Result<Vec<String>, DnsLookupError> {
        let name = dkim_query_name(domain, selector);
        let values = self.txt_values(&name, &[RecordKind::Txt]).await?;
        Ok(filter_marked_records(values, is_dkim_record))
    }

    /// Resolves `domain` to address literals in answer order.
    ///
    /// Only A records are queried when `ipv4_only` is set; otherwise A and
    /// AAAA answers are both returned.
    ///
    /// # Errors
    ///
    /// Returns `DnsLookupError::Resolution` if the transport fails.
    pub async fn resolve_addresses(
        &self,
        domain: &str,
        ipv4_only: bool,
    ) -> Result<Vec<String>, DnsLookupError> {
        let kinds: &[RecordKind] = if ipv4_only {
            &[RecordKind::A]
        } else {
            &[RecordKind::A, RecordKind::Aaaa]
        };
        let answers = self.query(domain, kinds).await?;
        Ok(answers
            .into_iter()
            .filter_map(|answer| match answer {
                Answer::A(ip) => Some(ip.to_string()),
                Answer::Aaaa(ip) if !ipv4_only => Some(ip.to_string()),
                _ => None,
            })
            .collect())
    }

    /// Returns the MX target host names of `domain`, preference discarded.
    ///
    /// # Errors
    ///
    /// Returns `DnsLookupError::Resolution` if the transport fails.
    pub async fn resolve_mail_exchangers(
        &self,
        domain: &str,
    ) -> Result<Vec<String>, DnsLookupError> {
        let answers = self.query(domain, &[RecordKind::Mx]).await?;
        Ok(answers
            .into_iter()
            .filter_map(|answer| match answer {
                Answer::Mx { exchange, .. } => Some(exchange),
                _ => None,
            })
            .collect())
    }

    /// Returns at most `PTR_RESULT_LIMIT` PTR names for `ip`.
    ///
    /// An empty answer is a successful empty result.
    ///
    /// # Errors
    ///
    /// Returns `DnsLookupError::Resolution` if the transport fails.
    pub async fn resolve_pointer(&self, ip: IpAddr) -> Result<Vec<String>, DnsLookupError> {
        let name = reverse_pointer_name(ip);
        let answers = self.query(&name, &[RecordKind::Ptr]).await?;
        Ok(answers
            .into_iter()
            .filter_map(|answer| match answer {
                Answer::Ptr(target) => Some(target),
                _ => None,
            })
            .take(PTR_RESULT_LIMIT)
            .collect())
    }

    /// [`resolve_pointer`](Self::resolve_pointer) for an address received as text.
    ///
    /// # Errors
    ///
    /// Returns `DnsLookupError::Resolution` if `literal` is not an IP address
    /// or the transport fails.
    pub async fn resolve_pointer_literal(
        &self,
        literal: &str,
    ) -> Result<Vec<String>, DnsLookupError> {
        let ip = parse_ip_literal(literal)?;
        self.resolve_pointer(ip).await
    }

    /// Returns `true` if `domain` has at least one A record.
    ///
    /// Resolution failures count as nonexistence and are not propagated.
    pub async fn exists(&self, domain: &str) -> bool {
        match self.resolve_addresses(domain, true).await {
            Ok(addresses) => !addresses.is_empty(),
            Err(e) => {
                log::debug!("Existence check for {domain} treated as absent: {e:#}");
                false
            }
        }
    }

    /// Charges one lookup to the session budget. See [`LookupSession::count_lookup`].
    pub fn count_lookup(&self) -> Result<usize, DnsLookupError> {
        self.session.count_lookup()
    }

    /// Resets the budget. Call once per top-level SPF check, never for
    /// nested `include` or `redirect` evaluation.
    pub fn reset_lookup_count(&self) {
        self.session.reset();
    }

    /// Lookups charged since the last reset.
    pub fn lookup_count(&self) -> usize {
        self.session.count()
    }

    /// Enables or disables failing on the budget (enabled by default).
    pub fn set_lookup_limit_enforcement(&self, enabled: bool) {
        self.session.set_enforcement(enabled);
    }
}

#[async_trait]
impl<T: DnsTransport> RecordGetter for DnsRecordGetter<T> {
    async fn get_spf_records(&self, domain: &str) -> Result<Vec<String>, DnsLookupError> {
        DnsRecordGetter::get_spf_records(self, domain).await
    }

    async fn get_dkim_records(
        &self,
        domain: &str,
        selector: &str,
    ) -> Result<Vec<String>, DnsLookupError> {
        DnsRecordGetter::get_dkim_records(self, domain, selector).await
    }

    async fn resolve_addresses(
        &self,
        domain: &str,
        ipv4_only: bool,
    ) -> Result<Vec<String>, DnsLookupError> {
        DnsRecordGetter::resolve_addresses(self, domain, ipv4_only).await
    }

    async fn resolve_mail_exchangers(&self, domain: &str) -> Result<Vec<String>, DnsLookupError> {
        DnsRecordGetter::resolve_mail_exchangers(self, domain).await
    }

    async fn resolve_pointer(&self, ip: IpAddr) -> Result<Vec<String>, DnsLookupError> {
        DnsRecordGetter::resolve_pointer(self, ip).await
    }

    async fn resolve_pointer_literal(&self, literal: &str) -> Result<Vec<String>, DnsLookupError> {
        DnsRecordGetter::resolve_pointer_literal(self, literal).await
    }

    async fn exists(&self, domain: &str) -> bool {
        DnsRecordGetter::exists(self, domain).await
    }

    fn count_lookup(&self) -> Result<usize, DnsLookupError> {
        DnsRecordGetter::count_lookup(self)
    }

    fn reset_lookup_count(&self) {
        DnsRecordGetter::reset_lookup_count(self)
    }

    fn lookup_count(&self) -> usize {
        DnsRecordGetter::lookup_count(self)
    }

    fn set_lookup_limit_enforcement(&self, enabled: bool) {
        DnsRecordGetter::set_lookup_limit_enforcement(self, enabled)
    }
}

/// Query name holding DKIM keys for `selector` at `domain`.
pub fn dkim_query_name(domain: &str, selector: &str) -> String {
    format!("{selector}.{DKIM_DOMAIN_LABEL}.{domain}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dkim_query_name() {
        assert_eq!(
            dkim_query_name("example.com", "s1"),
            "s1._domainkey.example.com"
        );
    }
}
