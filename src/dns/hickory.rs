//! `hickory-resolver` backed DNS transport.
//!
//! One lookup is issued per requested record type. NXDOMAIN and NODATA
//! answers become empty answer sets; every other resolver error is a
//! transport failure.

use std::sync::Arc;

use anyhow::{Error, Result};
use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::TokioAsyncResolver;

use crate::dns::transport::{Answer, DnsTransport, RecordKind};

/// Production transport over a shared `TokioAsyncResolver`.
#[derive(Clone)]
pub struct HickoryTransport {
    resolver: Arc<TokioAsyncResolver>,
}

impl HickoryTransport {
    pub fn new(resolver: Arc<TokioAsyncResolver>) -> Self {
        HickoryTransport { resolver }
    }

    async fn lookup_kind(&self, name: &str, kind: RecordKind) -> Result<Vec<Answer>> {
        match self.resolver.lookup(name, record_type(kind)).await {
            Ok(lookup) => Ok(lookup.iter().filter_map(to_answer).collect()),
            Err(e) if is_negative_answer(&e) => {
                log::debug!("No {kind} records for {name}: {e}");
                Ok(Vec::new())
            }
            Err(e) => {
                let error_msg = e.to_string();
                if error_msg.contains("timeout") || error_msg.contains("timed out") {
                    log::warn!("{kind} record lookup timed out for {name}: {e}");
                } else {
                    log::warn!("Failed to lookup {kind} records for {name}: {e}");
                }
                Err(Error::new(e).context(format!("{kind} lookup for {name} failed")))
            }
        }
    }
}

#[async_trait]
impl DnsTransport for HickoryTransport {
    async fn query(&self, name: &str, kinds: &[RecordKind]) -> Result<Vec<Answer>> {
        let mut answers = Vec::new();
        for kind in kinds {
            answers.extend(self.lookup_kind(name, *kind).await?);
        }
        Ok(answers)
    }
}

fn record_type(kind: RecordKind) -> RecordType {
    match kind {
        RecordKind::Txt => RecordType::TXT,
        RecordKind::Soa => RecordType::SOA,
        RecordKind::A => RecordType::A,
        RecordKind::Aaaa => RecordType::AAAA,
        RecordKind::Mx => RecordType::MX,
        RecordKind::Ptr => RecordType::PTR,
    }
}

/// NXDOMAIN and NODATA both surface as `NoRecordsFound`.
fn is_negative_answer(e: &ResolveError) -> bool {
    matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. })
}

fn to_answer(rdata: &RData) -> Option<Answer> {
    match rdata {
        RData::TXT(txt) => {
            // TXT records can be split across multiple character strings, join them
            let text = txt
                .iter()
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .collect::<Vec<String>>()
                .join("");
            Some(Answer::Txt(text))
        }
        RData::SOA(_) => Some(Answer::Soa),
        RData::A(a) => Some(Answer::A(a.0)),
        RData::AAAA(aaaa) => Some(Answer::Aaaa(aaaa.0)),
        RData::MX(mx) => Some(Answer::Mx {
            preference: mx.preference(),
            exchange: host_name(&mx.exchange().to_utf8()),
        }),
        RData::PTR(ptr) => Some(Answer::Ptr(host_name(&ptr.0.to_utf8()))),
        _ => None,
    }
}

fn host_name(fqdn: &str) -> String {
    fqdn.trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_resolver::proto::op::{Query, ResponseCode};
    use hickory_resolver::proto::rr::rdata::{A, AAAA, MX, PTR, TXT};
    use hickory_resolver::proto::rr::Name;
    use std::net::{Ipv4Addr, Ipv6Addr};
    use std::str::FromStr;

    #[test]
    fn test_record_type_mapping() {
        assert_eq!(record_type(RecordKind::Txt), RecordType::TXT);
        assert_eq!(record_type(RecordKind::Soa), RecordType::SOA);
        assert_eq!(record_type(RecordKind::Aaaa), RecordType::AAAA);
        assert_eq!(record_type(RecordKind::Ptr), RecordType::PTR);
    }

    #[test]
    fn test_txt_strings_are_joined() {
        let rdata = RData::TXT(TXT::new(vec![
            "v=spf1 include:a.example.com ".to_string(),
            "-all".to_string(),
        ]));
        assert_eq!(
            to_answer(&rdata),
            Some(Answer::Txt("v=spf1 include:a.example.com -all".to_string()))
        );
    }

    #[test]
    fn test_address_answers() {
        let v4 = Ipv4Addr::new(192, 0, 2, 1);
        assert_eq!(to_answer(&RData::A(A(v4))), Some(Answer::A(v4)));

        let v6: Ipv6Addr = "2001:db8::1".parse().unwrap();
        assert_eq!(to_answer(&RData::AAAA(AAAA(v6))), Some(Answer::Aaaa(v6)));
    }

    #[test]
    fn test_host_names_lose_root_dot() {
        let exchange = Name::from_str("mx1.example.com.").unwrap();
        assert_eq!(
            to_answer(&RData::MX(MX::new(10, exchange))),
            Some(Answer::Mx {
                preference: 10,
                exchange: "mx1.example.com".to_string()
            })
        );

        let target = Name::from_str("host.example.net.").unwrap();
        assert_eq!(
            to_answer(&RData::PTR(PTR(target))),
            Some(Answer::Ptr("host.example.net".to_string()))
        );
    }

    fn no_records(response_code: ResponseCode) -> ResolveError {
        let query = Query::query(Name::from_str("example.com.").unwrap(), RecordType::TXT);
        ResolveErrorKind::NoRecordsFound {
            query: Box::new(query),
            soa: None,
            negative_ttl: None,
            response_code,
            trusted: true,
        }
        .into()
    }

    #[test]
    fn test_nxdomain_is_negative_answer() {
        assert!(is_negative_answer(&no_records(ResponseCode::NXDomain)));
    }

    #[test]
    fn test_nodata_is_negative_answer() {
        assert!(is_negative_answer(&no_records(ResponseCode::NoError)));
    }

    #[test]
    fn test_transport_failure_is_not_negative_answer() {
        let e = ResolveError::from(ResolveErrorKind::Message("connection refused"));
        assert!(!is_negative_answer(&e));

        let e = ResolveError::from(ResolveErrorKind::Timeout);
        assert!(!is_negative_answer(&e));
    }
}
