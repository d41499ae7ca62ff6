// Shared test helpers for facade tests.
//
// `ScriptedTransport` answers from a fixed table and records every query it
// receives, so tests never touch the network.

use std::collections::{HashMap, HashSet};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use spf_dns::dns::{Answer, DnsTransport, RecordKind};

/// In-memory DNS transport with a query log.
#[derive(Default)]
pub struct ScriptedTransport {
    answers: HashMap<(String, RecordKind), Vec<Answer>>,
    failing: HashSet<String>,
    queries: Mutex<Vec<(String, Vec<RecordKind>)>>,
}

#[allow(dead_code)] // Not every test file uses every helper
impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers returned when `name` is queried for `kind`.
    pub fn with(mut self, name: &str, kind: RecordKind, answers: Vec<Answer>) -> Self {
        self.answers
            .entry((name.to_string(), kind))
            .or_default()
            .extend(answers);
        self
    }

    pub fn with_txt(self, name: &str, values: &[&str]) -> Self {
        let answers = values.iter().map(|v| Answer::Txt(v.to_string())).collect();
        self.with(name, RecordKind::Txt, answers)
    }

    pub fn with_a(self, name: &str, addresses: &[Ipv4Addr]) -> Self {
        let answers = addresses.iter().copied().map(Answer::A).collect();
        self.with(name, RecordKind::A, answers)
    }

    pub fn with_aaaa(self, name: &str, addresses: &[Ipv6Addr]) -> Self {
        let answers = addresses.iter().copied().map(Answer::Aaaa).collect();
        self.with(name, RecordKind::Aaaa, answers)
    }

    pub fn with_ptr(self, name: &str, targets: &[String]) -> Self {
        let answers = targets.iter().cloned().map(Answer::Ptr).collect();
        self.with(name, RecordKind::Ptr, answers)
    }

    /// Every query for `name` fails at the transport level.
    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn queries(&self) -> Vec<(String, Vec<RecordKind>)> {
        self.queries.lock().unwrap().clone()
    }

    pub fn queried_kinds(&self) -> Vec<RecordKind> {
        self.queries()
            .into_iter()
            .flat_map(|(_, kinds)| kinds)
            .collect()
    }
}

#[async_trait]
impl DnsTransport for ScriptedTransport {
    async fn query(&self, name: &str, kinds: &[RecordKind]) -> Result<Vec<Answer>> {
        self.queries
            .lock()
            .unwrap()
            .push((name.to_string(), kinds.to_vec()));

        if self.failing.contains(name) {
            return Err(anyhow!("SERVFAIL for {name}"));
        }

        Ok(kinds
            .iter()
            .flat_map(|kind| {
                self.answers
                    .get(&(name.to_string(), *kind))
                    .cloned()
                    .unwrap_or_default()
            })
            .collect())
    }
}
