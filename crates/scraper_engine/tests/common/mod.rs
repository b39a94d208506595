#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Mutex, Once};
use std::time::Duration;

use scraper_engine::{PositionStore, StoreError};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    HashSet { key: String, fields: Vec<(String, String)> },
    Expire { key: String, ttl: Duration },
    SortedSetAdd { key: String, score: u8, member: String },
}

#[derive(Default)]
struct Inner {
    attempted: Vec<Op>,
    fail_at: Option<usize>,
    hashes: HashMap<String, HashMap<String, String>>,
    sorted_sets: HashMap<String, HashMap<String, u8>>,
    ttls: HashMap<String, Duration>,
    pings: usize,
    reconnects: usize,
    ping_fails: bool,
    reconnect_delay: Option<Duration>,
}

/// In-memory store that records every attempted operation.
#[derive(Default)]
pub struct RecordingStore {
    inner: Mutex<Inner>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the attempt with the given zero-based index; later attempts succeed.
    pub fn failing_at(index: usize) -> Self {
        let store = Self::default();
        store.inner.lock().unwrap().fail_at = Some(index);
        store
    }

    /// PING fails and every reconnect takes `delay` before succeeding.
    pub fn unhealthy(self, reconnect_delay: Duration) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.ping_fails = true;
            inner.reconnect_delay = Some(reconnect_delay);
        }
        self
    }

    pub fn attempted(&self) -> Vec<Op> {
        self.inner.lock().unwrap().attempted.clone()
    }

    pub fn hash(&self, key: &str) -> Option<HashMap<String, String>> {
        self.inner.lock().unwrap().hashes.get(key).cloned()
    }

    pub fn score(&self, key: &str, member: &str) -> Option<u8> {
        let inner = self.inner.lock().unwrap();
        inner.sorted_sets.get(key).and_then(|set| set.get(member)).copied()
    }

    pub fn ttl(&self, key: &str) -> Option<Duration> {
        self.inner.lock().unwrap().ttls.get(key).copied()
    }

    pub fn pings(&self) -> usize {
        self.inner.lock().unwrap().pings
    }

    pub fn reconnects(&self) -> usize {
        self.inner.lock().unwrap().reconnects
    }

    fn apply(&self, op: Op) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let index = inner.attempted.len();
        inner.attempted.push(op.clone());
        if inner.fail_at == Some(index) {
            return Err(StoreError::Unavailable(format!("injected failure at op {index}")));
        }
        match op {
            Op::HashSet { key, fields } => {
                inner.hashes.entry(key).or_default().extend(fields);
            }
            Op::Expire { key, ttl } => {
                inner.ttls.insert(key, ttl);
            }
            Op::SortedSetAdd { key, score, member } => {
                inner.sorted_sets.entry(key).or_default().insert(member, score);
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl PositionStore for RecordingStore {
    async fn hash_set(&self, key: &str, fields: &[(&'static str, String)]) -> Result<(), StoreError> {
        self.apply(Op::HashSet {
            key: key.to_string(),
            fields: fields
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        })
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        self.apply(Op::Expire {
            key: key.to_string(),
            ttl,
        })
    }

    async fn sorted_set_add(&self, key: &str, score: u8, member: &str) -> Result<(), StoreError> {
        self.apply(Op::SortedSetAdd {
            key: key.to_string(),
            score,
            member: member.to_string(),
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        inner.pings += 1;
        if inner.ping_fails {
            return Err(StoreError::Unavailable("no PONG".into()));
        }
        Ok(())
    }

    async fn reconnect(&self) -> Result<(), StoreError> {
        let delay = {
            let mut inner = self.inner.lock().unwrap();
            inner.reconnects += 1;
            inner.reconnect_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }
}

/// Polls `condition` every 10ms for up to five seconds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..500 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
