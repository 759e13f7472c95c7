use crate::clients::LookupSource;
use crate::domain::{LookupDomain, LookupId};
use crate::error::LookupError;
use crate::models::lookup::LookupRow;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Barrier;

pub fn row(id: i64, code: &str, name: &str, is_active: bool) -> LookupRow {
    LookupRow {
        id: LookupId::new(id),
        kind: String::new(),
        code: code.to_string(),
        name: name.to_string(),
        is_active,
    }
}

/// In-memory source that counts fetches per domain.
#[derive(Default)]
pub struct FakeSource {
    rows: Mutex<HashMap<LookupDomain, Vec<LookupRow>>>,
    calls: Mutex<HashMap<LookupDomain, usize>>,
    failing: AtomicBool,
    barrier: Option<Barrier>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fetch waits until `parties` fetches are in flight.
    pub fn with_barrier(parties: usize) -> Self {
        Self {
            barrier: Some(Barrier::new(parties)),
            ..Self::default()
        }
    }

    pub fn set_rows(&self, domain: LookupDomain, rows: Vec<LookupRow>) {
        self.rows.lock().unwrap().insert(domain, rows);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self, domain: LookupDomain) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(&domain)
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl LookupSource for FakeSource {
    async fn fetch_rows(&self, domain: LookupDomain) -> Result<Vec<LookupRow>, LookupError> {
        *self.calls.lock().unwrap().entry(domain).or_default() += 1;

        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(LookupError::transport(domain, "connection refused"));
        }

        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(&domain)
            .cloned()
            .unwrap_or_default())
    }
}
