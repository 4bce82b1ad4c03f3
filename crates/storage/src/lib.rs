//! In-memory audit trail pairing each dispatched interaction with the
//! response produced for it.
//!
//! Records live for a fixed retention window. There is no background timer:
//! every [`CorrelationStore::lookup`] sweeps the whole set first, so an
//! expired record is never returned.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use shared::{
    domain::InteractionId,
    protocol::{InteractionEnvelope, InteractionResponse},
};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_RETENTION_SECONDS: i64 = 900;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRecord {
    pub request: InteractionEnvelope,
    pub response: InteractionResponse,
    pub timestamp: DateTime<Utc>,
}

impl CorrelationRecord {
    fn is_expired(&self, now: DateTime<Utc>, retention: Duration) -> bool {
        now - self.timestamp >= retention
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("interaction {id} does not exist")]
    NotFound { id: InteractionId },
}

pub struct CorrelationStore {
    retention: Duration,
    records: Mutex<Vec<CorrelationRecord>>,
}

impl Default for CorrelationStore {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_RETENTION_SECONDS))
    }
}

impl CorrelationStore {
    pub fn new(retention: Duration) -> Self {
        Self {
            retention,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn retention(&self) -> Duration {
        self.retention
    }

    pub fn record(&self, request: InteractionEnvelope, response: InteractionResponse) {
        self.record_at(request, response, Utc::now());
    }

    pub fn record_at(
        &self,
        request: InteractionEnvelope,
        response: InteractionResponse,
        now: DateTime<Utc>,
    ) {
        let id = request.id.clone();
        let mut records = self.records.lock();
        records.push(CorrelationRecord {
            request,
            response,
            timestamp: now,
        });
        debug!(%id, held = records.len(), "recorded interaction");
    }

    pub fn lookup(&self, id: &InteractionId) -> Result<CorrelationRecord, StoreError> {
        self.lookup_at(id, Utc::now())
    }

    /// Drops every expired record, then returns the newest survivor with `id`.
    ///
    /// Sweep and search happen under one lock so a concurrent `record` can
    /// neither be lost nor observe a half-filtered set.
    pub fn lookup_at(
        &self,
        id: &InteractionId,
        now: DateTime<Utc>,
    ) -> Result<CorrelationRecord, StoreError> {
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|record| !record.is_expired(now, self.retention));
        let evicted = before - records.len();
        if evicted > 0 {
            debug!(evicted, held = records.len(), "evicted expired interactions");
        }

        records
            .iter()
            .rev()
            .find(|record| &record.request.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })
    }

    /// Number of held records, expired or not. Does not sweep.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
