//! # Endpoint Handle
//!
//! Binds one endpoint to one backend and runs the record lifecycle over it.
//!
//! ## Design Principles
//!
//! 1. **Hydrate Then Ready**: `open` either returns a ready handle or an
//!    error; there is no half-built handle.
//! 2. **Lazy Expiry**: Stale records are purged when the handle opens and
//!    whenever a read or update finds them, never in the background.
//! 3. **Re-Read Before Acting**: Every operation consults the backend; the
//!    cached record is a convenience view, not the source of truth.
//! 4. **Rejections vs. Outcomes**: Bad input and unreadable data are `Err`;
//!    absence is `Ok(Outcome::NotFound)`.
//!
//! ## Concurrency
//!
//! Two handles on the same endpoint are only best-effort consistent. Each
//! re-reads before acting, but there is no compare-and-swap, so the last
//! writer wins.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use skv_common::{Record, SkvError, SkvResult};
use skv_engine::{Clock, RecordStore, Storage, SystemClock, is_stale};

use crate::config::{HandleConfig, PartialConfig};
use crate::outcome::Outcome;

/// A ready handle on one endpoint.
pub struct EndpointHandle {
    config: HandleConfig,
    store: RecordStore,
    clock: Arc<dyn Clock>,
    record: Option<Record>,
}

impl EndpointHandle {
    /// Opens a handle using the system clock.
    pub async fn open(storage: &Storage, config: PartialConfig) -> SkvResult<Self> {
        Self::open_with_clock(storage, config, Arc::new(SystemClock)).await
    }

    /// Opens a handle: validates config, hydrates, purges a stale record.
    ///
    /// # Errors
    ///
    /// `Config` when the endpoint is missing, `InvalidPayload` when a
    /// configured `init_as` is unusable, `Backend` on host failure.
    pub async fn open_with_clock(
        storage: &Storage,
        config: PartialConfig,
        clock: Arc<dyn Clock>,
    ) -> SkvResult<Self> {
        let config = config.into_config()?;
        let store = storage.resolve(config.backend);
        let mut handle = EndpointHandle {
            config,
            store,
            clock,
            record: None,
        };
        let existed = handle.hydrate()?;

        if !existed {
            if let Some(initial) = handle.config.init_as.clone() {
                debug!(endpoint = handle.endpoint(), "writing initial payload");
                handle.set(initial).await?;
            }
        }
        Ok(handle)
    }

    /// Loads the stored record into the cache. Returns whether the backend
    /// held a value for the endpoint at all.
    fn hydrate(&mut self) -> SkvResult<bool> {
        let endpoint = self.config.endpoint.clone();
        if !self.store.exists(&endpoint)? {
            debug!(endpoint = %endpoint, backend = %self.store.kind(), "hydrate: no record");
            return Ok(false);
        }

        match self.store.read(&endpoint) {
            Ok(record) => {
                if is_stale(&record, self.config.time_to_live, self.clock.now_millis()) {
                    self.purge(&record)?;
                } else {
                    debug!(endpoint = %endpoint, created_at = record.created_at, "hydrate: adopted record");
                    self.record = Some(record);
                }
            }
            Err(SkvError::CorruptRecord { raw, reason, .. }) => {
                // Stored bytes stay in place for the caller to inspect.
                warn!(endpoint = %endpoint, %reason, raw = %raw, "hydrate: unreadable record treated as absent");
            }
            Err(err) => return Err(err),
        }
        Ok(true)
    }

    fn purge(&mut self, record: &Record) -> SkvResult<()> {
        info!(
            endpoint = self.config.endpoint.as_str(),
            created_at = record.created_at,
            "purging expired record"
        );
        self.store.delete(&self.config.endpoint)?;
        self.record = None;
        Ok(())
    }

    /// Reads the current record, purging it if stale.
    fn load_fresh(&mut self) -> SkvResult<Option<Record>> {
        if !self.store.exists(&self.config.endpoint)? {
            self.record = None;
            return Ok(None);
        }
        let record = self.store.read(&self.config.endpoint)?;
        if is_stale(&record, self.config.time_to_live, self.clock.now_millis()) {
            self.purge(&record)?;
            return Ok(None);
        }
        Ok(Some(record))
    }

    fn validate_payload<P: Serialize>(payload: P) -> SkvResult<Value> {
        match serde_json::to_value(payload) {
            Ok(Value::Null) => Err(SkvError::InvalidPayload("no data provided".to_string())),
            Ok(value) => Ok(value),
            Err(err) => Err(SkvError::InvalidPayload(err.to_string())),
        }
    }

    pub fn config(&self) -> &HandleConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// The record as of the last hydration, read, or write.
    pub fn cached(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    /// True iff the backend holds a value for this endpoint right now.
    pub async fn check(&self) -> SkvResult<bool> {
        self.store.exists(&self.config.endpoint)
    }

    /// True iff a fresh, readable record with a non-null payload exists.
    ///
    /// A stale record reports false but is left for `get`/`update`/`remove`
    /// to purge; this stays a read-only query like `check`.
    pub async fn check_data(&self) -> SkvResult<bool> {
        match self.store.read(&self.config.endpoint) {
            Ok(record) => Ok(!record.payload.is_null()
                && !is_stale(&record, self.config.time_to_live, self.clock.now_millis())),
            Err(SkvError::NotFound { .. } | SkvError::CorruptRecord { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Creates or replaces the record with a fresh timestamp.
    ///
    /// # Errors
    ///
    /// `InvalidPayload` when `payload` serializes to `null` or fails to
    /// serialize; stored state is left untouched.
    pub async fn set<P: Serialize>(&mut self, payload: P) -> SkvResult<Record> {
        let payload = Self::validate_payload(payload)?;
        let record = Record::new(
            self.config.endpoint.clone(),
            payload,
            self.clock.now_millis(),
        );
        self.store.write(&self.config.endpoint, &record)?;
        self.record = Some(record.clone());
        Ok(record)
    }

    /// Reads the stored record.
    ///
    /// # Errors
    ///
    /// `CorruptRecord` when the stored string cannot be decoded.
    pub async fn get(&mut self) -> SkvResult<Outcome<Record>> {
        match self.load_fresh()? {
            Some(record) => {
                self.record = Some(record.clone());
                Ok(Outcome::Done(record))
            }
            None => Ok(Outcome::not_found(&self.config.endpoint)),
        }
    }

    /// Replaces the payload of an existing record.
    ///
    /// With `touch_created_at` the creation time moves to now, but never
    /// backwards. An absent endpoint resolves `NotFound` without writing.
    ///
    /// # Errors
    ///
    /// `InvalidPayload` (checked before the backend is consulted) or
    /// `CorruptRecord`.
    pub async fn update<P: Serialize>(
        &mut self,
        payload: P,
        touch_created_at: bool,
    ) -> SkvResult<Outcome<Record>> {
        let payload = Self::validate_payload(payload)?;
        let Some(mut record) = self.load_fresh()? else {
            return Ok(Outcome::not_found(&self.config.endpoint));
        };

        record.payload = payload;
        if touch_created_at {
            record.created_at = record.created_at.max(self.clock.now_millis());
        }
        self.store.write(&self.config.endpoint, &record)?;
        self.record = Some(record.clone());
        Ok(Outcome::Done(record))
    }

    /// Deletes the record.
    ///
    /// A stale record is purged and resolves `NotFound`, as it would for
    /// `get`. Unreadable bytes are deleted on request, after logging them.
    pub async fn remove(&mut self) -> SkvResult<Outcome<()>> {
        let endpoint = self.config.endpoint.clone();
        if !self.store.exists(&endpoint)? {
            self.record = None;
            return Ok(Outcome::not_found(&endpoint));
        }

        match self.store.read(&endpoint) {
            Ok(record) if is_stale(&record, self.config.time_to_live, self.clock.now_millis()) => {
                self.purge(&record)?;
                return Ok(Outcome::not_found(&endpoint));
            }
            Ok(_) => {}
            Err(SkvError::CorruptRecord { raw, reason, .. }) => {
                warn!(endpoint = %endpoint, %reason, raw = %raw, "removing unreadable record");
            }
            Err(err) => return Err(err),
        }
        self.store.delete(&endpoint)?;
        self.record = None;
        Ok(Outcome::Done(()))
    }
}

impl std::fmt::Debug for EndpointHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointHandle")
            .field("config", &self.config)
            .field("record", &self.record)
            .finish_non_exhaustive()
    }
}
