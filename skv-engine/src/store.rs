//! # Record Store Adapter
//!
//! Resolves a [`BackendKind`] to one of the two host stores and moves whole
//! [`Record`]s in and out of it.
//!
//! ## Design Principles
//!
//! 1. **Exactly Two Stores**: `Storage` owns one durable and one session
//!    backend; resolution never creates a third.
//! 2. **One Key**: Every `RecordStore` call touches only the key it is given.
//! 3. **Report, Don't Crash**: Undecodable strings become `CorruptRecord`
//!    carrying the raw bytes.

use std::sync::Arc;

use tracing::debug;

use skv_common::{BackendKind, Record, SkvError, SkvResult};

use crate::engine::Backend;
use crate::memory::MemoryBackend;

/// The pair of host stores available to handles.
#[derive(Clone)]
pub struct Storage {
    durable: Arc<dyn Backend>,
    session: Arc<dyn Backend>,
}

impl Storage {
    /// Builds storage over caller-supplied host backends.
    pub fn new(durable: Arc<dyn Backend>, session: Arc<dyn Backend>) -> Self {
        Storage { durable, session }
    }

    /// Builds storage over two fresh in-memory backends.
    pub fn memory() -> Self {
        Storage::new(Arc::new(MemoryBackend::new()), Arc::new(MemoryBackend::new()))
    }

    /// Returns the adapter for the given backend kind.
    pub fn resolve(&self, kind: BackendKind) -> RecordStore {
        let backend = match kind {
            BackendKind::Durable => Arc::clone(&self.durable),
            BackendKind::Session => Arc::clone(&self.session),
        };
        RecordStore { kind, backend }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Storage::memory()
    }
}

/// Record-level access to one resolved backend.
#[derive(Clone)]
pub struct RecordStore {
    kind: BackendKind,
    backend: Arc<dyn Backend>,
}

impl RecordStore {
    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Returns true iff the backend currently holds a value for `key`.
    pub fn exists(&self, key: &str) -> SkvResult<bool> {
        self.backend.contains(key)
    }

    /// Reads and decodes the record under `key`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the key is absent, `CorruptRecord` when the stored
    /// string does not decode into a record for `key`.
    pub fn read(&self, key: &str) -> SkvResult<Record> {
        let raw = self
            .backend
            .get(key)?
            .ok_or_else(|| SkvError::not_found(key))?;
        Record::decode(key, &raw)
    }

    /// Encodes and stores `record` under `key`, overwriting any value.
    pub fn write(&self, key: &str, record: &Record) -> SkvResult<()> {
        let raw = record.encode()?;
        debug!(backend = %self.kind, endpoint = key, bytes = raw.len(), "write record");
        self.backend.set(key, raw)
    }

    /// Removes `key`. Absent keys are a no-op.
    pub fn delete(&self, key: &str) -> SkvResult<()> {
        debug!(backend = %self.kind, endpoint = key, "delete record");
        self.backend.delete(key)
    }
}
