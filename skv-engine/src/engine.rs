//! # Storage Backend Interface
//!
//! ## Design Principles
//!
//! 1. **Strategy Pattern**: Abstract the host store behind a trait so the
//!    in-memory backend and real host bindings are interchangeable.
//! 2. **String In, String Out**: The host only understands string keys and
//!    string values; record encoding happens one layer up.
//! 3. **Synchronous**: Calls never block or suspend, so handles can expose
//!    them through futures without a runtime-specific executor.

use skv_common::SkvResult;

/// Strategy pattern: the raw get/set/delete surface of one host store.
///
/// Each backend kind is an isolated instance; keys never leak across them.
pub trait Backend: Send + Sync {
    /// Returns the stored string, or `None` when the key is absent.
    fn get(&self, key: &str) -> SkvResult<Option<String>>;

    /// Inserts or replaces the value for a key.
    fn set(&self, key: &str, value: String) -> SkvResult<()>;

    /// Removes a key. Absent keys are a no-op.
    fn delete(&self, key: &str) -> SkvResult<()>;

    /// Returns true if the key currently holds a value.
    fn contains(&self, key: &str) -> SkvResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
