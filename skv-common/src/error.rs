//! # StashKV Error Types
//!
//! ## Design Principles
//!
//! 1. **Stable Codes**: Each variant has a fixed numeric code so callers can
//!    match on failures without parsing messages.
//! 2. **Categorized Ranges**: Codes are grouped by intent (client, data, backend).
//! 3. **Rejections Only**: Expected absence is not an error at the handle
//!    surface; `NotFound` exists so callers can promote an absent outcome.
//! 4. **No Retries**: Every operation is local and deterministic, so no
//!    category is retryable.

use thiserror::Error;

/// Result type used across StashKV components.
pub type SkvResult<T> = core::result::Result<T, SkvError>;

/// High-level category for grouping error codes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SkvErrorCategory {
    /// Invalid configuration, payload, or a missing record.
    Client,
    /// Stored bytes exist but cannot be decoded into a record.
    Data,
    /// The host storage failed.
    Backend,
}

impl SkvErrorCategory {
    /// Returns true if the category is safe to retry.
    ///
    /// Failures are steady-state outcomes, never transient ones.
    pub const fn is_retryable(self) -> bool {
        false
    }
}

/// Errors surfaced by the record store and endpoint handles.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SkvError {
    /// Construction configuration is missing or invalid (code 1).
    #[error("config error: {0}")]
    Config(String),

    /// `set`/`update` was called without usable data (code 2).
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The operation required a record but the endpoint holds none (code 3).
    #[error("endpoint does not exist: {endpoint}")]
    NotFound { endpoint: String },

    /// The stored string is not a valid record (code 10).
    #[error("corrupt record at {endpoint}: {reason}")]
    CorruptRecord {
        endpoint: String,
        /// The stored string, preserved so it is never silently lost.
        raw: String,
        reason: String,
    },

    /// The host backend failed (code 20).
    #[error("backend error: {0}")]
    Backend(String),
}

impl SkvError {
    /// Returns the stable numeric code for the error.
    pub const fn code(&self) -> u16 {
        match self {
            Self::Config(_) => 1,
            Self::InvalidPayload(_) => 2,
            Self::NotFound { .. } => 3,
            Self::CorruptRecord { .. } => 10,
            Self::Backend(_) => 20,
        }
    }

    /// Returns the coarse category of the error.
    pub const fn category(&self) -> SkvErrorCategory {
        match self {
            Self::Config(_) | Self::InvalidPayload(_) | Self::NotFound { .. } => {
                SkvErrorCategory::Client
            }
            Self::CorruptRecord { .. } => SkvErrorCategory::Data,
            Self::Backend(_) => SkvErrorCategory::Backend,
        }
    }

    /// Returns true if callers should retry the operation.
    pub const fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Returns true for the "never existed" condition.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for the "existed but unreadable" condition.
    pub const fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptRecord { .. })
    }

    /// Shorthand for a `NotFound` on the given endpoint.
    pub fn not_found(endpoint: impl Into<String>) -> Self {
        Self::NotFound {
            endpoint: endpoint.into(),
        }
    }
}
