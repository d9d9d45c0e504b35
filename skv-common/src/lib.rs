// skv-common - Shared types and error definitions for StashKV
//
// This crate defines the stored record layout and the error contract used by
// the engine and the client handle.

pub mod error;
pub mod record;
pub mod types;

// Re-export for convenience
pub use error::*;
pub use record::*;
pub use types::*;
