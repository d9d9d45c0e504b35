//! # StashKV Client
//!
//! Typed endpoint handles over the durable and session host stores.
//!
//! ```rust
//! use serde_json::json;
//! use skv_client::{EndpointHandle, PartialConfig};
//! use skv_engine::Storage;
//!
//! # async fn demo() -> skv_common::SkvResult<()> {
//! let storage = Storage::memory();
//! let mut handle = EndpointHandle::open(&storage, PartialConfig::new("user:42")).await?;
//! handle.set(json!({"name": "Ann"})).await?;
//! let record = handle.get().await?.done_or_err()?;
//! assert_eq!(record.payload["name"], "Ann");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod handle;
pub mod outcome;
pub mod registry;

pub use config::{HandleConfig, PartialConfig};
pub use handle::EndpointHandle;
pub use outcome::Outcome;
pub use registry::Registry;

pub use skv_common::{BackendKind, Record, SkvError, SkvResult, TimeToLive, TimeUnit};
pub use skv_engine::{Clock, ManualClock, Storage, SystemClock};
