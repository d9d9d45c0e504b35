//! # Handle Registry
//!
//! Tracks the configuration of every endpoint opened through it so handles
//! can be reopened by name.
//!
//! ## Design Principles
//!
//! 1. **Explicit Ownership**: A `Registry` is a value the composer creates and
//!    drops; there is no process-wide container.
//! 2. **Configs, Not Handles**: Only immutable configurations are retained, so
//!    registered handles never share mutable state.
//! 3. **Short Critical Sections**: The lock is never held across an await.

use std::sync::Arc;

use ahash::RandomState;
use hashbrown::HashMap;
use parking_lot::Mutex;
use serde_json::json;
use tracing::debug;

use skv_common::{BackendKind, SkvResult};
use skv_engine::{Clock, Storage, SystemClock};

use crate::config::{HandleConfig, PartialConfig};
use crate::handle::EndpointHandle;

/// Opens handles over shared storage and remembers their configuration.
pub struct Registry {
    storage: Storage,
    clock: Arc<dyn Clock>,
    defaults: PartialConfig,
    instances: Mutex<HashMap<String, HandleConfig, RandomState>>,
}

impl Registry {
    /// Creates a registry over `storage` using the system clock.
    pub fn new(storage: Storage) -> Self {
        Self::with_clock(storage, Arc::new(SystemClock))
    }

    pub fn with_clock(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        Registry {
            storage,
            clock,
            defaults: PartialConfig::defaults(),
            instances: Mutex::new(HashMap::default()),
        }
    }

    /// Sets registry-wide defaults, merged under every config passed to
    /// [`Registry::open`].
    pub fn with_defaults(mut self, defaults: PartialConfig) -> Self {
        self.defaults = defaults.merge(PartialConfig::defaults());
        self
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Opens a handle and records its configuration under its endpoint.
    ///
    /// A later open of the same endpoint replaces the recorded configuration.
    pub async fn open(&self, config: PartialConfig) -> SkvResult<EndpointHandle> {
        let config = config.merge(self.defaults.clone());
        let handle =
            EndpointHandle::open_with_clock(&self.storage, config, Arc::clone(&self.clock)).await?;

        let registered = handle.config().clone();
        debug!(endpoint = registered.endpoint.as_str(), "registered endpoint");
        self.instances
            .lock()
            .insert(registered.endpoint.clone(), registered);
        Ok(handle)
    }

    /// Reopens a registered endpoint with its recorded configuration.
    ///
    /// An unknown endpoint is opened fresh on the durable backend, regardless
    /// of registry defaults, and seeded with a message payload explaining it
    /// was just created.
    pub async fn reopen(&self, endpoint: &str) -> SkvResult<EndpointHandle> {
        let known = self.instances.lock().get(endpoint).cloned();
        let config = match known {
            Some(config) => PartialConfig::from(config),
            None => PartialConfig::new(endpoint)
                .with_backend(BackendKind::Durable)
                .with_init_as(json!({
                    "message": format!(
                        "An instance of {endpoint} does not exist, so one was set up"
                    )
                })),
        };
        self.open(config).await
    }

    /// Recorded configuration for `endpoint`, if any.
    pub fn get(&self, endpoint: &str) -> Option<HandleConfig> {
        self.instances.lock().get(endpoint).cloned()
    }

    /// Snapshot of every recorded configuration, sorted by endpoint.
    pub fn instances(&self) -> Vec<HandleConfig> {
        let mut configs: Vec<HandleConfig> = self.instances.lock().values().cloned().collect();
        configs.sort_by(|a, b| a.endpoint.cmp(&b.endpoint));
        configs
    }

    /// Drops the recorded configuration. Stored records are untouched.
    pub fn forget(&self, endpoint: &str) -> bool {
        self.instances.lock().remove(endpoint).is_some()
    }

    /// Drops every recorded configuration.
    pub fn clear(&self) {
        self.instances.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.instances.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skv_common::TimeToLive;

    #[tokio::test]
    async fn records_configs_of_opened_handles() {
        let registry = Registry::new(Storage::memory());
        registry
            .open(PartialConfig::new("b").with_backend(BackendKind::Session))
            .await
            .unwrap();
        registry.open(PartialConfig::new("a")).await.unwrap();

        let endpoints: Vec<String> = registry
            .instances()
            .into_iter()
            .map(|config| config.endpoint)
            .collect();
        assert_eq!(endpoints, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(registry.get("b").unwrap().backend, BackendKind::Session);
    }

    #[tokio::test]
    async fn failed_open_registers_nothing() {
        let registry = Registry::new(Storage::memory());
        assert!(registry.open(PartialConfig::default()).await.is_err());
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn defaults_apply_to_every_open() {
        let registry = Registry::new(Storage::memory()).with_defaults(
            PartialConfig::default().with_time_to_live(TimeToLive::from_millis(500)),
        );
        let handle = registry.open(PartialConfig::new("a")).await.unwrap();
        assert_eq!(
            handle.config().time_to_live,
            Some(TimeToLive::from_millis(500))
        );
        assert_eq!(handle.config().backend, BackendKind::Durable);
    }

    #[tokio::test]
    async fn reopen_uses_recorded_backend() {
        let registry = Registry::new(Storage::memory());
        let mut handle = registry
            .open(PartialConfig::new("s").with_backend(BackendKind::Session))
            .await
            .unwrap();
        handle.set(json!({"v": 1})).await.unwrap();

        let mut again = registry.reopen("s").await.unwrap();
        assert_eq!(again.config().backend, BackendKind::Session);
        let record = again.get().await.unwrap().done_or_err().unwrap();
        assert_eq!(record.payload, json!({"v": 1}));
    }

    #[tokio::test]
    async fn reopen_unknown_seeds_message() {
        let registry = Registry::new(Storage::memory());
        let mut handle = registry.reopen("ghost").await.unwrap();
        let record = handle.get().await.unwrap().done_or_err().unwrap();
        assert_eq!(
            record.payload["message"],
            json!("An instance of ghost does not exist, so one was set up")
        );
        assert!(registry.get("ghost").is_some());
    }

    #[tokio::test]
    async fn reopen_unknown_ignores_session_default() {
        let registry = Registry::new(Storage::memory())
            .with_defaults(PartialConfig::default().with_backend(BackendKind::Session));
        let handle = registry.reopen("ghost").await.unwrap();
        assert_eq!(handle.config().backend, BackendKind::Durable);
        assert!(
            registry
                .storage()
                .resolve(BackendKind::Durable)
                .exists("ghost")
                .unwrap()
        );
        assert!(
            !registry
                .storage()
                .resolve(BackendKind::Session)
                .exists("ghost")
                .unwrap()
        );
    }

    #[tokio::test]
    async fn forget_and_clear() {
        let registry = Registry::new(Storage::memory());
        let mut handle = registry.open(PartialConfig::new("a")).await.unwrap();
        handle.set(json!(1)).await.unwrap();
        registry.open(PartialConfig::new("b")).await.unwrap();

        assert!(registry.forget("a"));
        assert!(!registry.forget("a"));
        assert!(handle.check().await.unwrap());

        registry.clear();
        assert_eq!(registry.len(), 0);
    }
}
