//! # Handle Configuration
//!
//! Callers supply a [`PartialConfig`]; it is merged over defaults and
//! validated into an immutable [`HandleConfig`] when a handle is opened.
//!
//! ## Example
//!
//! ```rust
//! use skv_client::PartialConfig;
//!
//! let config = PartialConfig::from_json(
//!     r#"{"endpoint": "user:42", "storageType": "session", "expiry": {"length": 2, "unit": "hours"}}"#,
//! )
//! .unwrap()
//! .into_config()
//! .unwrap();
//! assert_eq!(config.time_to_live.unwrap().as_millis(), 7_200_000);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use skv_common::{BackendKind, SkvError, SkvResult, TimeToLive};

/// Validated, immutable configuration of one handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandleConfig {
    /// Store the endpoint lives in.
    pub backend: BackendKind,
    /// Key of the record.
    pub endpoint: String,
    /// Lifetime of a record after creation; `None` never expires.
    pub time_to_live: Option<TimeToLive>,
    /// Payload written on open when the endpoint holds no record.
    pub init_as: Option<Value>,
}

/// Caller-supplied configuration where every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialConfig {
    #[serde(default, alias = "storageType")]
    pub backend: Option<BackendKind>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default, alias = "expiry")]
    pub time_to_live: Option<TimeToLive>,
    #[serde(default)]
    pub init_as: Option<Value>,
}

impl PartialConfig {
    /// Starts a configuration for `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        PartialConfig {
            endpoint: Some(endpoint.into()),
            ..Self::default()
        }
    }

    /// Library defaults: durable backend, no expiry, no initial payload.
    pub fn defaults() -> Self {
        PartialConfig {
            backend: Some(BackendKind::Durable),
            ..Self::default()
        }
    }

    /// Parses a JSON configuration object.
    pub fn from_json(raw: &str) -> SkvResult<Self> {
        serde_json::from_str(raw).map_err(|err| SkvError::Config(err.to_string()))
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_time_to_live(mut self, ttl: TimeToLive) -> Self {
        self.time_to_live = Some(ttl);
        self
    }

    pub fn with_init_as(mut self, payload: Value) -> Self {
        self.init_as = Some(payload);
        self
    }

    /// Fills every field `self` leaves unset from `base`.
    pub fn merge(self, base: PartialConfig) -> Self {
        PartialConfig {
            backend: self.backend.or(base.backend),
            endpoint: self.endpoint.or(base.endpoint),
            time_to_live: self.time_to_live.or(base.time_to_live),
            init_as: self.init_as.or(base.init_as),
        }
    }

    /// Merges over [`PartialConfig::defaults`] and validates.
    ///
    /// # Errors
    ///
    /// `Config` when the endpoint is missing or empty.
    pub fn into_config(self) -> SkvResult<HandleConfig> {
        let merged = self.merge(Self::defaults());
        let endpoint = match merged.endpoint {
            Some(endpoint) if !endpoint.is_empty() => endpoint,
            _ => return Err(SkvError::Config("missing endpoint".to_string())),
        };

        Ok(HandleConfig {
            backend: merged.backend.unwrap_or_default(),
            endpoint,
            time_to_live: merged.time_to_live,
            init_as: merged.init_as,
        })
    }
}

impl From<HandleConfig> for PartialConfig {
    fn from(config: HandleConfig) -> Self {
        PartialConfig {
            backend: Some(config.backend),
            endpoint: Some(config.endpoint),
            time_to_live: config.time_to_live,
            init_as: config.init_as,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_fill_gaps() {
        let config = PartialConfig::new("a").into_config().unwrap();
        assert_eq!(config.backend, BackendKind::Durable);
        assert_eq!(config.time_to_live, None);
        assert_eq!(config.init_as, None);
    }

    #[test]
    fn missing_endpoint_is_config_error() {
        let err = PartialConfig::default().into_config().unwrap_err();
        assert!(matches!(err, SkvError::Config(_)));

        let err = PartialConfig::new("").into_config().unwrap_err();
        assert!(matches!(err, SkvError::Config(_)));
    }

    #[test]
    fn supplied_fields_win_over_base() {
        let base = PartialConfig::default()
            .with_backend(BackendKind::Session)
            .with_time_to_live(TimeToLive::from_millis(10));
        let merged = PartialConfig::new("x")
            .with_time_to_live(TimeToLive::from_millis(99))
            .merge(base);
        assert_eq!(merged.backend, Some(BackendKind::Session));
        assert_eq!(merged.time_to_live, Some(TimeToLive::from_millis(99)));
        assert_eq!(merged.endpoint.as_deref(), Some("x"));
    }

    #[test]
    fn parses_json_with_legacy_names() {
        let partial = PartialConfig::from_json(
            r#"{"endpoint":"e","storageType":"sessionStorage","expiry":{"format":"minutes"},"initAs":{"n":1}}"#,
        )
        .unwrap();
        let config = partial.into_config().unwrap();
        assert_eq!(config.backend, BackendKind::Session);
        assert_eq!(config.time_to_live, Some(TimeToLive::from_millis(60_000)));
        assert_eq!(config.init_as, Some(json!({"n": 1})));
    }

    #[test]
    fn unknown_backend_name_is_durable() {
        let config = PartialConfig::from_json(r#"{"endpoint":"e","backend":"indexeddb"}"#)
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(config.backend, BackendKind::Durable);
    }

    #[test]
    fn non_string_backend_values_are_durable() {
        for raw in [
            r#"{"endpoint":"e","storageType":7}"#,
            r#"{"endpoint":"e","storageType":{}}"#,
            r#"{"endpoint":"e","backend":false}"#,
        ] {
            let config = PartialConfig::from_json(raw)
                .unwrap()
                .into_config()
                .unwrap();
            assert_eq!(config.backend, BackendKind::Durable, "config {raw}");
        }
    }

    #[test]
    fn fractional_expiry_length_is_accepted() {
        let config = PartialConfig::from_json(
            r#"{"endpoint":"e","expiry":{"length":1.5,"format":"hours"}}"#,
        )
        .unwrap()
        .into_config()
        .unwrap();
        assert_eq!(config.time_to_live, Some(TimeToLive::from_millis(5_400_000)));
    }

    #[test]
    fn malformed_json_is_config_error() {
        assert!(matches!(
            PartialConfig::from_json("{").unwrap_err(),
            SkvError::Config(_)
        ));
    }
}
