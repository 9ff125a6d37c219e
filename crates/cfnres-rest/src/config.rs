use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::RestError;

/// Settings for [`RestResource`](crate::RestResource).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestResourceConfig {
    /// API root; the `Path` resource property is resolved against it
    pub base_url: String,
    /// Expose PATCH as the in-place update capability
    #[serde(default = "default_true")]
    pub update_supported: bool,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Response field holding the created object's identifier
    #[serde(default = "default_id_field")]
    pub id_field: String,
    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub delete_wait: DeleteWaitConfig,
}

/// Polling applied after DELETE until the object is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteWaitConfig {
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_true() -> bool {
    true
}
fn default_timeout_ms() -> u64 {
    30_000
}
fn default_id_field() -> String {
    "id".into()
}
fn default_attempts() -> u32 {
    3
}
fn default_interval_ms() -> u64 {
    10_000
}

impl Default for DeleteWaitConfig {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            interval_ms: default_interval_ms(),
        }
    }
}

impl DeleteWaitConfig {
    pub fn disabled() -> Self {
        Self {
            attempts: 0,
            interval_ms: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl RestResourceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            update_supported: default_true(),
            timeout_ms: default_timeout_ms(),
            id_field: default_id_field(),
            headers: HashMap::new(),
            delete_wait: DeleteWaitConfig::default(),
        }
    }

    #[must_use]
    pub fn with_update_supported(mut self, supported: bool) -> Self {
        self.update_supported = supported;
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    #[must_use]
    pub fn with_delete_wait(mut self, delete_wait: DeleteWaitConfig) -> Self {
        self.delete_wait = delete_wait;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parses `base_url`, normalized to end with `/` so relative paths
    /// resolve beneath it.
    pub fn parsed_base_url(&self) -> Result<Url, RestError> {
        let mut url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RestError::invalid_config(format!(
                "base_url must use http or https, got {}",
                url.scheme()
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    pub fn validate(&self) -> Result<(), RestError> {
        self.parsed_base_url()?;
        if self.timeout_ms == 0 {
            return Err(RestError::invalid_config("timeout_ms must be > 0"));
        }
        if self.id_field.is_empty() {
            return Err(RestError::invalid_config("id_field must not be empty"));
        }
        Ok(())
    }
}
