use std::time::Duration;

use cfnres_core::LifecyclePolicy;
use cfnres_rest::RestResourceConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Controller policy flags
    #[serde(default)]
    pub policy: LifecyclePolicy,
    /// Response delivery
    #[serde(default)]
    pub reporter: ReporterConfig,
    /// REST adapter, required by `process`
    #[serde(default)]
    pub rest: Option<RestResourceConfig>,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }
        if self.reporter.timeout_ms == 0 {
            return Err("reporter.timeout_ms must be > 0".into());
        }
        if let Some(ref rest) = self.rest {
            rest.validate().map_err(|e| format!("rest config error: {e}"))?;
        }
        Ok(())
    }

    /// Log stream reported to the orchestrator: explicit override, then
    /// configuration, then the host name.
    pub fn log_stream_name(&self, cli_override: Option<&str>) -> String {
        if let Some(name) = cli_override.filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        if let Some(ref name) = self.reporter.log_stream_name {
            return name.clone();
        }
        hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "cfnres".to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReporterConfig {
    #[serde(default = "default_reporter_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub log_stream_name: Option<String>,
}

fn default_reporter_timeout_ms() -> u64 {
    10_000
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_reporter_timeout_ms(),
            log_stream_name: None,
        }
    }
}

impl ReporterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

pub mod loader {
    use super::AppConfig;
    use config::{Config, Environment, File};
    use std::path::PathBuf;

    /// Default configuration file looked up in the working directory
    pub const DEFAULT_CONFIG_FILE: &str = "cfnres.toml";

    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let mut builder = Config::builder();
        let pathbuf = PathBuf::from(path.unwrap_or(DEFAULT_CONFIG_FILE));
        if pathbuf.exists() {
            builder = builder.add_source(File::from(pathbuf));
        } else if path.is_some() {
            return Err(format!("config file not found: {}", pathbuf.display()));
        }
        // Environment variable overrides, e.g., CFNRES__POLICY__DELETE_TO_UPDATE=true
        builder = builder.add_source(
            Environment::with_prefix("CFNRES")
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let merged: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;
        merged.validate()?;
        Ok(merged)
    }
}
