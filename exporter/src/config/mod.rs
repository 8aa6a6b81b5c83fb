//! Configuration management

use anyhow::{Context, Result};
use protocol::{DEFAULT_BINARY, DEFAULT_INTERVAL, DEFAULT_LISTEN_ADDR, DEFAULT_METRICS_PATH};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub speedtest: SpeedtestConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Time between measurements, e.g. "30m", "45s", "1h30m"
    pub interval: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpeedtestConfig {
    pub binary: String,
    pub use_mock_response: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Listen address; a missing host (":9300") binds all interfaces
    pub addr: String,
    pub metrics_path: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL.to_string(),
        }
    }
}

impl Default for SpeedtestConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            use_mock_response: false,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_LISTEN_ADDR.to_string(),
            metrics_path: DEFAULT_METRICS_PATH.to_string(),
        }
    }
}

/// Command line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub binary: Option<String>,
    pub addr: Option<String>,
    pub interval: Option<String>,
    pub metrics_path: Option<String>,
    pub use_mock_response: bool,
}

impl Config {
    /// Load from a TOML file, or fall back to defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .with_context(|| "Failed to parse config file")?;

        if !config.http.metrics_path.starts_with('/') {
            anyhow::bail!(
                "metrics_path must start with '/', got {:?}",
                config.http.metrics_path
            );
        }

        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self> {
        if let Some(binary) = overrides.binary {
            self.speedtest.binary = binary;
        }
        if let Some(addr) = overrides.addr {
            self.http.addr = addr;
        }
        if let Some(interval) = overrides.interval {
            self.general.interval = interval;
        }
        if let Some(path) = overrides.metrics_path {
            if !path.starts_with('/') {
                anyhow::bail!("--metrics-path must start with '/', got {:?}", path);
            }
            self.http.metrics_path = path;
        }
        if overrides.use_mock_response {
            self.speedtest.use_mock_response = true;
        }
        Ok(self)
    }

    /// Parsed poll interval. Zero is rejected since the loop would spin.
    pub fn interval(&self) -> Result<Duration> {
        let interval = humantime::parse_duration(self.general.interval.trim())
            .with_context(|| format!("Invalid interval: {:?}", self.general.interval))?;

        if interval.is_zero() {
            anyhow::bail!("Interval must be greater than zero");
        }

        Ok(interval)
    }

    /// Address in a form `TcpListener::bind` accepts
    pub fn bind_address(&self) -> String {
        let addr = self.http.addr.trim();
        if addr.starts_with(':') {
            format!("0.0.0.0{}", addr)
        } else {
            addr.to_string()
        }
    }
}
