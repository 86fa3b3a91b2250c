//! Configuration types for the temperature scope.
//!
//! Everything has a default, so a YAML file only needs the fields it wants
//! to change. Lookup order is an explicit `--config` path, then
//! `$HOME/.tempscope/config.yaml` if present, then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data::sensor_panel::{KeyPolicy, CHANNEL_LIMIT};
use crate::error::ConfigError;

// ─────────────────────────────────────────────────────────────────────────────
// Broker
// ─────────────────────────────────────────────────────────────────────────────

/// MQTT delivery guarantee requested for the subscription.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QosLevel {
    #[default]
    AtMostOnce,
    AtLeastOnce,
    ExactlyOnce,
}

impl From<QosLevel> for rumqttc::QoS {
    fn from(q: QosLevel) -> Self {
        match q {
            QosLevel::AtMostOnce => rumqttc::QoS::AtMostOnce,
            QosLevel::AtLeastOnce => rumqttc::QoS::AtLeastOnce,
            QosLevel::ExactlyOnce => rumqttc::QoS::ExactlyOnce,
        }
    }
}

/// Where to connect and what to subscribe to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    pub topic: String,
    pub client_id: String,
    /// Ping interval; rumqttc requires at least 5 seconds.
    pub keep_alive_secs: u64,
    pub qos: QosLevel,
    /// Keep retrying after a connection that once succeeded is lost.
    pub reconnect: bool,
    pub retry_delay_ms: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "10.36.40.112".to_string(),
            port: 1883,
            topic: "fh-ece21".to_string(),
            client_id: "tempscope".to_string(),
            keep_alive_secs: 60,
            qos: QosLevel::AtMostOnce,
            reconnect: true,
            retry_delay_ms: 2000,
        }
    }
}

impl BrokerConfig {
    /// `host:port`, for logs and the status bar.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        if self.host.trim().is_empty() {
            return invalid("broker.host must not be empty");
        }
        if self.port == 0 {
            return invalid("broker.port must not be 0");
        }
        if self.topic.trim().is_empty() {
            return invalid("broker.topic must not be empty");
        }
        if self.client_id.trim().is_empty() {
            return invalid("broker.client_id must not be empty");
        }
        if self.keep_alive_secs < 5 {
            return invalid("broker.keep_alive_secs must be at least 5");
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chart
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Native window title.
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Optional unit appended to the Y label (e.g. "°C").
    pub y_unit: Option<String>,
    /// Draw a marker on every sample.
    pub show_points: bool,
    /// UI polling interval for new feed events.
    pub repaint_interval_ms: u64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "MQTT Subscriber".to_string(),
            x_label: "Sample".to_string(),
            y_label: "Temperature".to_string(),
            y_unit: None,
            show_points: true,
            repaint_interval_ms: 16,
        }
    }
}

impl ChartConfig {
    /// Y label with the unit, if any: `Temperature [°C]`.
    pub fn y_axis_label(&self) -> String {
        match &self.y_unit {
            Some(unit) if !unit.is_empty() => format!("{} [{}]", self.y_label, unit),
            _ => self.y_label.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TempScopeConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration.
///
/// | Field          | Purpose |
/// |----------------|---------|
/// | `broker`       | MQTT endpoint, topic and retry policy |
/// | `auto_connect` | Connect as soon as the window opens |
/// | `max_samples`  | Samples retained per sensor |
/// | `sensors`      | How readings map to channels |
/// | `chart`        | Labels, markers, repaint interval |
/// | `audio`        | Optional looping background track |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TempScopeConfig {
    pub broker: BrokerConfig,
    pub auto_connect: bool,
    pub max_samples: usize,
    pub sensors: KeyPolicy,
    pub chart: ChartConfig,
    /// Initial window size in logical pixels.
    pub window_size: [f32; 2],
    pub audio: Option<PathBuf>,
}

impl Default for TempScopeConfig {
    fn default() -> Self {
        Self {
            broker: BrokerConfig::default(),
            auto_connect: false,
            max_samples: 50,
            sensors: KeyPolicy::default(),
            chart: ChartConfig::default(),
            window_size: [900.0, 700.0],
            audio: None,
        }
    }
}

impl TempScopeConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&s)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(write_err)?;
        }
        fs::write(path, self.to_yaml_string()?).map_err(write_err)
    }

    /// `$HOME/.tempscope/config.yaml`, if `HOME` is set.
    pub fn default_path() -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(PathBuf::from(home).join(".tempscope").join("config.yaml"))
    }

    /// Load `explicit` if given (it must exist), else the default path if it
    /// exists, else the built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            tracing::info!("loading config from {}", path.display());
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                tracing::info!("loading config from {}", path.display());
                Self::load(&path)
            }
            _ => {
                tracing::debug!("no config file found; using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Reject values the rest of the program cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));
        if self.max_samples == 0 {
            return invalid("max_samples must be at least 1");
        }
        self.broker.validate()?;
        match &self.sensors {
            KeyPolicy::Positional { channels } if !(1..=CHANNEL_LIMIT).contains(channels) => {
                return Err(ConfigError::Invalid(format!(
                    "sensors.channels must be between 1 and {CHANNEL_LIMIT}"
                )));
            }
            KeyPolicy::Identifier { max_channels, .. }
                if !(1..=CHANNEL_LIMIT).contains(max_channels) =>
            {
                return Err(ConfigError::Invalid(format!(
                    "sensors.max_channels must be between 1 and {CHANNEL_LIMIT}"
                )));
            }
            KeyPolicy::Identifier {
                allow: Some(allow), ..
            } if allow.is_empty() => {
                return invalid("sensors.allow must list at least one sensor when present");
            }
            _ => {}
        }
        Ok(())
    }
}
