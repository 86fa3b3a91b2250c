//! Error types for every concern of the crate.
//!
//! Each concern gets its own enum so call sites can match precisely; [`Error`]
//! aggregates them for the startup path in `main`.

use std::path::PathBuf;

use thiserror::Error;

/// A payload that does not decode as a JSON object of sensor key to number.
///
/// This is the only error kind of the sample pipeline. It is logged and the
/// message dropped; it never reaches the caller of
/// [`SensorPanel::handle_payload`](crate::data::sensor_panel::SensorPanel::handle_payload).
#[derive(Debug, Error)]
#[error("malformed payload: {0}")]
pub struct PayloadError(#[from] pub serde_json::Error);

/// Problems loading, overriding or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write config file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("invalid argument: {0}")]
    Args(String),
}

/// Failures while setting up an MQTT session.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("MQTT client request failed: {0}")]
    Client(#[from] rumqttc::ClientError),

    #[error("cannot spawn feed thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Failures of the optional background audio loop.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device unavailable: {0}")]
    Device(String),

    #[error("cannot load audio file {path:?}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("cannot start playback: {0}")]
    Play(String),
}

/// Top-level error used by the application entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error("UI error: {0}")]
    Ui(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
