//! tempscope crate root: re-exports and module wiring.
//!
//! tempscope subscribes to an MQTT topic carrying JSON temperature readings
//! (`{"sensor_a": 21.5, "sensor_b": 22.0}`), keeps the last N samples of each
//! sensor and plots them live in an egui window.
//!
//! - `data`: sample buffers, payload decoding, the sensor panel, connection state
//! - `sink`: channel carrying broker traffic from the network thread to the UI
//! - `mqtt`: rumqttc session running on its own thread
//! - `config`: YAML configuration
//! - `cli`: command-line overrides
//! - `app`: the eframe application and its run helpers
//! - `audio` (feature `audio`): looping background track

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod mqtt;
pub mod sink;

#[cfg(feature = "audio")]
pub mod audio;

// Public re-exports for a compact external API
pub use app::{run_tempscope, run_tempscope_with_feed, PlotChart, TempScopeApp};
pub use config::{BrokerConfig, ChartConfig, QosLevel, TempScopeConfig};
pub use data::connection::ConnectionState;
pub use data::payload::{SensorKey, SensorPayload, SensorReading};
pub use data::sample_buffer::SampleBuffer;
pub use data::sensor_panel::{
    ChartRenderer, KeyPolicy, PanelStats, SensorPanel, SeriesSnapshot, CHANNEL_LIMIT,
};
pub use error::{ConfigError, Error, FeedError, PayloadError, Result};
pub use mqtt::MqttFeed;
pub use sink::{channel_feed, FeedEvent, FeedSink, FeedStatus, SessionId};
