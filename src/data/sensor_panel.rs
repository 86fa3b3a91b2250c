//! SensorPanel: owns the per-sensor sample buffers and drives the chart.
//!
//! The panel is the single writer of all buffers. Payloads arrive through
//! [`SensorPanel::handle_payload`], get decoded, appended to the buffer of
//! each sensor, and then one redraw hands an owned [`SeriesSnapshot`] to the
//! [`ChartRenderer`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::payload::{SensorKey, SensorPayload};
use crate::data::sample_buffer::SampleBuffer;

/// Current contents of every buffer, keyed by sensor, oldest sample first.
pub type SeriesSnapshot = BTreeMap<SensorKey, Vec<f64>>;

/// Presentation side of the panel. Implementations own axes, legend and colours.
pub trait ChartRenderer {
    /// Replace whatever is drawn with `series`.
    fn render(&mut self, series: &SeriesSnapshot);

    /// Wipe the drawing without touching any buffer.
    fn clear(&mut self) {}
}

/// Upper bound on the number of channels either key policy may configure.
pub const CHANNEL_LIMIT: usize = 256;

fn default_max_channels() -> usize {
    16
}

/// How readings are mapped to channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum KeyPolicy {
    /// Channel per JSON key. New keys get a buffer on first sight, bounded by
    /// the optional allow-list and by `max_channels`.
    Identifier {
        #[serde(default)]
        allow: Option<Vec<SensorKey>>,
        #[serde(default = "default_max_channels")]
        max_channels: usize,
    },
    /// The i-th entry of every message goes to `sensor_{i}`; exactly
    /// `channels` buffers exist from the start.
    Positional { channels: usize },
}

impl Default for KeyPolicy {
    fn default() -> Self {
        KeyPolicy::Identifier {
            allow: None,
            max_channels: default_max_channels(),
        }
    }
}

/// Counters shown in the status bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelStats {
    /// Payloads decoded successfully.
    pub payloads: u64,
    /// Payloads dropped as malformed.
    pub malformed: u64,
    /// Readings appended to a buffer.
    pub readings: u64,
    /// Readings skipped by the key policy.
    pub rejected: u64,
    /// Snapshots handed to the renderer.
    pub redraws: u64,
}

pub struct SensorPanel<R> {
    capacity: usize,
    policy: KeyPolicy,
    channels: BTreeMap<SensorKey, SampleBuffer>,
    renderer: R,
    stats: PanelStats,
}

impl<R: ChartRenderer> SensorPanel<R> {
    /// Channel counts above [`CHANNEL_LIMIT`] are clamped to it.
    pub fn new(capacity: usize, policy: KeyPolicy, renderer: R) -> Self {
        let capacity = capacity.max(1);
        let policy = match policy {
            KeyPolicy::Positional { channels } => KeyPolicy::Positional {
                channels: channels.min(CHANNEL_LIMIT),
            },
            KeyPolicy::Identifier {
                allow,
                max_channels,
            } => KeyPolicy::Identifier {
                allow,
                max_channels: max_channels.min(CHANNEL_LIMIT),
            },
        };
        let mut channels = BTreeMap::new();
        if let KeyPolicy::Positional { channels: n } = &policy {
            for index in 0..*n {
                channels.insert(SensorKey::positional(index), SampleBuffer::new(capacity));
            }
        }
        Self {
            capacity,
            policy,
            channels,
            renderer,
            stats: PanelStats::default(),
        }
    }

    /// Decode `raw`, append every accepted reading, then redraw once.
    ///
    /// A malformed payload is logged and dropped: no buffer changes and no
    /// redraw happens.
    pub fn handle_payload(&mut self, raw: &[u8]) {
        let payload = match SensorPayload::decode(raw) {
            Ok(payload) => payload,
            Err(e) => {
                self.stats.malformed += 1;
                tracing::warn!(bytes = raw.len(), "dropping {e}");
                return;
            }
        };
        self.stats.payloads += 1;
        tracing::debug!(readings = payload.len(), "payload decoded");

        for (index, reading) in payload.into_iter().enumerate() {
            match self.channel_key(index, &reading.key) {
                Ok(key) => {
                    let capacity = self.capacity;
                    self.channels
                        .entry(key)
                        .or_insert_with(|| SampleBuffer::new(capacity))
                        .append(reading.temperature);
                    self.stats.readings += 1;
                }
                Err(reason) => {
                    self.stats.rejected += 1;
                    tracing::warn!(sensor = %reading.key, "reading skipped: {reason}");
                }
            }
        }

        self.request_redraw();
    }

    /// Hand the current snapshot of all buffers to the renderer.
    pub fn request_redraw(&mut self) {
        let snapshot = self.snapshot();
        self.renderer.render(&snapshot);
        self.stats.redraws += 1;
    }

    pub fn snapshot(&self) -> SeriesSnapshot {
        self.channels
            .iter()
            .map(|(key, buffer)| (key.clone(), buffer.values()))
            .collect()
    }

    /// Clear the drawing only. Buffers keep their samples and reappear on the next redraw.
    pub fn clear_chart(&mut self) {
        self.renderer.clear();
    }

    /// Empty every buffer (channels are kept) and redraw.
    pub fn reset(&mut self) {
        for buffer in self.channels.values_mut() {
            buffer.clear();
        }
        self.request_redraw();
    }

    pub fn buffer(&self, key: &str) -> Option<&SampleBuffer> {
        self.channels.get(key)
    }

    pub fn sensor_count(&self) -> usize {
        self.channels.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn policy(&self) -> &KeyPolicy {
        &self.policy
    }

    pub fn stats(&self) -> PanelStats {
        self.stats
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn channel_key(&self, index: usize, key: &SensorKey) -> Result<SensorKey, &'static str> {
        match &self.policy {
            KeyPolicy::Positional { channels } => {
                if index < *channels {
                    Ok(SensorKey::positional(index))
                } else {
                    Err("more readings than positional channels")
                }
            }
            KeyPolicy::Identifier {
                allow,
                max_channels,
            } => {
                if let Some(allow) = allow {
                    if !allow.contains(key) {
                        return Err("sensor not in allow-list");
                    }
                }
                if self.channels.contains_key(key) || self.channels.len() < *max_channels {
                    Ok(key.clone())
                } else {
                    Err("channel limit reached")
                }
            }
        }
    }
}
