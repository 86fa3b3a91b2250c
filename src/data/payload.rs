//! Wire payload decoding: a JSON object of sensor key → temperature.
//!
//! Decoding is typed: anything other than an object whose values are all
//! numbers is rejected as a [`PayloadError`]. Entry order of the object is
//! preserved, which the positional key policy relies on. A key repeated
//! within one object keeps its first position and takes the last value.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::PayloadError;

/// Stable identifier of one temperature source.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensorKey(String);

impl SensorKey {
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self(key.into())
    }

    /// Key for the `index`-th channel of the positional policy (`sensor_0`, `sensor_1`, …).
    pub fn positional(index: usize) -> Self {
        Self(format!("sensor_{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SensorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SensorKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SensorKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SensorKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One decoded `(sensor, temperature)` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorReading {
    pub key: SensorKey,
    pub temperature: f64,
}

/// All readings of one inbound message, in the order they appeared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorPayload {
    pub readings: Vec<SensorReading>,
}

impl SensorPayload {
    /// Decode raw message bytes.
    pub fn decode(raw: &[u8]) -> Result<Self, PayloadError> {
        Ok(serde_json::from_slice(raw)?)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SensorReading> {
        self.readings.iter()
    }
}

impl IntoIterator for SensorPayload {
    type Item = SensorReading;
    type IntoIter = std::vec::IntoIter<SensorReading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.into_iter()
    }
}

impl<'de> Deserialize<'de> for SensorPayload {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PayloadVisitor;

        impl<'de> Visitor<'de> for PayloadVisitor {
            type Value = SensorPayload;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object mapping sensor keys to numbers")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut position: HashMap<String, usize> = HashMap::new();
                let mut readings: Vec<SensorReading> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, temperature)) = map.next_entry::<String, f64>()? {
                    if let Some(&index) = position.get(&key) {
                        readings[index].temperature = temperature;
                        continue;
                    }
                    position.insert(key.clone(), readings.len());
                    readings.push(SensorReading {
                        key: SensorKey(key),
                        temperature,
                    });
                }
                Ok(SensorPayload { readings })
            }
        }

        deserializer.deserialize_map(PayloadVisitor)
    }
}
