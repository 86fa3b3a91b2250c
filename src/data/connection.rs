//! Broker connection state as seen by the UI.

use chrono::{DateTime, Local};

use crate::sink::FeedStatus;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting {
        endpoint: String,
    },
    Connected {
        endpoint: String,
        since: DateTime<Local>,
    },
    Reconnecting {
        endpoint: String,
        reason: String,
    },
    Failed {
        reason: String,
    },
}

impl ConnectionState {
    pub fn connecting<S: Into<String>>(endpoint: S) -> Self {
        ConnectionState::Connecting {
            endpoint: endpoint.into(),
        }
    }

    /// A new session may be started.
    pub fn can_connect(&self) -> bool {
        matches!(
            self,
            ConnectionState::Disconnected | ConnectionState::Failed { .. }
        )
    }

    /// A session exists that a disconnect would end.
    pub fn can_disconnect(&self) -> bool {
        !self.can_connect()
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }

    pub fn endpoint(&self) -> Option<&str> {
        match self {
            ConnectionState::Connecting { endpoint }
            | ConnectionState::Connected { endpoint, .. }
            | ConnectionState::Reconnecting { endpoint, .. } => Some(endpoint),
            ConnectionState::Disconnected | ConnectionState::Failed { .. } => None,
        }
    }

    /// Advance the state with a status reported by the feed thread.
    pub fn apply(&mut self, status: FeedStatus) {
        let endpoint = self.endpoint().unwrap_or_default().to_string();
        *self = match status {
            FeedStatus::Connected => ConnectionState::Connected {
                endpoint,
                since: Local::now(),
            },
            FeedStatus::Reconnecting(reason) => ConnectionState::Reconnecting { endpoint, reason },
            FeedStatus::Disconnected => ConnectionState::Disconnected,
            FeedStatus::Failed(reason) => ConnectionState::Failed { reason },
        };
    }

    /// Status-bar text.
    pub fn label(&self) -> String {
        match self {
            ConnectionState::Disconnected => "Disconnected".to_string(),
            ConnectionState::Connecting { endpoint } => format!("Connecting to {endpoint}…"),
            ConnectionState::Connected { endpoint, since } => {
                format!("Connected to {endpoint} since {}", since.format("%H:%M:%S"))
            }
            ConnectionState::Reconnecting { endpoint, reason } => {
                format!("Reconnecting to {endpoint} ({reason})")
            }
            ConnectionState::Failed { reason } => format!("Connection failed: {reason}"),
        }
    }
}
