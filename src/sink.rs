//! Feed channel between the network thread and the UI thread.
//!
//! The MQTT thread never touches sample buffers. It pushes [`FeedEvent`]s into
//! a [`FeedSink`]; the UI drains the matching receiver once per frame and is
//! the only writer of plot state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, SendError, Sender};

/// Identifies one connection attempt and the thread serving it.
pub type SessionId = u64;

/// Connection lifecycle as reported by a feed thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    /// Broker acknowledged the connection.
    Connected,
    /// Connection lost; the thread is retrying.
    Reconnecting(String),
    /// Session ended on request.
    Disconnected,
    /// Session ended because of an error.
    Failed(String),
}

/// Messages sent over the channel to drive the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Status {
        session: SessionId,
        status: FeedStatus,
    },
    /// Raw bytes of one publish on the subscribed topic.
    Payload {
        session: SessionId,
        topic: String,
        bytes: Vec<u8>,
    },
}

impl FeedEvent {
    pub fn session(&self) -> SessionId {
        match self {
            FeedEvent::Status { session, .. } | FeedEvent::Payload { session, .. } => *session,
        }
    }
}

/// Convenience sender for feeding broker traffic into the UI.
#[derive(Clone)]
pub struct FeedSink {
    tx: Sender<FeedEvent>,
}

impl FeedSink {
    /// Allocate a fresh, process-unique session id.
    pub fn next_session() -> SessionId {
        static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);
        NEXT_SESSION.fetch_add(1, Ordering::Relaxed)
    }

    pub fn send_status(
        &self,
        session: SessionId,
        status: FeedStatus,
    ) -> Result<(), SendError<FeedEvent>> {
        self.tx.send(FeedEvent::Status { session, status })
    }

    pub fn send_payload<T, B>(
        &self,
        session: SessionId,
        topic: T,
        bytes: B,
    ) -> Result<(), SendError<FeedEvent>>
    where
        T: Into<String>,
        B: Into<Vec<u8>>,
    {
        self.tx.send(FeedEvent::Payload {
            session,
            topic: topic.into(),
            bytes: bytes.into(),
        })
    }
}

/// Create a new channel pair: `(FeedSink, Receiver<FeedEvent>)`.
pub fn channel_feed() -> (FeedSink, Receiver<FeedEvent>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (FeedSink { tx }, rx)
}
