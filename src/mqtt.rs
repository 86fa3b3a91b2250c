//! MQTT feed: one background thread per broker session.
//!
//! [`MqttFeed::connect`] queues the subscription and spawns a thread that
//! iterates the rumqttc connection. The thread only forwards
//! [`FeedEvent`](crate::sink::FeedEvent)s through the [`FeedSink`]; decoding
//! and buffering happen on the UI thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rumqttc::{Client, Connection, Event, MqttOptions, Outgoing, Packet, QoS};

use crate::config::BrokerConfig;
use crate::error::FeedError;
use crate::sink::{FeedSink, FeedStatus, SessionId};

/// Handle to a running broker session. Dropping it disconnects.
pub struct MqttFeed {
    session: SessionId,
    endpoint: String,
    client: Client,
    stop: Arc<AtomicBool>,
}

impl MqttFeed {
    /// Start a session against `cfg`. Connection errors are reported
    /// asynchronously as [`FeedStatus::Failed`]; only local setup failures
    /// are returned here.
    pub fn connect(cfg: &BrokerConfig, sink: FeedSink) -> Result<Self, FeedError> {
        let session = FeedSink::next_session();
        let endpoint = cfg.endpoint();

        // Suffix with the pid so two running instances do not evict each other.
        let client_id = format!("{}-{}", cfg.client_id, std::process::id());
        let mut options = MqttOptions::new(client_id, cfg.host.clone(), cfg.port);
        options.set_keep_alive(Duration::from_secs(cfg.keep_alive_secs));

        let (client, connection) = Client::new(options, 10);
        let qos: QoS = cfg.qos.into();
        client.subscribe(cfg.topic.clone(), qos)?;

        let stop = Arc::new(AtomicBool::new(false));
        let worker = FeedWorker {
            session,
            sink,
            client: client.clone(),
            topic: cfg.topic.clone(),
            qos,
            stop: Arc::clone(&stop),
            reconnect: cfg.reconnect,
            retry_delay: Duration::from_millis(cfg.retry_delay_ms),
        };
        thread::Builder::new()
            .name(format!("mqtt-feed-{session}"))
            .spawn(move || worker.run(connection))
            .map_err(FeedError::Spawn)?;

        tracing::info!(session, topic = %cfg.topic, "connecting to {endpoint}");
        Ok(Self {
            session,
            endpoint,
            client,
            stop,
        })
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request a clean disconnect. The thread reports
    /// [`FeedStatus::Disconnected`] and exits once it goes out.
    pub fn disconnect(&mut self) {
        if self.stop.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::info!(session = self.session, "disconnecting from {}", self.endpoint);
        if let Err(e) = self.client.try_disconnect() {
            tracing::debug!(session = self.session, "disconnect request not queued: {e}");
        }
    }
}

impl Drop for MqttFeed {
    fn drop(&mut self) {
        self.disconnect();
    }
}

struct FeedWorker {
    session: SessionId,
    sink: FeedSink,
    client: Client,
    topic: String,
    qos: QoS,
    stop: Arc<AtomicBool>,
    reconnect: bool,
    retry_delay: Duration,
}

impl FeedWorker {
    fn run(self, mut connection: Connection) {
        let session = self.session;
        let mut connected_once = false;

        for notification in connection.iter() {
            match notification {
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    if connected_once {
                        // Clean sessions lose their subscriptions on reconnect.
                        if let Err(e) = self.client.try_subscribe(self.topic.clone(), self.qos) {
                            tracing::warn!(session, "resubscribe failed: {e}");
                        }
                    }
                    connected_once = true;
                    tracing::info!(session, "broker accepted connection");
                    if !self.report(FeedStatus::Connected) {
                        break;
                    }
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    tracing::trace!(
                        session,
                        topic = %publish.topic,
                        bytes = publish.payload.len(),
                        "publish received"
                    );
                    let sent = self.sink.send_payload(
                        session,
                        publish.topic,
                        publish.payload.to_vec(),
                    );
                    if sent.is_err() {
                        break;
                    }
                }
                Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                    self.report(FeedStatus::Disconnected);
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    if self.stop.load(Ordering::SeqCst) {
                        self.report(FeedStatus::Disconnected);
                        break;
                    }
                    let reason = e.to_string();
                    if connected_once && self.reconnect {
                        tracing::warn!(session, "connection lost: {reason}; retrying");
                        if !self.report(FeedStatus::Reconnecting(reason)) {
                            break;
                        }
                        thread::sleep(self.retry_delay);
                    } else {
                        tracing::warn!(session, "connection failed: {reason}");
                        self.report(FeedStatus::Failed(reason));
                        break;
                    }
                }
            }
        }
        tracing::debug!(session, "feed thread finished");
    }

    /// Forward a status; `false` once the UI side is gone.
    fn report(&self, status: FeedStatus) -> bool {
        self.sink.send_status(self.session, status).is_ok()
    }
}
