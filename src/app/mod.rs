//! Main application module for tempscope.
//!
//! | Sub-module        | Responsibility |
//! | ----------------- | -------------- |
//! | [`chart`]         | egui_plot renderer fed by the sensor panel |
//! | [`series_look`]   | Per-sensor colours and markers |
//! | [`update`]        | Per-frame feed draining and widget rendering |
//! | [`run`]           | Top-level [`run_tempscope()`] entry point |

mod chart;
mod series_look;
mod run;
mod update;

pub use chart::PlotChart;
pub use run::{run_tempscope, run_tempscope_with_feed};
pub use series_look::SeriesLook;

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::config::{BrokerConfig, TempScopeConfig};
use crate::data::connection::ConnectionState;
use crate::data::sensor_panel::SensorPanel;
use crate::mqtt::MqttFeed;
use crate::sink::{channel_feed, FeedEvent, FeedSink, FeedStatus, SessionId};

/// Ended sessions remembered for filtering. A feed thread stops sending
/// shortly after its session ends, so only the latest few matter.
const RETIRED_SESSIONS: usize = 8;

/// Standalone tempscope application that implements [`eframe::App`].
///
/// The app is the only owner of the [`SensorPanel`]. Broker traffic reaches it
/// exclusively through the feed channel, drained at the start of each frame.
pub struct TempScopeApp {
    /// Buffers and chart.
    pub panel: SensorPanel<PlotChart>,

    sink: FeedSink,
    rx: Receiver<FeedEvent>,
    feed: Option<MqttFeed>,
    /// Most recent sessions we ended ourselves; their late events are ignored.
    retired: VecDeque<SessionId>,
    connection: ConnectionState,

    /// Broker settings as currently edited in the connection bar.
    broker: BrokerConfig,
    pending_auto_connect: bool,
    repaint_interval: Duration,

    last_payload_at: Option<DateTime<Local>>,
    error_message: Option<String>,

    #[cfg(feature = "audio")]
    pub(crate) audio: Option<crate::audio::BackgroundLoop>,
}

impl TempScopeApp {
    pub fn new(cfg: &TempScopeConfig) -> Self {
        let (sink, rx) = channel_feed();
        Self::with_feed(cfg, sink, rx)
    }

    /// Build the app around an existing feed channel, e.g. to drive it from
    /// a simulator instead of a broker.
    pub fn with_feed(cfg: &TempScopeConfig, sink: FeedSink, rx: Receiver<FeedEvent>) -> Self {
        Self {
            panel: SensorPanel::new(
                cfg.max_samples,
                cfg.sensors.clone(),
                PlotChart::new(&cfg.chart),
            ),
            sink,
            rx,
            feed: None,
            retired: VecDeque::new(),
            connection: ConnectionState::default(),
            broker: cfg.broker.clone(),
            pending_auto_connect: cfg.auto_connect,
            repaint_interval: Duration::from_millis(cfg.chart.repaint_interval_ms),
            last_payload_at: None,
            error_message: None,
            #[cfg(feature = "audio")]
            audio: None,
        }
    }

    pub fn feed_sink(&self) -> FeedSink {
        self.sink.clone()
    }

    pub fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    pub fn broker(&self) -> &BrokerConfig {
        &self.broker
    }

    pub fn broker_mut(&mut self) -> &mut BrokerConfig {
        &mut self.broker
    }

    pub fn last_payload_at(&self) -> Option<DateTime<Local>> {
        self.last_payload_at
    }

    /// Message shown in the error window, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    /// Start a broker session with the current connection-bar settings.
    pub fn connect(&mut self) {
        if !self.connection.can_connect() {
            return;
        }
        if let Err(e) = self.broker.validate() {
            self.fail(e.to_string());
            return;
        }
        match MqttFeed::connect(&self.broker, self.sink.clone()) {
            Ok(feed) => {
                self.connection = ConnectionState::connecting(feed.endpoint());
                self.feed = Some(feed);
                self.error_message = None;
                self.panel.clear_chart();
            }
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// End the active session, if any.
    pub fn disconnect(&mut self) {
        if let Some(mut feed) = self.feed.take() {
            feed.disconnect();
            self.retire(feed.session());
        }
        self.connection = ConnectionState::Disconnected;
    }

    /// Drain every queued feed event. Returns how many were taken off the queue.
    pub fn process_feed_events(&mut self) -> usize {
        let mut n = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.handle_feed_event(event);
            n += 1;
        }
        n
    }

    fn handle_feed_event(&mut self, event: FeedEvent) {
        if self.retired.contains(&event.session()) {
            tracing::trace!(session = event.session(), "ignoring event of ended session");
            return;
        }
        match event {
            FeedEvent::Payload { bytes, .. } => {
                let decoded = self.panel.stats().payloads;
                self.panel.handle_payload(&bytes);
                if self.panel.stats().payloads > decoded {
                    self.last_payload_at = Some(Local::now());
                }
            }
            FeedEvent::Status { session, status } => {
                let ended = matches!(status, FeedStatus::Disconnected | FeedStatus::Failed(_));
                if let FeedStatus::Failed(reason) = &status {
                    self.error_message = Some(format!("Failed to connect: {reason}"));
                }
                self.connection.apply(status);
                let is_active = self.feed.as_ref().map(MqttFeed::session) == Some(session);
                if ended && is_active {
                    self.feed = None;
                    self.retire(session);
                }
            }
        }
    }

    fn fail(&mut self, reason: String) {
        tracing::error!("cannot connect: {reason}");
        self.error_message = Some(format!("Failed to connect: {reason}"));
        self.connection = ConnectionState::Failed { reason };
    }

    pub(crate) fn retire(&mut self, session: SessionId) {
        if self.retired.contains(&session) {
            return;
        }
        if self.retired.len() == RETIRED_SESSIONS {
            self.retired.pop_front();
        }
        self.retired.push_back(session);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> TempScopeApp {
        TempScopeApp::new(&TempScopeConfig::default())
    }

    #[test]
    fn payload_events_reach_the_panel() {
        let mut app = app();
        let sink = app.feed_sink();
        sink.send_payload(3, "fh-ece21", br#"{"t1": 21.5}"#.to_vec())
            .unwrap();

        assert_eq!(app.process_feed_events(), 1);
        assert_eq!(app.panel.buffer("t1").unwrap().values(), vec![21.5]);
        assert_eq!(app.panel.renderer().points("t1"), Some(&[[0.0, 21.5]][..]));
        assert!(app.last_payload_at().is_some());
    }

    #[test]
    fn status_events_drive_connection_state() {
        let mut app = app();
        let sink = app.feed_sink();
        sink.send_status(4, FeedStatus::Connected).unwrap();
        app.process_feed_events();
        assert!(app.connection().is_connected());

        sink.send_status(4, FeedStatus::Failed("broker went away".into()))
            .unwrap();
        app.process_feed_events();
        assert!(app.connection().can_connect());
        assert_eq!(
            app.error_message(),
            Some("Failed to connect: broker went away")
        );
    }

    #[test]
    fn events_of_retired_sessions_are_ignored() {
        let mut app = app();
        let sink = app.feed_sink();
        app.retire(9);
        sink.send_payload(9, "fh-ece21", br#"{"t1": 1.0}"#.to_vec())
            .unwrap();
        sink.send_status(9, FeedStatus::Connected).unwrap();

        assert_eq!(app.process_feed_events(), 2);
        assert!(app.panel.buffer("t1").is_none());
        assert_eq!(app.connection(), &ConnectionState::Disconnected);
    }

    #[test]
    fn invalid_broker_settings_fail_without_spawning() {
        let mut app = app();
        app.broker_mut().host.clear();
        app.connect();
        assert!(matches!(app.connection(), ConnectionState::Failed { .. }));
        assert!(app.error_message().unwrap().contains("broker.host"));
    }

    #[test]
    fn disconnect_without_session_is_idle() {
        let mut app = app();
        app.disconnect();
        assert_eq!(app.connection(), &ConnectionState::Disconnected);
    }

    #[test]
    fn malformed_payload_does_not_count_as_update() {
        let mut app = app();
        let sink = app.feed_sink();
        sink.send_payload(3, "fh-ece21", b"not json".to_vec()).unwrap();

        app.process_feed_events();
        assert!(app.last_payload_at().is_none());
        assert_eq!(app.panel.stats().malformed, 1);
    }

    #[test]
    fn retired_sessions_are_bounded() {
        let mut app = app();
        for session in 100..100 + 3 * RETIRED_SESSIONS as u64 {
            app.retire(session);
        }
        assert_eq!(app.retired.len(), RETIRED_SESSIONS);
        let newest = 100 + 3 * RETIRED_SESSIONS as u64 - 1;
        assert!(app.retired.contains(&newest));
        assert!(!app.retired.contains(&100));

        // A retired id is only stored once.
        app.retire(newest);
        assert_eq!(app.retired.len(), RETIRED_SESSIONS);
    }
}
