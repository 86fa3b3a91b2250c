//! Example: Simulated sensors, no broker needed
//!
//! What it demonstrates
//! - Driving the UI through `channel_feed()` and `FeedSink` instead of MQTT.
//! - Three sensors drifting around room temperature, published at 4 Hz.
//! - Every 25th message is garbage, to show that malformed payloads are
//!   counted in the status bar and otherwise ignored.
//!
//! How to run
//! ```bash
//! cargo run --example simulated
//! ```

use std::time::Duration;

use tempscope::{channel_feed, run_tempscope_with_feed, FeedSink, FeedStatus, TempScopeConfig};

fn main() -> tempscope::Result<()> {
    let (sink, rx) = channel_feed();
    let session = FeedSink::next_session();

    let producer = sink.clone();
    std::thread::spawn(move || {
        let _ = producer.send_status(session, FeedStatus::Connected);
        let mut n: u64 = 0;
        loop {
            let t = n as f64 * 0.25;
            let payload = if n % 25 == 24 {
                "not json".to_string()
            } else {
                format!(
                    r#"{{"kitchen": {:.2}, "office": {:.2}, "garage": {:.2}}}"#,
                    21.0 + 0.8 * (t * 0.3).sin(),
                    22.5 + 0.5 * (t * 0.17).cos(),
                    14.0 + 2.0 * (t * 0.05).sin(),
                )
            };
            // Stop once the window is closed (receiver dropped)
            if producer.send_payload(session, "simulated", payload).is_err() {
                break;
            }
            n = n.wrapping_add(1);
            std::thread::sleep(Duration::from_millis(250));
        }
    });

    let mut cfg = TempScopeConfig::default();
    cfg.chart.title = "Simulated sensors".to_string();
    cfg.chart.y_unit = Some("°C".to_string());
    run_tempscope_with_feed(cfg, sink, rx)
}
