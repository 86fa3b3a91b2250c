//! Example: Publish fake readings to a broker
//!
//! What it demonstrates
//! - The payload format tempscope expects: one JSON object per message,
//!   sensor key to temperature.
//! - A rumqttc publisher to pair with `tempscope --host <host> --connect`.
//!
//! How to run
//! ```bash
//! cargo run --example publisher -- [host] [port] [topic]
//! ```
//! Defaults to `localhost 1883 fh-ece21`.

use std::time::Duration;

use rumqttc::{Client, MqttOptions, QoS};

fn main() {
    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "localhost".to_string());
    let port = args
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or(1883u16);
    let topic = args.next().unwrap_or_else(|| "fh-ece21".to_string());

    let mut options = MqttOptions::new(format!("tempscope-publisher-{}", std::process::id()), host, port);
    options.set_keep_alive(Duration::from_secs(30));
    let (client, mut connection) = Client::new(options, 10);

    // The event loop must be driven for publishes to go out.
    std::thread::spawn(move || {
        for event in connection.iter() {
            if let Err(e) = event {
                eprintln!("[publisher] connection error: {e}");
                std::thread::sleep(Duration::from_secs(1));
            }
        }
    });

    let mut n: u64 = 0;
    loop {
        let t = n as f64;
        let payload = format!(
            r#"{{"sensor_0": {:.2}, "sensor_1": {:.2}}}"#,
            20.0 + (t * 0.2).sin(),
            23.0 + 0.5 * (t * 0.1).cos(),
        );
        if let Err(e) = client.publish(topic.clone(), QoS::AtMostOnce, false, payload.clone()) {
            eprintln!("[publisher] publish failed: {e}");
            break;
        }
        println!("[publisher] {topic}: {payload}");
        n = n.wrapping_add(1);
        std::thread::sleep(Duration::from_millis(500));
    }
}
