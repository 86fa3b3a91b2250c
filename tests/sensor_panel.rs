use tempscope::data::payload::SensorKey;
use tempscope::data::sensor_panel::{
    ChartRenderer, KeyPolicy, SensorPanel, SeriesSnapshot, CHANNEL_LIMIT,
};

/// Renderer that remembers every snapshot it was given.
#[derive(Default)]
struct RecordingRenderer {
    frames: Vec<SeriesSnapshot>,
    clears: usize,
}

impl ChartRenderer for RecordingRenderer {
    fn render(&mut self, series: &SeriesSnapshot) {
        self.frames.push(series.clone());
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}

impl RecordingRenderer {
    fn last(&self) -> &SeriesSnapshot {
        self.frames.last().expect("no frame rendered")
    }
}

fn panel(capacity: usize) -> SensorPanel<RecordingRenderer> {
    SensorPanel::new(capacity, KeyPolicy::default(), RecordingRenderer::default())
}

fn series(snapshot: &SeriesSnapshot, key: &str) -> Vec<f64> {
    snapshot.get(key).cloned().unwrap_or_default()
}

#[test]
fn one_payload_one_redraw_with_all_sensors() {
    let mut p = panel(50);
    p.handle_payload(br#"{"a": 1.0, "b": 2.0}"#);

    assert_eq!(p.renderer().frames.len(), 1);
    let frame = p.renderer().last();
    assert_eq!(frame.len(), 2);
    assert_eq!(series(frame, "a"), vec![1.0]);
    assert_eq!(series(frame, "b"), vec![2.0]);
    assert_eq!(p.stats().redraws, 1);
}

#[test]
fn malformed_payload_changes_nothing() {
    let mut p = panel(50);
    p.handle_payload(br#"{"a": 1.0}"#);
    let before = p.snapshot();

    p.handle_payload(b"not json");

    assert_eq!(p.snapshot(), before);
    assert_eq!(p.renderer().frames.len(), 1);
    assert_eq!(p.stats().malformed, 1);
    assert_eq!(p.stats().payloads, 1);
}

#[test]
fn wrongly_shaped_payloads_are_malformed() {
    let mut p = panel(50);
    p.handle_payload(b"[1.0, 2.0]");
    p.handle_payload(br#"{"a": "hot"}"#);
    p.handle_payload(br#"{"a": 1.0, "b": null}"#);

    assert_eq!(p.stats().malformed, 3);
    assert_eq!(p.sensor_count(), 0);
    assert!(p.renderer().frames.is_empty());
}

#[test]
fn sensors_accumulate_independently() {
    let mut p = panel(50);
    p.handle_payload(br#"{"t1": 20.0}"#);
    p.handle_payload(br#"{"t1": 21.0, "t2": 30.0}"#);
    p.handle_payload(br#"{"t2": 31.0}"#);

    assert_eq!(p.buffer("t1").unwrap().values(), vec![20.0, 21.0]);
    assert_eq!(p.buffer("t2").unwrap().values(), vec![30.0, 31.0]);
    assert_eq!(p.renderer().frames.len(), 3);
    assert_eq!(p.stats().readings, 4);
}

#[test]
fn window_slides_per_sensor() {
    let mut p = panel(3);
    for v in 1..=5 {
        p.handle_payload(format!(r#"{{"t1": {v}}}"#).as_bytes());
    }
    assert_eq!(series(p.renderer().last(), "t1"), vec![3.0, 4.0, 5.0]);
}

#[test]
fn redraw_is_idempotent() {
    let mut p = panel(10);
    p.handle_payload(br#"{"a": 1.0, "b": 2.0}"#);
    p.request_redraw();
    p.request_redraw();

    let frames = &p.renderer().frames;
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0], frames[1]);
    assert_eq!(frames[1], frames[2]);
}

#[test]
fn empty_object_still_redraws() {
    let mut p = panel(10);
    p.handle_payload(br#"{"a": 1.0}"#);
    p.handle_payload(b"{}");

    assert_eq!(p.renderer().frames.len(), 2);
    assert_eq!(series(p.renderer().last(), "a"), vec![1.0]);
}

#[test]
fn allow_list_skips_unknown_sensors_only() {
    let policy = KeyPolicy::Identifier {
        allow: Some(vec![SensorKey::from("t1")]),
        max_channels: 16,
    };
    let mut p = SensorPanel::new(10, policy, RecordingRenderer::default());
    p.handle_payload(br#"{"t1": 1.0, "intruder": 99.0}"#);

    assert_eq!(p.sensor_count(), 1);
    assert!(p.buffer("intruder").is_none());
    assert_eq!(p.stats().rejected, 1);
    assert_eq!(p.renderer().frames.len(), 1);
}

#[test]
fn channel_limit_keeps_existing_sensors() {
    let policy = KeyPolicy::Identifier {
        allow: None,
        max_channels: 2,
    };
    let mut p = SensorPanel::new(10, policy, RecordingRenderer::default());
    p.handle_payload(br#"{"a": 1.0, "b": 2.0, "c": 3.0}"#);
    p.handle_payload(br#"{"a": 4.0, "c": 5.0}"#);

    assert_eq!(p.sensor_count(), 2);
    assert_eq!(p.buffer("a").unwrap().values(), vec![1.0, 4.0]);
    assert!(p.buffer("c").is_none());
    assert_eq!(p.stats().rejected, 2);
}

#[test]
fn positional_policy_maps_by_order() {
    let mut p = SensorPanel::new(
        10,
        KeyPolicy::Positional { channels: 2 },
        RecordingRenderer::default(),
    );
    assert_eq!(p.sensor_count(), 2);

    p.handle_payload(br#"{"x": 1.0, "y": 2.0, "z": 3.0}"#);
    p.handle_payload(br#"{"other": 4.0}"#);

    assert_eq!(p.buffer("sensor_0").unwrap().values(), vec![1.0, 4.0]);
    assert_eq!(p.buffer("sensor_1").unwrap().values(), vec![2.0]);
    assert!(p.buffer("x").is_none());
    assert_eq!(p.stats().rejected, 1);
}

#[test]
fn reset_empties_buffers_and_redraws() {
    let mut p = panel(10);
    p.handle_payload(br#"{"a": 1.0}"#);
    p.reset();

    assert_eq!(p.sensor_count(), 1);
    assert!(p.buffer("a").unwrap().is_empty());
    assert_eq!(p.renderer().frames.len(), 2);
    assert!(series(p.renderer().last(), "a").is_empty());
}

#[test]
fn clear_chart_keeps_buffers() {
    let mut p = panel(10);
    p.handle_payload(br#"{"a": 1.0}"#);
    p.clear_chart();

    assert_eq!(p.renderer().clears, 1);
    assert_eq!(p.buffer("a").unwrap().values(), vec![1.0]);

    p.request_redraw();
    assert_eq!(series(p.renderer().last(), "a"), vec![1.0]);
}

#[test]
fn zero_capacity_panel_keeps_one_sample() {
    let mut p = panel(0);
    p.handle_payload(br#"{"a": 1.0}"#);
    p.handle_payload(br#"{"a": 2.0}"#);
    assert_eq!(p.capacity(), 1);
    assert_eq!(p.buffer("a").unwrap().values(), vec![2.0]);
}

#[test]
fn interleaved_sensors_keep_their_own_history() {
    let mut p = panel(50);
    p.handle_payload(br#"{"t1": 10}"#);
    p.handle_payload(br#"{"t2": 20}"#);
    p.handle_payload(br#"{"t1": 11}"#);

    let frame = p.renderer().last();
    assert_eq!(series(frame, "t1"), vec![10.0, 11.0]);
    assert_eq!(series(frame, "t2"), vec![20.0]);
}

#[test]
fn repeated_key_appends_its_last_value_once() {
    let mut p = panel(50);
    p.handle_payload(br#"{"t1": 1.0, "t1": 2.0}"#);

    assert_eq!(p.buffer("t1").unwrap().values(), vec![2.0]);
    assert_eq!(p.stats().malformed, 0);
    assert_eq!(p.stats().readings, 1);
    assert_eq!(p.renderer().frames.len(), 1);
}

#[test]
fn positional_channel_count_is_clamped() {
    let p = SensorPanel::new(
        10,
        KeyPolicy::Positional { channels: 1_000_000 },
        RecordingRenderer::default(),
    );
    assert_eq!(p.sensor_count(), CHANNEL_LIMIT);
    assert_eq!(
        p.policy(),
        &KeyPolicy::Positional {
            channels: CHANNEL_LIMIT
        }
    );
}
