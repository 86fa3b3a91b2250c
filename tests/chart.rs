use tempscope::app::PlotChart;
use tempscope::config::ChartConfig;
use tempscope::data::sensor_panel::{KeyPolicy, SensorPanel};

fn panel() -> SensorPanel<PlotChart> {
    SensorPanel::new(3, KeyPolicy::default(), PlotChart::new(&ChartConfig::default()))
}

#[test]
fn points_are_indexed_by_sample() {
    let mut p = panel();
    for v in [20.0, 21.0, 22.0, 23.0] {
        p.handle_payload(format!(r#"{{"t1": {v}}}"#).as_bytes());
    }
    assert_eq!(
        p.renderer().points("t1"),
        Some(&[[0.0, 21.0], [1.0, 22.0], [2.0, 23.0]][..])
    );
    assert_eq!(p.renderer().renders(), 4);
}

#[test]
fn every_sensor_gets_its_own_colour() {
    let mut p = panel();
    p.handle_payload(br#"{"a": 1.0, "b": 2.0}"#);
    let a = p.renderer().look("a").unwrap().color;
    let b = p.renderer().look("b").unwrap().color;
    assert_ne!(a, b);
    assert_eq!(p.renderer().series_count(), 2);
}

#[test]
fn colours_survive_clear() {
    let mut p = panel();
    p.handle_payload(br#"{"a": 1.0}"#);
    let before = p.renderer().look("a").unwrap().color;

    p.clear_chart();
    assert_eq!(p.renderer().series_count(), 0);

    p.handle_payload(br#"{"b": 2.0}"#);
    assert_eq!(p.renderer().look("a").unwrap().color, before);
    assert_eq!(p.renderer().series_count(), 2);
}
