use std::sync::Arc;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use runchart_rs::api::{LegendConfig, RunChart, RunChartConfig};
use runchart_rs::core::{CellPoint, CellRect, ManualClock, Sample};
use runchart_rs::render::{Cell, CellBuffer, Color};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .expect("valid start")
}

/// Two `cpu` samples one second apart, frame taken half a second later.
fn draw_two_samples(legend: LegendConfig, values: [&str; 2]) -> (RunChart, CellBuffer) {
    let clock = ManualClock::new(start());
    let config = RunChartConfig::new("cpu", 1, 1_000).with_legend(legend);
    let chart = RunChart::with_clock(config, Arc::new(clock.clone())).expect("chart init");
    chart.add_line("cpu", Color::GREEN).expect("register line");

    chart.consume_sample(&Sample::new("cpu", values[0]));
    clock.advance(TimeDelta::seconds(1));
    chart.consume_sample(&Sample::new("cpu", values[1]));
    clock.advance(TimeDelta::milliseconds(500));

    let mut buffer = CellBuffer::new(area());
    chart.draw(&mut buffer, area()).expect("draw");
    (chart, buffer)
}

fn area() -> CellRect {
    CellRect::from_size(0, 0, 80, 20)
}

fn hidden_legend() -> LegendConfig {
    LegendConfig {
        enabled: false,
        details: false,
    }
}

#[test]
fn detailed_legend_lists_current_delta_and_extrema() {
    let legend = LegendConfig {
        enabled: true,
        details: true,
    };
    let (_chart, buffer) = draw_two_samples(legend, ["10", "20"]);

    assert_eq!(buffer.find('•'), vec![CellPoint::new(60, 1)]);
    assert!(buffer.row_text(1).contains("cpu"));
    let rows = buffer.to_lines();
    assert!(rows[2].contains("cur 20.0"));
    assert!(rows[3].contains("dlt 10.0"));
    assert!(rows[4].contains("max 20.0"));
    assert!(rows[5].contains("min 10.0"));
}

#[test]
fn compact_legend_shows_only_the_current_value() {
    let (_chart, buffer) = draw_two_samples(LegendConfig::default(), ["10", "20"]);

    let text = buffer.to_lines().join("\n");
    assert!(text.contains("cur 20.0"));
    assert!(!text.contains("dlt"));
}

#[test]
fn pinpoint_legend_shows_the_selected_sample() {
    let (chart, mut buffer) = draw_two_samples(LegendConfig::default(), ["10", "20"]);

    chart.move_selection(0);
    buffer.reset();
    chart.draw(&mut buffer, area()).expect("pinpoint draw");

    let expected_time = start()
        .with_timezone(&Local)
        .format("%H:%M:%S%.3f")
        .to_string();
    let text = buffer.to_lines().join("\n");
    assert!(text.contains(&format!("time  {expected_time}")), "{text}");
    assert!(text.contains("value 10.0"));
    assert!(!text.contains("cur "));
}

#[test]
fn hidden_legend_draws_nothing() {
    let (_chart, buffer) = draw_two_samples(hidden_legend(), ["10", "20"]);
    assert!(buffer.find('•').is_empty());
    assert!(!buffer.to_lines().join("\n").contains("cur"));
}

#[test]
fn axes_grid_and_labels_frame_the_plot() {
    let (_chart, buffer) = draw_two_samples(hidden_legend(), ["10", "30"]);

    // Value labels are four cells wide, so the origin sits in column 4.
    assert_eq!(
        buffer.get(CellPoint::new(4, 18)),
        Some(Cell::new('└', Color::WHITE))
    );
    assert!(buffer.row_text(18).ends_with(&"┈".repeat(75)));
    let axis = Some(Cell::new('┊', Color::WHITE));
    assert!((0..18).all(|y| buffer.get(CellPoint::new(4, y)) == axis));

    // Seven divisions of ten columns, dashed on every other row.
    for x in [10, 40, 70] {
        assert_eq!(
            buffer.get(CellPoint::new(x, 1)),
            Some(Cell::new('┊', Color::DARK_GREY))
        );
        assert_ne!(
            buffer.get(CellPoint::new(x, 2)),
            Some(Cell::new('┊', Color::DARK_GREY))
        );
    }

    let rows = buffer.to_lines();
    assert!(rows[1].starts_with("30.0"));
    assert!(rows[3].starts_with("27.5"));
    assert_eq!(rows[19].matches(':').count(), 14);
}

#[test]
fn flat_values_get_one_centred_label() {
    let (_chart, buffer) = draw_two_samples(hidden_legend(), ["10", "10"]);

    let rows = buffer.to_lines();
    assert!(rows[10].starts_with("10.0"));
    let labelled = rows.iter().filter(|row| row.contains("10.0")).count();
    assert_eq!(labelled, 1);
}
