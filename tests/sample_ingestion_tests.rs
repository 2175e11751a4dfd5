use std::sync::Arc;
use std::thread;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use runchart_rs::api::{RunChart, RunChartConfig, SampleOutcome};
use runchart_rs::core::{CellRect, ManualClock, Sample};
use runchart_rs::extensions::{DiagnosticsLog, SampleDiagnostic};
use runchart_rs::render::{CellBuffer, Color};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0)
        .single()
        .expect("valid start")
}

fn build_chart(clock: &ManualClock) -> (RunChart, DiagnosticsLog) {
    let chart = RunChart::with_clock(
        RunChartConfig::new("ingest", 2, 1_000),
        Arc::new(clock.clone()),
    )
    .expect("chart init");
    chart.add_line("cpu", Color::GREEN).expect("register line");
    let log = DiagnosticsLog::default();
    chart.set_diagnostics_sink(log.clone());
    (chart, log)
}

#[test]
fn non_numeric_value_is_dropped_and_reported() {
    let clock = ManualClock::new(start());
    let (chart, log) = build_chart(&clock);

    assert_eq!(
        chart.consume_sample(&Sample::new("cpu", "10")),
        SampleOutcome::Stored {
            points_len: 1,
            trimmed: None
        }
    );

    let outcome = chart.consume_sample(&Sample::new("cpu", "abc"));
    let SampleOutcome::Dropped(SampleDiagnostic::ParseFailure { label, value, .. }) = outcome else {
        panic!("expected a parse failure, got {outcome:?}");
    };
    assert_eq!(label, "cpu");
    assert_eq!(value, "abc");

    assert_eq!(chart.line_stats("cpu").expect("stats").points_len, 1);
    let entries = log.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].label(), "cpu");
}

#[test]
fn non_finite_values_are_rejected() {
    let clock = ManualClock::new(start());
    let (chart, log) = build_chart(&clock);

    for text in ["inf", "-inf", "NaN"] {
        let outcome = chart.consume_sample(&Sample::new("cpu", text));
        assert!(
            matches!(outcome, SampleOutcome::Dropped(SampleDiagnostic::ParseFailure { .. })),
            "{text} must not be stored"
        );
    }
    assert_eq!(chart.line_stats("cpu").expect("stats").points_len, 0);
    assert_eq!(log.drain().len(), 3);
    assert!(log.entries().is_empty());
}

#[test]
fn surrounding_whitespace_is_accepted() {
    let clock = ManualClock::new(start());
    let (chart, _log) = build_chart(&clock);

    assert!(chart.consume_sample(&Sample::new("cpu", " 42.5\n")).is_stored());
    assert_eq!(chart.line_stats("cpu").expect("stats").last_value, Some(42.5));
}

#[test]
fn producer_errors_are_reported_instead_of_stored() {
    let clock = ManualClock::new(start());
    let (chart, log) = build_chart(&clock);

    let outcome = chart.consume_sample(&Sample::failed("cpu", "exit status 1"));
    assert_eq!(
        outcome,
        SampleOutcome::Dropped(SampleDiagnostic::SourceError {
            label: "cpu".to_owned(),
            message: "exit status 1".to_owned(),
        })
    );

    // An empty error message is not an error.
    let mut sample = Sample::new("cpu", "3");
    sample.error = Some(String::new());
    assert!(chart.consume_sample(&sample).is_stored());

    assert_eq!(log.entries().len(), 1);
    assert_eq!(chart.line_stats("cpu").expect("stats").points_len, 1);
}

#[test]
fn unknown_labels_are_reported() {
    let clock = ManualClock::new(start());
    let (chart, log) = build_chart(&clock);

    let outcome = chart.consume_sample(&Sample::new("gpu", "1"));
    assert_eq!(
        outcome,
        SampleOutcome::Dropped(SampleDiagnostic::UnknownLabel {
            label: "gpu".to_owned()
        })
    );
    assert_eq!(log.entries(), vec![SampleDiagnostic::UnknownLabel {
        label: "gpu".to_owned()
    }]);
}

#[test]
fn diagnostics_log_keeps_only_the_most_recent_entries() {
    let clock = ManualClock::new(start());
    let (chart, _) = build_chart(&clock);
    let log = DiagnosticsLog::with_capacity(2);
    chart.set_diagnostics_sink(log.clone());

    for label in ["a", "b", "c"] {
        chart.consume_sample(&Sample::new(label, "1"));
    }
    let labels: Vec<String> = log
        .entries()
        .iter()
        .map(|entry| entry.label().to_owned())
        .collect();
    assert_eq!(labels, vec!["b".to_owned(), "c".to_owned()]);
}

#[test]
fn duplicate_registration_is_an_error() {
    let clock = ManualClock::new(start());
    let (chart, _log) = build_chart(&clock);
    assert!(chart.add_line("cpu", Color::RED).is_err());
}

#[test]
fn samples_decode_from_json_without_an_error_field() {
    let sample: Sample =
        serde_json::from_str(r#"{"label":"cpu","value":"1.5"}"#).expect("decode sample");
    assert_eq!(sample, Sample::new("cpu", "1.5"));
    assert_eq!(sample.parse_value().expect("numeric"), 1.5);
}

#[test]
fn concurrent_producers_and_renderer_share_one_chart() {
    const PRODUCERS: usize = 4;
    const SAMPLES: usize = 250;

    let clock = ManualClock::new(start());
    let chart = Arc::new(
        RunChart::with_clock(RunChartConfig::new("shared", 1, 200), Arc::new(clock.clone()))
            .expect("chart init"),
    );
    for producer in 0..PRODUCERS {
        chart
            .add_line(format!("line-{producer}"), Color::WHITE)
            .expect("register line");
    }

    let mut handles = Vec::new();
    for producer in 0..PRODUCERS {
        let chart = Arc::clone(&chart);
        let clock = clock.clone();
        handles.push(thread::spawn(move || {
            let label = format!("line-{producer}");
            for step in 0..SAMPLES {
                clock.advance(TimeDelta::milliseconds(1));
                let outcome = chart.consume_sample(&Sample::new(label.as_str(), step.to_string()));
                assert!(outcome.is_stored());
            }
        }));
    }

    let renderer = {
        let chart = Arc::clone(&chart);
        thread::spawn(move || {
            let area = CellRect::from_size(0, 0, 60, 16);
            let mut buffer = CellBuffer::new(area);
            for _ in 0..50 {
                buffer.reset();
                chart.draw(&mut buffer, area).expect("draw");
            }
        })
    };

    for handle in handles {
        handle.join().expect("producer thread");
    }
    renderer.join().expect("renderer thread");

    for producer in 0..PRODUCERS {
        let stats = chart
            .line_stats(&format!("line-{producer}"))
            .expect("stats");
        assert_eq!(stats.appended, SAMPLES as u64);
        assert_eq!(stats.points_len, SAMPLES);
        assert_eq!(stats.last_value, Some((SAMPLES - 1) as f64));
    }
}

#[test]
fn clock_going_backwards_still_stores_samples() {
    let clock = ManualClock::new(start());
    let (chart, _log) = build_chart(&clock);

    chart.consume_sample(&Sample::new("cpu", "1"));
    clock.advance(TimeDelta::seconds(-5));
    chart.consume_sample(&Sample::new("cpu", "2"));

    let snapshot = chart.snapshot();
    assert_eq!(snapshot.lines[0].points_len, 2);
    assert_eq!(snapshot.lines[0].last_delta, Some(1.0));
}
