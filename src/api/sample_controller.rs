use tracing::{trace, warn};

use crate::core::Sample;
use crate::extensions::SampleDiagnostic;

use super::RunChart;
use super::run_chart::RunChartState;

/// What happened to one consumed sample.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleOutcome {
    Stored {
        points_len: usize,
        /// Points evicted when this append triggered a retention pass.
        trimmed: Option<usize>,
    },
    Dropped(SampleDiagnostic),
}

impl SampleOutcome {
    #[must_use]
    pub fn is_stored(&self) -> bool {
        matches!(self, Self::Stored { .. })
    }
}

impl RunChart {
    /// Ingests one sample, stamped with the chart clock.
    ///
    /// Never fails: producer errors, non-numeric values and unknown labels
    /// leave the store untouched and are reported to the diagnostics sink.
    pub fn consume_sample(&self, sample: &Sample) -> SampleOutcome {
        let source_error = sample.error.as_deref().filter(|message| !message.is_empty());
        let parsed = match (source_error, sample.parse_value()) {
            (Some(message), _) => Err(SampleDiagnostic::SourceError {
                label: sample.label.clone(),
                message: message.to_owned(),
            }),
            (None, Ok(value)) if value.is_finite() => Ok(value),
            (None, Ok(_)) => Err(SampleDiagnostic::ParseFailure {
                label: sample.label.clone(),
                value: sample.value.clone(),
                reason: "value is not finite".to_owned(),
            }),
            (None, Err(err)) => Err(SampleDiagnostic::ParseFailure {
                label: sample.label.clone(),
                value: sample.value.clone(),
                reason: err.to_string(),
            }),
        };

        let mut state = self.state.lock();
        let value = match parsed {
            Ok(value) => value,
            Err(diagnostic) => return reject(&mut state, diagnostic),
        };

        let now = self.clock.now();
        let grid = state.grid;
        match state.store.append(&sample.label, value, now, &grid) {
            Some(report) => {
                if let Some(evicted) = report.trimmed {
                    trace!(label = %sample.label, evicted, "retention pass after append");
                }
                SampleOutcome::Stored {
                    points_len: report.points_len,
                    trimmed: report.trimmed,
                }
            }
            None => reject(
                &mut state,
                SampleDiagnostic::UnknownLabel {
                    label: sample.label.clone(),
                },
            ),
        }
    }
}

fn reject(state: &mut RunChartState, diagnostic: SampleDiagnostic) -> SampleOutcome {
    warn!(label = diagnostic.label(), ?diagnostic, "drop sample");
    if let Some(sink) = state.diagnostics.as_mut() {
        sink.report(&diagnostic);
    }
    SampleOutcome::Dropped(diagnostic)
}
