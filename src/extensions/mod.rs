pub mod diagnostics;

pub use diagnostics::{DiagnosticsLog, DiagnosticsSink, SampleDiagnostic};
