//! runchart-rs: real-time terminal run chart engine.
//!
//! Samples stream in from any number of producer threads, each series keeps
//! a bounded sliding-window history, and every draw maps that history onto a
//! character grid as braille polylines. A pinpoint mode freezes the window and
//! reports the nearest value of every series under a movable cursor.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{RunChart, RunChartConfig};
pub use error::{ChartError, ChartResult};
