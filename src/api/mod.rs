mod axis_renderer;
mod frame_summary;
mod grid_builder;
mod legend_renderer;
mod line_renderer;
mod run_chart;
mod run_chart_config;
mod run_chart_snapshot;
mod sample_controller;
mod selection_controller;

pub use frame_summary::{FrameSummary, LineTrace};
pub use run_chart::RunChart;
pub use run_chart_config::{LegendConfig, RunChartConfig};
pub use run_chart_snapshot::{LineStats, RunChartSnapshot};
pub use sample_controller::SampleOutcome;
pub use selection_controller::SelectionReport;
