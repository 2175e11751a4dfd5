pub mod clock;
pub mod mapper;
pub mod sample;
pub mod store;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use mapper::{
    ChartGrid, GRID_WIDTH, TIME_LABEL_INDENT, TIME_LABEL_WIDTH, TimeRange, ValueExtrema,
    format_value, live_time_range, time_to_column, timescale, value_to_row, visible_extrema,
};
pub use sample::Sample;
pub use store::{
    AppendReport, DEFAULT_RETENTION_RESERVE_MINUTES, TRIM_INTERVAL_APPENDS, TimeLine, TimePoint,
    TimeSeriesStore,
};
pub use types::{CellPoint, CellRect};
