use chrono::Local;
use smallvec::SmallVec;

use crate::core::{CellPoint, CellRect, TimeLine, TimeSeriesStore, format_value};
use crate::interaction::SelectionMode;
use crate::render::{Color, Surface, symbols};

use super::LegendConfig;

const LEGEND_X_INDENT: i32 = 10;
const LEGEND_Y_INDENT: i32 = 1;
const HEIGHT_ON_DEFAULT: i32 = 2;
const HEIGHT_ON_PINPOINT: i32 = 4;
const HEIGHT_ON_DETAILS: i32 = 6;

const SELECTION_TIME_FORMAT: &str = "%H:%M:%S%.3f";

type LegendRows = SmallVec<[String; 4]>;

/// Draws one legend block per line, in columns growing leftwards from the
/// right edge of `area`.
pub(super) fn render_legend<S: Surface + ?Sized>(
    surface: &mut S,
    store: &TimeSeriesStore,
    area: CellRect,
    legend: LegendConfig,
    mode: SelectionMode,
    precision: usize,
) {
    if !legend.enabled || store.is_empty() {
        return;
    }

    let height = match mode {
        SelectionMode::Pinpoint => HEIGHT_ON_PINPOINT,
        SelectionMode::Live if legend.details => HEIGHT_ON_DETAILS,
        SelectionMode::Live => HEIGHT_ON_DEFAULT,
    };
    let rows_per_column = ((area.height() - LEGEND_Y_INDENT) / height).max(1);

    let blocks: Vec<(&TimeLine, LegendRows)> = store
        .lines()
        .map(|line| (line, legend_rows(line, legend, mode, precision)))
        .collect();
    let column_width = blocks
        .iter()
        .flat_map(|(line, rows)| {
            std::iter::once(line.label().chars().count())
                .chain(rows.iter().map(|row| row.chars().count()))
        })
        .max()
        .map_or(0, |width| i32::try_from(width).unwrap_or(i32::MAX));

    for (index, (line, rows)) in blocks.iter().enumerate() {
        let index = i32::try_from(index).unwrap_or(i32::MAX);
        let column = index / rows_per_column;
        let row = index % rows_per_column;
        let x = area.max_x - (column_width + LEGEND_X_INDENT) * (column + 1);
        let y = area.min_y + LEGEND_Y_INDENT + row * height;

        surface.set_string(&symbols::DOT.to_string(), CellPoint::new(x - 2, y), line.color());
        surface.set_string(line.label(), CellPoint::new(x, y), line.color());
        for (offset, text) in rows.iter().enumerate() {
            let offset = i32::try_from(offset).unwrap_or(i32::MAX);
            surface.set_string(text, CellPoint::new(x, y + 1 + offset), Color::WHITE);
        }
    }
}

fn legend_rows(
    line: &TimeLine,
    legend: LegendConfig,
    mode: SelectionMode,
    precision: usize,
) -> LegendRows {
    let mut rows = LegendRows::new();

    if mode == SelectionMode::Pinpoint {
        if let Some(point) = line.selection_point() {
            let time = point.timestamp.with_timezone(&Local).format(SELECTION_TIME_FORMAT);
            rows.push(format!("time  {time}"));
            rows.push(format!("value {}", format_value(point.value, precision)));
        }
        return rows;
    }

    let Some(current) = line.last_value() else {
        return rows;
    };
    rows.push(format!("cur {}", format_value(current, precision)));
    if legend.details {
        let delta = line.last_delta().unwrap_or(0.0);
        let extrema = line.extrema();
        rows.push(format!("dlt {}", format_value(delta, precision)));
        rows.push(format!("max {}", format_value(extrema.max, precision)));
        rows.push(format!("min {}", format_value(extrema.min, precision)));
    }
    rows
}
