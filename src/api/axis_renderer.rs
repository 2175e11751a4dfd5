use chrono::Local;

use crate::core::{
    CellPoint, CellRect, ChartGrid, GRID_WIDTH, TIME_LABEL_WIDTH, format_value,
};
use crate::render::{Cell, Color, Surface, symbols};

/// Rows reserved under the horizontal axis for time labels.
pub(super) const TIME_LABEL_HEIGHT: i32 = 1;
const VALUE_LABEL_HEIGHT: i32 = 1;
const VALUE_LABEL_INDENT: i32 = 1;

const TIME_LABEL_FORMAT: &str = "%H:%M:%S";

/// Draws axes, dashed grid lines, and time/value labels around the plot.
pub(super) fn render_axes<S: Surface + ?Sized>(
    surface: &mut S,
    area: CellRect,
    grid: &ChartGrid,
    precision: usize,
) {
    let axis_y = area.max_y - TIME_LABEL_HEIGHT - 1;
    let origin_x = area.min_x + grid.min_time_width;

    surface.set_cell(
        CellPoint::new(origin_x, axis_y),
        Cell::new(symbols::BOTTOM_LEFT, Color::WHITE),
    );
    for x in origin_x + 1..area.max_x {
        surface.set_cell(
            CellPoint::new(x, axis_y),
            Cell::new(symbols::HORIZONTAL_DASH, Color::WHITE),
        );
    }

    // Vertical grid lines on every other row, right to left.
    for y in (0..area.height() - TIME_LABEL_HEIGHT - 2).step_by(2) {
        for line in 1..=grid.lines_count {
            surface.set_cell(
                CellPoint::new(grid.max_time_width - line * GRID_WIDTH, area.min_y + y + 1),
                Cell::new(symbols::VERTICAL_DASH, Color::DARK_GREY),
            );
        }
    }

    for y in 0..area.height() - TIME_LABEL_HEIGHT - 1 {
        surface.set_cell(
            CellPoint::new(origin_x, area.min_y + y),
            Cell::new(symbols::VERTICAL_DASH, Color::WHITE),
        );
    }

    for line in 1..=grid.lines_count {
        let Some(label_time) = grid.timescale.checked_mul(line).map(|offset| grid.time_range.max - offset)
        else {
            break;
        };
        let label = label_time
            .with_timezone(&Local)
            .format(TIME_LABEL_FORMAT)
            .to_string();
        surface.set_string(
            &label,
            CellPoint::new(
                grid.max_time_width - TIME_LABEL_WIDTH / 2 - line * GRID_WIDTH,
                area.max_y - 1,
            ),
            Color::WHITE,
        );
    }

    render_value_labels(surface, area, grid, precision);
}

fn render_value_labels<S: Surface + ?Sized>(
    surface: &mut S,
    area: CellRect,
    grid: &ChartGrid,
    precision: usize,
) {
    let extrema = grid.value_extrema;
    // Same spacing as the line mapper: draw height minus two rows.
    let usable_rows = area.height() - TIME_LABEL_HEIGHT - 3;

    if extrema.is_flat() || usable_rows <= 0 {
        surface.set_string(
            &format_value(extrema.max, precision),
            CellPoint::new(area.min_x, area.min_y + area.height() / 2),
            Color::WHITE,
        );
        return;
    }

    let step = VALUE_LABEL_INDENT + VALUE_LABEL_HEIGHT;
    let labels_count = (area.height() - TIME_LABEL_HEIGHT - 1) / step;
    let value_per_row = (extrema.max - extrema.min) / f64::from(usable_rows);
    for index in 0..labels_count {
        let value = extrema.max - value_per_row * f64::from(index * step);
        surface.set_string(
            &format_value(value, precision),
            CellPoint::new(area.min_x, area.min_y + 1 + index * step),
            Color::WHITE,
        );
    }
}
