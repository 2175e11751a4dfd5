use indexmap::IndexMap;

use crate::core::{
    CellPoint, CellRect, ChartGrid, TimeLine, TimePoint, TimeSeriesStore, time_to_column,
    value_to_row,
};
use crate::render::{BrailleCanvas, Cell, Surface, braille_point, symbols};

use super::LineTrace;

type Survivor = (CellPoint, TimePoint);

/// Draws every line into `draw_area` and overlays selection markers.
///
/// `cursor_column` is only set in pinpoint mode; anchoring is skipped
/// otherwise.
pub(super) fn render_lines<S: Surface + ?Sized>(
    surface: &mut S,
    store: &mut TimeSeriesStore,
    grid: &ChartGrid,
    draw_area: CellRect,
    cursor_column: Option<i32>,
) -> Vec<LineTrace> {
    let mut canvas = BrailleCanvas::new(draw_area);
    let traces: Vec<LineTrace> = store
        .lines_mut()
        .map(|line| render_line(line, grid, draw_area, cursor_column, &mut canvas))
        .collect();

    canvas.draw(surface);

    for (trace, line) in traces.iter().zip(store.lines()) {
        if let Some(marker) = trace.selection {
            surface.set_cell(marker, Cell::new(symbols::SELECTION, line.color()));
        }
    }
    traces
}

fn render_line(
    line: &mut TimeLine,
    grid: &ChartGrid,
    draw_area: CellRect,
    cursor_column: Option<i32>,
    canvas: &mut BrailleCanvas,
) -> LineTrace {
    // The window has scrolled since the oldest point was placed; shift every
    // column of the line by the same amount.
    let delta = line
        .points()
        .first()
        .map_or(0, |oldest| {
            oldest
                .column
                .saturating_sub(time_to_column(oldest.timestamp, grid))
        });
    if let Some(column) = line.selection_column.as_mut() {
        *column = column.saturating_sub(delta);
    }

    let draw_height = draw_area.height();
    let mut survivors: IndexMap<i32, Survivor> = IndexMap::new();
    for point in line.points_mut() {
        point.column = point.column.saturating_sub(delta);
        let row = value_to_row(point.value, grid.value_extrema, draw_height);
        let cell = CellPoint::new(point.column, draw_area.max_y.saturating_sub(row + 1));
        if survivors.contains_key(&cell.x) || !draw_area.contains(cell) {
            continue;
        }
        survivors.insert(cell.x, (cell, *point));
    }

    let selection = cursor_column.and_then(|cursor| match line.selection_column {
        None => find_anchor(survivors.values(), cursor),
        Some(column) => survivors.get(&column).copied(),
    });
    match selection {
        Some((cell, point)) => {
            if line.selection_column.is_none() {
                line.selection_column = Some(cell.x);
            }
            line.selection_point = Some(point);
        }
        // Anchored column scrolled or resized out of the plot.
        None if cursor_column.is_some() => line.selection_point = None,
        None => {}
    }

    let color = line.color();
    let mut previous: Option<CellPoint> = None;
    for (cell, _) in survivors.values() {
        let from = previous.unwrap_or(*cell);
        canvas.line(braille_point(from), braille_point(*cell), color);
        previous = Some(*cell);
    }

    LineTrace {
        label: line.label().to_owned(),
        points: survivors.values().map(|(cell, _)| *cell).collect(),
        selection: selection.map(|(cell, _)| cell),
        selection_point: selection.map(|(_, point)| point),
    }
}

/// First survivor whose successor lies strictly farther from the cursor
/// column, scanning oldest to newest; the newest survivor when none does.
fn find_anchor<'a, I>(survivors: I, cursor: i32) -> Option<Survivor>
where
    I: IntoIterator<Item = &'a Survivor>,
{
    let mut iter = survivors.into_iter().peekable();
    while let Some(current) = iter.next() {
        match iter.peek() {
            Some(next) if next.0.x.abs_diff(cursor) > current.0.x.abs_diff(cursor) => {
                return Some(*current);
            }
            Some(_) => {}
            None => return Some(*current),
        }
    }
    None
}
