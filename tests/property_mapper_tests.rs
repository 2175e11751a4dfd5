use approx::assert_relative_eq;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use runchart_rs::core::{
    ChartGrid, TimeRange, ValueExtrema, format_value, time_to_column, timescale, value_to_row,
};
use runchart_rs::interaction::SelectionController;

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("valid base")
}

proptest! {
    #[test]
    fn time_to_column_is_non_decreasing(
        refresh_rate_ms in 1u64..10_000,
        max_time_width in 0i32..4_000,
        first_ms in -3_600_000i64..3_600_000,
        gap_ms in 0i64..3_600_000
    ) {
        let mut grid = ChartGrid::initial(base(), timescale(refresh_rate_ms));
        grid.max_time_width = max_time_width;

        let earlier = base() + TimeDelta::milliseconds(first_ms);
        let later = earlier + TimeDelta::milliseconds(gap_ms);
        prop_assert!(time_to_column(earlier, &grid) <= time_to_column(later, &grid));
        prop_assert_eq!(time_to_column(base(), &grid), max_time_width);
    }

    #[test]
    fn flat_ranges_always_map_to_the_middle_row(
        value in -1.0e12f64..1.0e12,
        draw_height in -4i32..500
    ) {
        let row = value_to_row(value, ValueExtrema::flat(value), draw_height);
        if draw_height <= 2 {
            prop_assert_eq!(row, 0);
        } else {
            prop_assert_eq!(row, (draw_height - 2) / 2);
        }
    }

    #[test]
    fn values_inside_the_extrema_stay_inside_the_plot(
        min in -1.0e6f64..1.0e6,
        span in 0.001f64..1.0e6,
        factor in 0.0f64..=1.0,
        draw_height in 3i32..400
    ) {
        let extrema = ValueExtrema { min, max: min + span };
        let value = min + factor * span;
        let row = value_to_row(value, extrema, draw_height);
        prop_assert!(row >= 0);
        prop_assert!(row <= draw_height - 2);
    }

    #[test]
    fn selection_cursor_never_leaves_the_visible_window(
        window_secs in 1i64..10_000,
        shifts in prop::collection::vec(-5_000i32..5_000, 1..40),
        column_ms in 1i64..5_000
    ) {
        let visible = TimeRange::new(base(), base() + TimeDelta::seconds(window_secs));
        let mut selection = SelectionController::default();
        for shift in shifts {
            selection.move_selection(shift, visible, TimeDelta::milliseconds(column_ms));
            let cursor = selection.cursor().expect("pinpoint cursor");
            prop_assert!(visible.contains(cursor));
        }
    }

    #[test]
    fn formatted_values_parse_back_within_precision(
        value in -1.0e9f64..1.0e9,
        precision in 0usize..6
    ) {
        let parsed: f64 = format_value(value, precision).parse().expect("numeric label");
        let tolerance = 0.5 * 10f64.powi(-(precision as i32)) + 1e-9 * value.abs();
        assert_relative_eq!(parsed, value, epsilon = tolerance);
    }
}
