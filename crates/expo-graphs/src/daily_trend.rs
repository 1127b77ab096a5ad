//! Daily attendance line chart with weekly separators

use chrono::{Duration, NaiveDate};
use expo_common::{ExpoError, Result};
use plotters::coord::combinators::BindKeyPoints;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::{AttendanceTable, ChartStyle, PanelRenderer};

pub const TITLE: &str = "日別の来場者数推移（週区切り：日曜日）";
pub const X_DESC: &str = "日付（日曜日のみ表示）";
pub const Y_DESC: &str = "人数";
pub const VISITORS_LABEL: &str = "来場者数";
pub const PASS_HOLDERS_LABEL: &str = "AD証入場者数";

/// Left panel: visitors and accompanying-pass entries per day.
///
/// The x axis counts days from the first date; ticks sit only on Sundays and
/// every Sunday gets a dashed vertical line.
#[derive(Debug, Clone, Copy)]
pub struct DailyTrendChart<'a> {
    table: &'a AttendanceTable,
}

impl<'a> DailyTrendChart<'a> {
    pub fn new(table: &'a AttendanceTable) -> Self {
        Self { table }
    }

    fn day_offset(origin: NaiveDate, date: NaiveDate) -> i32 {
        (date - origin).num_days() as i32
    }

    fn y_max(&self) -> f64 {
        (self.table.max_count() as f64 * 1.1).max(1.0)
    }
}

impl PanelRenderer for DailyTrendChart<'_> {
    fn title(&self) -> &str {
        TITLE
    }

    fn draw<DB>(&self, area: &DrawingArea<DB, Shift>, style: &ChartStyle) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let (origin, last) = self
            .table
            .date_range()
            .ok_or_else(|| ExpoError::graph("No data to render"))?;

        let span = Self::day_offset(origin, last);
        let sundays: Vec<i32> = self
            .table
            .sundays()
            .into_iter()
            .map(|d| Self::day_offset(origin, d))
            .collect();
        let y_max = self.y_max();

        let mut chart = ChartBuilder::on(area)
            .caption(self.title(), self.caption_font(style))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(80)
            .build_cartesian_2d((-1..span + 1).with_key_points(sundays.clone()), 0.0..y_max)?;

        let tick_label = |x: &i32| {
            (origin + Duration::days(i64::from(*x)))
                .format("%m/%d")
                .to_string()
        };
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .x_label_formatter(&tick_label)
            .y_label_formatter(&|y| format!("{:.0}", y))
            .label_style(self.label_font(style))
            .axis_desc_style(self.label_font(style))
            .draw()?;

        for sunday in &sundays {
            chart.draw_series(DashedLineSeries::new(
                vec![(*sunday, 0.0), (*sunday, y_max)],
                6,
                4,
                style.week_line.stroke_width(1),
            ))?;
        }

        let rows = self.table.rows();
        let series = [
            (VISITORS_LABEL, style.visitors, rows.iter().map(|r| r.visitors).collect::<Vec<_>>()),
            (PASS_HOLDERS_LABEL, style.pass_holders, rows.iter().map(|r| r.pass_holders).collect()),
        ];

        for (label, color, values) in series {
            let points: Vec<(i32, f64)> = rows
                .iter()
                .zip(values)
                .map(|(row, value)| (Self::day_offset(origin, row.date), value as f64))
                .collect();

            chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)).point_size(3))?
                .label(label)
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(self.label_font(style))
            .draw()?;

        Ok(())
    }
}
