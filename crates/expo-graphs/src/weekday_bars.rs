//! Grouped weekday bars, one bar per week, with weekday means

use expo_common::Result;
use plotters::coord::combinators::BindKeyPoints;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::{ChartStyle, PanelRenderer, PivotView};

pub const TITLE: &str = "曜日ごとの来場者数（週別）＋曜日平均";
pub const X_DESC: &str = "曜日";
pub const Y_DESC: &str = "人数";
pub const LEGEND_TITLE: &str = "週の開始日";

/// x-axis units per weekday group; group `g` is centred on `g * GROUP_UNITS`
const GROUP_UNITS: i32 = 1000;

/// Half the drawn width of one group of bars
const HALF_GROUP: i32 = 400;

/// Right panel: visitors by weekday, grouped by week start.
///
/// Each weekday group also carries a red dashed segment at the mean of that
/// weekday's present values, labelled in units of 10,000 (`万`).
#[derive(Debug, Clone, Copy)]
pub struct WeekdayBarChart<'a> {
    pivot: &'a PivotView,
}

impl<'a> WeekdayBarChart<'a> {
    pub fn new(pivot: &'a PivotView) -> Self {
        Self { pivot }
    }

    fn center(group: usize) -> i32 {
        group as i32 * GROUP_UNITS
    }

    /// Left and right x of the bar for week `week_index` in group `group`
    fn bar_span(&self, group: usize, week_index: usize) -> (i32, i32) {
        let weeks = self.pivot.week_starts().len().max(1) as i32;
        let left = Self::center(group) - HALF_GROUP;
        let width = 2 * HALF_GROUP;
        (
            left + week_index as i32 * width / weeks,
            left + (week_index as i32 + 1) * width / weeks,
        )
    }

    /// `12.3万` style label for a mean
    pub fn mean_label(mean: f64) -> String {
        format!("{:.1}万", mean / 10_000.0)
    }
}

impl PanelRenderer for WeekdayBarChart<'_> {
    fn title(&self) -> &str {
        TITLE
    }

    fn draw<DB>(&self, area: &DrawingArea<DB, Shift>, style: &ChartStyle) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        if self.pivot.is_empty() {
            return Err(expo_common::ExpoError::graph("No data to render"));
        }

        let weekdays = self.pivot.weekdays();
        let labels = self.pivot.row_labels();
        let groups = weekdays.len();
        let y_max = (self.pivot.max_value() as f64 * 1.15).max(1.0);
        let centers: Vec<i32> = (0..groups).map(Self::center).collect();
        let x_end = Self::center(groups) - GROUP_UNITS / 2;

        let mut chart = ChartBuilder::on(area)
            .caption(self.title(), self.caption_font(style))
            .margin(16)
            .x_label_area_size(48)
            .y_label_area_size(80)
            .build_cartesian_2d(
                (-GROUP_UNITS / 2..x_end).with_key_points(centers),
                0.0..y_max,
            )?;

        let group_label = |x: &i32| {
            usize::try_from(x / GROUP_UNITS)
                .ok()
                .and_then(|index| labels.get(index))
                .map(|l| l.to_string())
                .unwrap_or_default()
        };
        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(X_DESC)
            .y_desc(Y_DESC)
            .x_label_formatter(&group_label)
            .y_label_formatter(&|y| format!("{:.0}", y))
            .label_style(self.label_font(style))
            .axis_desc_style(self.label_font(style))
            .draw()?;

        // Header entry so the legend reads as a titled list of week starts
        chart
            .draw_series(std::iter::empty::<Rectangle<(i32, f64)>>())?
            .label(LEGEND_TITLE)
            .legend(|(x, y)| EmptyElement::at((x, y)));

        for (week_index, week) in self.pivot.week_starts().iter().enumerate() {
            let color = style.series_color(week_index);
            let bars: Vec<Rectangle<(i32, f64)>> = weekdays
                .iter()
                .enumerate()
                .filter_map(|(group, weekday)| {
                    let value = self.pivot.get(*weekday, *week)?;
                    let (left, right) = self.bar_span(group, week_index);
                    Some(Rectangle::new([(left, 0.0), (right, value as f64)], color.filled()))
                })
                .collect();

            chart
                .draw_series(bars)?
                .label(week.format("%Y-%m-%d").to_string())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                });
        }

        let mean_font = (style.font_family.as_str(), f64::from(style.font_size))
            .into_font()
            .color(&style.mean_line);
        for (group, (_, mean)) in self.pivot.weekday_means().into_iter().enumerate() {
            let center = Self::center(group);
            chart.draw_series(DashedLineSeries::new(
                vec![(center - HALF_GROUP, mean), (center + HALF_GROUP, mean)],
                8,
                4,
                style.mean_line.stroke_width(2),
            ))?;
            chart.draw_series(std::iter::once(Text::new(
                Self::mean_label(mean),
                (center + HALF_GROUP + GROUP_UNITS / 20, mean),
                mean_font.clone(),
            )))?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(self.label_font(style))
            .draw()?;

        Ok(())
    }
}
