//! Two-panel dashboard figure

use expo_common::{ExpoError, Result};
use image::{codecs::png::PngEncoder, ColorType, ImageEncoder};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{debug, instrument};

use crate::{
    AttendanceTable, ChartStyle, DailyTrendChart, PanelRenderer, PivotView, WeekdayBarChart,
};

/// Daily trend on the left, weekday bars on the right.
#[derive(Debug, Clone)]
pub struct DashboardFigure<'a> {
    table: &'a AttendanceTable,
    pivot: PivotView,
    style: &'a ChartStyle,
}

impl<'a> DashboardFigure<'a> {
    pub fn new(table: &'a AttendanceTable, style: &'a ChartStyle) -> Self {
        Self {
            table,
            pivot: PivotView::from_table(table),
            style,
        }
    }

    pub fn pivot(&self) -> &PivotView {
        &self.pivot
    }

    fn draw_on<DB>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        if self.table.is_empty() {
            return Err(ExpoError::graph("No data to render"));
        }

        root.fill(&self.style.background)?;
        let (left, right) = root.split_horizontally(self.style.panel_width());

        DailyTrendChart::new(self.table).draw(&left, self.style)?;
        WeekdayBarChart::new(&self.pivot).draw(&right, self.style)?;
        Ok(())
    }

    /// Render as an SVG document
    #[instrument(skip(self), fields(rows = self.table.len()))]
    pub fn render_svg(&self) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.style.width, self.style.height))
                .into_drawing_area();
            self.draw_on(&root)?;
            root.present()?;
        }
        debug!(bytes = svg.len(), "Rendered SVG figure");
        Ok(svg)
    }

    /// Render as PNG bytes
    #[instrument(skip(self), fields(rows = self.table.len()))]
    pub fn render_png(&self) -> Result<Vec<u8>> {
        let (width, height) = (self.style.width, self.style.height);
        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
            self.draw_on(&root)?;
            root.present()?;
        }

        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(&pixels, width, height, ColorType::Rgb8)
            .map_err(|e| ExpoError::graph_with_source("Failed to encode PNG", e))?;
        debug!(bytes = png.len(), "Rendered PNG figure");
        Ok(png)
    }
}
