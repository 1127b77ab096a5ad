//! Panel rendering trait

use crate::ChartStyle;
use expo_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

/// One chart panel drawn into a region of a larger figure.
pub trait PanelRenderer {
    /// Caption drawn above the plotting area
    fn title(&self) -> &str;

    /// Draw the panel into `area`
    fn draw<DB>(&self, area: &DrawingArea<DB, Shift>, style: &ChartStyle) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static;

    /// Caption font, a few points larger than the label font
    fn caption_font<'a>(&self, style: &'a ChartStyle) -> (&'a str, u32) {
        (style.font_family.as_str(), style.font_size + 6)
    }

    /// Tick label and axis description font
    fn label_font<'a>(&self, style: &'a ChartStyle) -> (&'a str, u32) {
        (style.font_family.as_str(), style.font_size)
    }
}
