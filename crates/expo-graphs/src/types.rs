//! Chart styling types

use expo_config::ChartConfig;
use plotters::style::RGBColor;

/// Generic family plotters falls back to when a named one is not installed
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Resolved colors and sizes for one figure.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub visitors: RGBColor,
    pub pass_holders: RGBColor,
    pub week_line: RGBColor,
    pub mean_line: RGBColor,
    pub palette: Vec<RGBColor>,
    /// Family for chart text; the page additionally applies the served font via CSS
    pub font_family: String,
    pub font_size: u32,
}

impl ChartStyle {
    pub fn from_config(config: &ChartConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            background: parse_color(&config.background_color),
            visitors: parse_color(&config.visitors_color),
            pass_holders: parse_color(&config.pass_holders_color),
            week_line: parse_color(&config.week_line_color),
            mean_line: parse_color(&config.mean_line_color),
            palette: config.palette.iter().map(|c| parse_color(c)).collect(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: config.font_size,
        }
    }

    /// Use a discovered family for chart text, keeping the default when there is none
    pub fn with_font_family(mut self, family: Option<&str>) -> Self {
        if let Some(family) = family.map(str::trim).filter(|f| !f.is_empty()) {
            self.font_family = family.to_string();
        }
        self
    }

    /// Color for the `index`-th weekly series, cycling through the palette
    pub fn series_color(&self, index: usize) -> RGBColor {
        if self.palette.is_empty() {
            self.visitors
        } else {
            self.palette[index % self.palette.len()]
        }
    }

    /// Width of each of the two side-by-side panels
    pub fn panel_width(&self) -> u32 {
        self.width / 2
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

/// Parse a `#RRGGBB` string, falling back to black
pub fn parse_color(color_str: &str) -> RGBColor {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    RGBColor(0, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!(parse_color("#FF0000"), RGBColor(255, 0, 0));
        assert_eq!(parse_color("#1f77b4"), RGBColor(31, 119, 180));

        assert_eq!(parse_color("invalid"), RGBColor(0, 0, 0));
        assert_eq!(parse_color("#ZZ0000"), RGBColor(0, 0, 0));
        assert_eq!(parse_color("#日本"), RGBColor(0, 0, 0));
    }

    #[test]
    fn test_style_from_default_config() {
        let style = ChartStyle::default();
        assert_eq!(style.width, 1600);
        assert_eq!(style.panel_width(), 800);
        assert_eq!(style.mean_line, RGBColor(255, 0, 0));
        assert_eq!(style.palette.len(), 10);
    }

    #[test]
    fn test_font_family_override() {
        let style = ChartStyle::default();
        assert_eq!(style.font_family, DEFAULT_FONT_FAMILY);

        let style = style.with_font_family(Some("IPAexGothic"));
        assert_eq!(style.font_family, "IPAexGothic");

        let style = ChartStyle::default().with_font_family(Some("  "));
        assert_eq!(style.font_family, DEFAULT_FONT_FAMILY);
        assert_eq!(ChartStyle::default().with_font_family(None).font_family, DEFAULT_FONT_FAMILY);
    }

    #[test]
    fn test_series_color_cycles() {
        let mut style = ChartStyle::default();
        style.palette = vec![RGBColor(1, 1, 1), RGBColor(2, 2, 2)];
        assert_eq!(style.series_color(0), RGBColor(1, 1, 1));
        assert_eq!(style.series_color(3), RGBColor(2, 2, 2));

        style.palette.clear();
        assert_eq!(style.series_color(5), style.visitors);
    }
}
