//! Attendance dataset and chart rendering for the Expo dashboard

pub mod daily_trend;
pub mod dataset;
pub mod figure;
pub mod fonts;
pub mod pivot;
pub mod renderer;
pub mod types;
pub mod weekday_bars;

pub use daily_trend::DailyTrendChart;
pub use dataset::{week_start, weekday_label, AttendanceRow, AttendanceTable, WEEKDAY_LABELS};
pub use figure::DashboardFigure;
pub use fonts::{FontCatalog, FontFile};
pub use pivot::PivotView;
pub use renderer::PanelRenderer;
pub use types::{parse_color, ChartStyle, DEFAULT_FONT_FAMILY};
pub use weekday_bars::WeekdayBarChart;
