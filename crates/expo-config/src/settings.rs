//! Application configuration structures

use expo_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default site searched for attendance articles
pub const DEFAULT_ORIGIN: &str = "https://www.expo2025.or.jp";

/// Title shared by every attendance report on the site
pub const DEFAULT_KEYWORD: &str = "来場者数と入場チケット販売数について";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Where the articles live and how to find them
    #[validate]
    pub site: SiteConfig,

    /// How article tables are read
    #[validate]
    pub scrape: ScrapeConfig,

    /// HTTP dashboard settings
    #[validate]
    pub dashboard: DashboardConfig,

    /// Local font discovery
    #[validate]
    pub fonts: FontConfig,

    /// Chart rendering settings
    #[validate]
    pub chart: ChartConfig,

    /// Logging configuration
    #[validate]
    pub logging: LogSettings,
}

/// Source site configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SiteConfig {
    /// Base origin; the search page is `<origin>/?s=<keyword>`
    #[validate(custom(
        function = "crate::validation::validate_origin",
        message = "Origin must be an absolute http(s) URL without query"
    ))]
    pub origin: String,

    /// Text that identifies attendance articles in link captions
    #[validate(length(min = 1, message = "Search keyword cannot be empty"))]
    pub search_keyword: String,
}

/// Table reading configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Year prepended to every `<m>月<d>日` cell
    #[validate(range(min = 2000, max = 2100, message = "Event year must be between 2000 and 2100"))]
    pub event_year: i32,

    /// CSS class of the attendance table
    #[validate(length(min = 1, message = "Table class cannot be empty"))]
    pub table_class: String,

    /// Rows whose first cell contains this token are totals and skipped
    #[validate(length(min = 1, message = "Summary marker cannot be empty"))]
    pub summary_marker: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub timeout_seconds: u64,

    /// User-Agent header sent with every request
    #[validate(length(min = 1, message = "User agent cannot be empty"))]
    pub user_agent: String,
}

/// Dashboard server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DashboardConfig {
    /// Listen address
    #[validate(custom(
        function = "crate::validation::validate_bind_address",
        message = "Bind address must be host:port"
    ))]
    pub bind: String,

    /// Page heading and document title
    #[validate(length(min = 1, message = "Page title cannot be empty"))]
    pub title: String,
}

/// Font discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FontConfig {
    /// Directory scanned for `.ttf` files
    #[validate(length(min = 1, message = "Font directory cannot be empty"))]
    pub dir: String,

    /// Substring a font file name must contain to be picked
    #[validate(length(min = 1, message = "Font family hint cannot be empty"))]
    pub family_hint: String,
}

/// Chart rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartConfig {
    /// Full figure width in pixels (both panels)
    #[validate(range(min = 400, max = 6000, message = "Width must be between 400 and 6000 pixels"))]
    pub width: u32,

    /// Figure height in pixels
    #[validate(range(
        min = 200,
        max = 4000,
        message = "Height must be between 200 and 4000 pixels"
    ))]
    pub height: u32,

    /// Background color (hex format)
    #[validate(regex(
        path = "crate::validation::HEX_COLOR_REGEX",
        message = "Background color must be valid hex color"
    ))]
    pub background_color: String,

    /// Line color for total visitors
    #[validate(regex(
        path = "crate::validation::HEX_COLOR_REGEX",
        message = "Visitors color must be valid hex color"
    ))]
    pub visitors_color: String,

    /// Line color for accompanying-pass entries
    #[validate(regex(
        path = "crate::validation::HEX_COLOR_REGEX",
        message = "Pass holders color must be valid hex color"
    ))]
    pub pass_holders_color: String,

    /// Color of the weekly separator lines
    #[validate(regex(
        path = "crate::validation::HEX_COLOR_REGEX",
        message = "Week line color must be valid hex color"
    ))]
    pub week_line_color: String,

    /// Color of the weekday mean markers
    #[validate(regex(
        path = "crate::validation::HEX_COLOR_REGEX",
        message = "Mean line color must be valid hex color"
    ))]
    pub mean_line_color: String,

    /// Bar colors, one per week, cycled when there are more weeks
    #[validate(custom(
        function = "crate::validation::validate_palette",
        message = "Palette must hold at least one valid hex color"
    ))]
    pub palette: Vec<String>,

    /// Base font size for labels
    #[validate(range(min = 8, max = 72, message = "Font size must be between 8 and 72"))]
    pub font_size: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LogSettings {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(
        function = "crate::validation::validate_log_level",
        message = "Log level must be one of: trace, debug, info, warn, error"
    ))]
    pub level: String,

    /// Optional log file path
    pub file: Option<String>,

    /// One JSON object per event
    pub json: bool,

    /// Multi-line colored output
    pub pretty: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            search_keyword: DEFAULT_KEYWORD.to_string(),
        }
    }
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            event_year: 2025,
            table_class: "has-fixed-layout".to_string(),
            summary_marker: "合計".to_string(),
            timeout_seconds: 30,
            user_agent: format!("expo-attendance/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8501".to_string(),
            title: "大阪・関西万博 来場者数分析".to_string(),
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            dir: ".streamlit/fonts".to_string(),
            family_hint: "IPAex".to_string(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 600,
            background_color: "#FFFFFF".to_string(),
            visitors_color: "#1F77B4".to_string(),
            pass_holders_color: "#FF7F0E".to_string(),
            week_line_color: "#808080".to_string(),
            mean_line_color: "#FF0000".to_string(),
            palette: [
                "#1F77B4", "#FF7F0E", "#2CA02C", "#D62728", "#9467BD", "#8C564B", "#E377C2",
                "#7F7F7F", "#BCBD22", "#17BECF",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
            font_size: 14,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            json: false,
            pretty: false,
        }
    }
}

impl LogSettings {
    /// Translate into the subscriber configuration used by `expo_common::init_logging`
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            json_format: self.json,
            pretty_format: self.pretty,
            file_path: self.file.clone(),
            ..LoggingConfig::default()
        }
    }
}

impl Config {
    /// Validation of the entire configuration, including cross-field rules
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()?;

        let mut errors = validator::ValidationErrors::new();
        if self.logging.json && self.logging.pretty {
            errors.add(
                "logging",
                validator::ValidationError::new("json_and_pretty_are_exclusive"),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.validate_all().is_ok());
        assert_eq!(config.site.origin, "https://www.expo2025.or.jp");
        assert_eq!(config.scrape.event_year, 2025);
        assert_eq!(config.scrape.table_class, "has-fixed-layout");
        assert_eq!(config.scrape.summary_marker, "合計");
        assert_eq!(config.fonts.dir, ".streamlit/fonts");
        assert_eq!(config.chart.width, 1600);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();

        let yaml = serde_yaml::to_string(&config).expect("Failed to serialize to YAML");
        assert!(yaml.contains("site:"));
        assert!(yaml.contains("scrape:"));
        assert!(yaml.contains("chart:"));

        let deserialized: Config =
            serde_yaml::from_str(&yaml).expect("Failed to deserialize from YAML");
        assert_eq!(config.site.search_keyword, deserialized.site.search_keyword);
        assert_eq!(config.chart.palette, deserialized.chart.palette);
    }

    #[test]
    fn test_toml_round_trip_of_partial_file() {
        let config: Config = toml::from_str("[scrape]\nevent_year = 2026\n").unwrap();
        assert_eq!(config.scrape.event_year, 2026);
        assert_eq!(config.scrape.table_class, "has-fixed-layout");
        assert_eq!(config.dashboard.bind, "127.0.0.1:8501");
    }

    #[test]
    fn test_site_config_validation() {
        let mut site = SiteConfig::default();
        assert!(site.validate().is_ok());

        site.search_keyword = String::new();
        assert!(site.validate().is_err());

        site.search_keyword = DEFAULT_KEYWORD.to_string();
        site.origin = "not a url".to_string();
        assert!(site.validate().is_err());
    }

    #[test]
    fn test_chart_config_validation() {
        let mut chart = ChartConfig::default();
        assert!(chart.validate().is_ok());

        chart.width = 100;
        assert!(chart.validate().is_err());

        chart.width = 1600;
        chart.mean_line_color = "red".to_string();
        assert!(chart.validate().is_err());

        chart.mean_line_color = "#FF0000".to_string();
        chart.palette.clear();
        assert!(chart.validate().is_err());
    }

    #[test]
    fn test_nested_errors_surface_from_root() {
        let mut config = Config::default();
        config.scrape.timeout_seconds = 0;
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_json_and_pretty_logging_conflict() {
        let mut config = Config::default();
        config.logging.json = true;
        config.logging.pretty = true;
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_log_settings_translation() {
        let settings = LogSettings {
            level: "debug".to_string(),
            file: Some("logs/dashboard.log".to_string()),
            json: true,
            pretty: false,
        };
        let logging = settings.to_logging_config();
        assert_eq!(logging.level, "debug");
        assert!(logging.json_format);
        assert_eq!(logging.file_path.as_deref(), Some("logs/dashboard.log"));
    }
}
