//! Configuration management for the Expo attendance dashboard

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{
    ChartConfig, Config, DashboardConfig, FontConfig, LogSettings, ScrapeConfig, SiteConfig,
};
