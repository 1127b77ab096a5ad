//! Shared application state

use crate::cache::{DatasetCache, Snapshot};
use arc_swap::ArcSwap;
use chrono::Utc;
use expo_common::{ExpoError, Result, Timestamp};
use expo_config::Config;
use expo_graphs::{AttendanceTable, ChartStyle, DashboardFigure, FontCatalog};
use expo_scraper::{collect_records, PageSource};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

/// Where the dashboard is in its fetch/render cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Fetching,
    Rendered,
    Error,
}

/// Last observed phase, exposed on `/health`
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStatus {
    pub phase: Phase,
    pub message: Option<String>,
    pub updated_at: Timestamp,
}

impl DashboardStatus {
    fn new(phase: Phase, message: Option<String>) -> Self {
        Self {
            phase,
            message,
            updated_at: Utc::now(),
        }
    }
}

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<dyn PageSource>,
    pub cache: Arc<DatasetCache>,
    pub style: Arc<ChartStyle>,
    pub fonts: Arc<FontCatalog>,
    /// Why no font could be applied, shown on the page
    pub font_error: Option<String>,
    status: Arc<ArcSwap<DashboardStatus>>,
}

impl AppState {
    /// Build state from loaded config, a page source and the font scan result
    pub fn new(
        config: Config,
        source: Arc<dyn PageSource>,
        fonts: Result<FontCatalog>,
    ) -> Self {
        let (fonts, font_error) = match fonts {
            Ok(catalog) => (catalog, None),
            Err(e) => (FontCatalog::default(), Some(e.to_string())),
        };
        let style = ChartStyle::from_config(&config.chart).with_font_family(fonts.chart_family());
        info!(family = %style.font_family, "Chart font family");

        Self {
            config: Arc::new(config),
            source,
            cache: Arc::new(DatasetCache::new()),
            style: Arc::new(style),
            fonts: Arc::new(fonts),
            font_error,
            status: Arc::new(ArcSwap::from_pointee(DashboardStatus::new(Phase::Idle, None))),
        }
    }

    pub fn status(&self) -> Arc<DashboardStatus> {
        self.status.load_full()
    }

    fn set_status(&self, phase: Phase, message: Option<String>) {
        self.status.store(Arc::new(DashboardStatus::new(phase, message)));
    }

    /// Current dataset, scraping the site only on a cold cache
    pub async fn snapshot(&self) -> std::result::Result<Arc<Snapshot>, Arc<ExpoError>> {
        let source = Arc::clone(&self.source);
        let config = Arc::clone(&self.config);
        let status = Arc::clone(&self.status);

        let result = self
            .cache
            .get_or_fetch(async move {
                status.store(Arc::new(DashboardStatus::new(Phase::Fetching, None)));
                fetch_snapshot(source.as_ref(), &config).await
            })
            .await;

        if let Err(e) = &result {
            error!(error = %e, "Dataset fetch failed");
            self.set_status(Phase::Error, Some(e.to_string()));
        }
        result
    }

    /// Render the figure off the async runtime
    pub async fn render_svg(&self, snapshot: Arc<Snapshot>) -> Result<String> {
        let style = Arc::clone(&self.style);
        let rendered =
            run_blocking(move || DashboardFigure::new(&snapshot.table, &style).render_svg()).await;
        self.record_render(&rendered);
        rendered
    }

    pub async fn render_png(&self, snapshot: Arc<Snapshot>) -> Result<Vec<u8>> {
        let style = Arc::clone(&self.style);
        let rendered =
            run_blocking(move || DashboardFigure::new(&snapshot.table, &style).render_png()).await;
        self.record_render(&rendered);
        rendered
    }

    fn record_render<T>(&self, rendered: &Result<T>) {
        match rendered {
            Ok(_) => self.set_status(Phase::Rendered, None),
            Err(e) => {
                error!(error = %e, "Chart rendering failed");
                self.set_status(Phase::Error, Some(e.to_string()));
            }
        }
    }
}

async fn run_blocking<T, F>(render: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(render)
        .await
        .map_err(|e| ExpoError::graph_with_source("Render task failed", e))?
}

/// Scrape the site and normalize the result into a table
pub async fn fetch_snapshot(source: &dyn PageSource, config: &Config) -> Result<Snapshot> {
    let collection = collect_records(source, &config.site, &config.scrape).await?;
    let table = AttendanceTable::build(&collection.records);

    info!(
        articles = collection.articles,
        records = table.len(),
        warnings = collection.warnings.len(),
        "Dataset fetched"
    );

    Ok(Snapshot {
        table,
        warnings: collection.warnings,
        articles: collection.articles,
        fetched_at: Utc::now(),
    })
}
