//! Search → articles → raw records

use expo_common::{ArticleWarning, ExpoError, RawRecord, Result};
use expo_config::{ScrapeConfig, SiteConfig};
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::links::extract_article_links;
use crate::rows::parse_row;
use crate::source::PageSource;
use crate::table::TableSelector;

/// Outcome of one scraping run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    /// Parsed rows, in article discovery order then row order
    pub records: Vec<RawRecord>,
    /// Articles that failed and contributed nothing
    pub warnings: Vec<ArticleWarning>,
    /// Number of article links found on the search page
    pub articles: usize,
}

/// Run the whole scrape against `source`.
///
/// Only the search request is fatal. Each article is fetched and parsed in
/// turn; a failure there is logged, kept as a warning and the article is
/// dropped as a whole.
#[instrument(skip_all, fields(origin = %site.origin))]
pub async fn collect_records(
    source: &dyn PageSource,
    site: &SiteConfig,
    scrape: &ScrapeConfig,
) -> Result<Collection> {
    let base = Url::parse(&site.origin).map_err(|e| {
        ExpoError::config_with_source(format!("Invalid origin '{}'", site.origin), e)
    })?;
    let selector = TableSelector::new(&scrape.table_class)?;

    let search_html = source.search_page(&site.search_keyword).await?;
    let urls = extract_article_links(&search_html, &site.search_keyword, &base);
    info!(count = urls.len(), "Found attendance articles");

    let mut collection = Collection {
        articles: urls.len(),
        ..Default::default()
    };

    for url in urls {
        let outcome = match source.fetch_page(&url).await {
            Ok(html) => parse_article(&html, &selector, scrape),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(records) => {
                debug!(%url, rows = records.len(), "Parsed article");
                collection.records.extend(records);
            }
            Err(e) => {
                warn!(%url, error = %e, "Skipping article");
                collection.warnings.push(ArticleWarning::new(url, e));
            }
        }
    }

    info!(
        records = collection.records.len(),
        warnings = collection.warnings.len(),
        "Collected attendance rows"
    );
    Ok(collection)
}

/// All records of one article, or the first row error
fn parse_article(
    html: &str,
    selector: &TableSelector,
    scrape: &ScrapeConfig,
) -> Result<Vec<RawRecord>> {
    let Some(rows) = selector.extract_rows(html) else {
        debug!("No attendance table in article");
        return Ok(Vec::new());
    };

    let mut records = Vec::new();
    for cells in &rows {
        if let Some(record) = parse_row(cells, scrape.event_year, &scrape.summary_marker)? {
            records.push(record);
        }
    }
    Ok(records)
}
