//! Article link discovery on the search results page

use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("static anchor selector"));

/// Collect every `<a href>` whose visible text contains `keyword`.
///
/// Absolute `http(s)` hrefs are kept verbatim, anything else is resolved
/// against `base`. The result holds each URL once, in first-seen order.
pub fn extract_article_links(html: &str, keyword: &str, base: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&ANCHOR) {
        let text: String = anchor.text().collect();
        if !text.contains(keyword) {
            continue;
        }

        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };

        let resolved = if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else {
            match base.join(href) {
                Ok(url) => url.to_string(),
                Err(e) => {
                    debug!(%href, error = %e, "Skipping unresolvable link");
                    continue;
                }
            }
        };

        if seen.insert(resolved.clone()) {
            links.push(resolved);
        }
    }

    debug!(count = links.len(), "Extracted article links");
    links
}
