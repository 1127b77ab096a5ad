//! Page source abstraction

use async_trait::async_trait;
use expo_common::{ExpoError, Result};
use std::collections::HashMap;

/// Anything that can hand back the search results page and article pages as text.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Body of the site search for `keyword`
    async fn search_page(&self, keyword: &str) -> Result<String>;

    /// Body of a single article
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

/// In-memory page source for offline replays and tests.
///
/// URLs not registered with [`StaticPages::with_page`] fail with a network error,
/// the same way an unreachable article would.
#[derive(Debug, Clone, Default)]
pub struct StaticPages {
    search: String,
    pages: HashMap<String, String>,
}

impl StaticPages {
    pub fn new(search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            pages: HashMap::new(),
        }
    }

    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }
}

#[async_trait]
impl PageSource for StaticPages {
    async fn search_page(&self, _keyword: &str) -> Result<String> {
        Ok(self.search.clone())
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ExpoError::network(format!("no route to {}", url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_page_is_network_error() {
        let pages = StaticPages::new("<html></html>").with_page("https://a.test/1", "one");

        assert_eq!(pages.fetch_page("https://a.test/1").await.unwrap(), "one");
        let err = pages.fetch_page("https://a.test/2").await.unwrap_err();
        assert!(err.is_network());
    }

    #[test]
    fn test_search_page_ignores_keyword() {
        let pages = StaticPages::new("<ul></ul>");
        let body = tokio_test::block_on(pages.search_page("anything")).unwrap();
        assert_eq!(body, "<ul></ul>");
    }
}
