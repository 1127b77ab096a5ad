//! Attendance article scraping.
//!
//! The pipeline is strictly sequential: one search request, then each
//! discovered article in discovery order. A failing article is reported as an
//! [`ArticleWarning`](expo_common::ArticleWarning) and contributes no rows.

pub mod client;
pub mod collector;
pub mod links;
pub mod rows;
pub mod source;
pub mod table;

pub use client::{ClientConfig, SiteClient};
pub use collector::{collect_records, Collection};
pub use links::extract_article_links;
pub use rows::parse_row;
pub use source::{PageSource, StaticPages};
pub use table::TableSelector;
