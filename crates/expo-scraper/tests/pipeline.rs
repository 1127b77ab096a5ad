use expo_common::RawRecord;
use expo_config::{ScrapeConfig, SiteConfig};
use expo_scraper::{collect_records, StaticPages};

const KEYWORD: &str = "来場者数と入場チケット販売数について";

fn site() -> SiteConfig {
    SiteConfig::default()
}

fn search_page(hrefs: &[&str]) -> String {
    let items: String = hrefs
        .iter()
        .map(|href| format!(r#"<li><a href="{href}">{KEYWORD}</a></li>"#))
        .collect();
    format!("<html><body><ul>{items}<li><a href=\"/other\">お知らせ</a></li></ul></body></html>")
}

fn article(rows: &[[&str; 4]]) -> String {
    let body: String = rows
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                r[0], r[1], r[2], r[3]
            )
        })
        .collect();
    let header = "<tr><th>日付</th><th>来場者数</th><th>-</th><th>AD証入場者数</th></tr>";
    format!(
        r#"<html><body><table class="has-fixed-layout">{header}{body}</table></body></html>"#
    )
}

#[tokio::test]
async fn failing_article_becomes_warning_and_others_still_count() {
    let source = StaticPages::new(search_page(&["/news/a", "/news/b"])).with_page(
        "https://www.expo2025.or.jp/news/a",
        article(&[["6月1日", "10,000", "x", "100"], ["合計", "999,999", "x", "999"]]),
    );

    let collection = collect_records(&source, &site(), &ScrapeConfig::default())
        .await
        .unwrap();

    assert_eq!(collection.articles, 2);
    assert_eq!(
        collection.records,
        vec![RawRecord {
            date: "2025-06-01".to_string(),
            visitors: 10_000,
            pass_holders: 100,
        }]
    );
    assert_eq!(collection.warnings.len(), 1);
    assert_eq!(collection.warnings[0].url, "https://www.expo2025.or.jp/news/b");
    assert!(collection.warnings[0]
        .to_string()
        .starts_with("https://www.expo2025.or.jp/news/b 読込失敗: "));
}

#[tokio::test]
async fn bad_count_drops_whole_article() {
    let source = StaticPages::new(search_page(&["/news/a", "/news/b"]))
        .with_page(
            "https://www.expo2025.or.jp/news/a",
            article(&[["6月1日", "10,000", "x", "100"], ["6月2日", "未集計", "x", "100"]]),
        )
        .with_page(
            "https://www.expo2025.or.jp/news/b",
            article(&[["6月3日", "30,000", "x", "300"]]),
        );

    let collection = collect_records(&source, &site(), &ScrapeConfig::default())
        .await
        .unwrap();

    assert_eq!(collection.records.len(), 1);
    assert_eq!(collection.records[0].date, "2025-06-03");
    assert_eq!(collection.warnings.len(), 1);
    assert!(collection.warnings[0].error.contains("未集計"));
}

#[tokio::test]
async fn records_follow_article_discovery_order() {
    let source = StaticPages::new(search_page(&["/news/later", "/news/earlier", "/news/later"]))
        .with_page(
            "https://www.expo2025.or.jp/news/later",
            article(&[["7月2日", "2", "x", "2"]]),
        )
        .with_page(
            "https://www.expo2025.or.jp/news/earlier",
            article(&[["7月1日", "1", "x", "1"]]),
        );

    let collection = collect_records(&source, &site(), &ScrapeConfig::default())
        .await
        .unwrap();

    let dates: Vec<_> = collection.records.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2025-07-02", "2025-07-01"]);
    assert_eq!(collection.articles, 2);
}

#[tokio::test]
async fn no_matching_links_is_empty_not_error() {
    let source = StaticPages::new("<html><body>検索結果はありません</body></html>");

    let collection = collect_records(&source, &site(), &ScrapeConfig::default())
        .await
        .unwrap();

    assert_eq!(collection.articles, 0);
    assert!(collection.records.is_empty());
    assert!(collection.warnings.is_empty());
}

#[tokio::test]
async fn article_without_table_contributes_nothing_silently() {
    let source = StaticPages::new(search_page(&["/news/a"]))
        .with_page("https://www.expo2025.or.jp/news/a", "<html><p>準備中</p></html>");

    let collection = collect_records(&source, &site(), &ScrapeConfig::default())
        .await
        .unwrap();

    assert!(collection.records.is_empty());
    assert!(collection.warnings.is_empty());
}
