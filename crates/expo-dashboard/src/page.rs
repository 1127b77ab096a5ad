//! HTML page assembly

use crate::cache::Snapshot;
use expo_graphs::FontCatalog;
use std::fmt::Write;

pub const REFRESH_LABEL: &str = "🔄 データを更新して再表示";
pub const REFRESH_DONE: &str = "✅ データ更新完了";

/// Everything one render of `/` shows
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub title: &'a str,
    pub notice: Option<&'a str>,
    pub error: Option<String>,
    pub snapshot: Option<&'a Snapshot>,
    pub chart_svg: Option<String>,
    pub fonts: Option<&'a FontCatalog>,
    pub font_error: Option<&'a str>,
}

impl<'a> PageView<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            ..Default::default()
        }
    }

    pub fn render(&self) -> String {
        let title = escape_html(self.title);
        let mut body = String::new();

        let _ = write!(
            body,
            r#"<h1>{title}</h1>
<form method="post" action="/refresh"><button type="submit">{REFRESH_LABEL}</button></form>
"#
        );

        body.push_str(&self.font_status());

        if let Some(notice) = self.notice {
            let _ = writeln!(body, r#"<div class="success">{}</div>"#, escape_html(notice));
        }

        if let Some(snapshot) = self.snapshot {
            for warning in &snapshot.warnings {
                let _ = writeln!(
                    body,
                    r#"<div class="warning">{}</div>"#,
                    escape_html(&warning.to_string())
                );
            }
            let _ = writeln!(
                body,
                r#"<p class="meta">{} 件 / 記事 {} 件 / 取得 {}</p>"#,
                snapshot.table.len(),
                snapshot.articles,
                snapshot.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }

        if let Some(error) = &self.error {
            let _ = writeln!(body, r#"<div class="error">{}</div>"#, escape_html(error));
        }

        if let Some(svg) = &self.chart_svg {
            let _ = writeln!(
                body,
                r#"<div class="chart">{svg}</div>
<p><a href="/chart.png" download>PNG</a> · <a href="/chart.svg">SVG</a></p>"#
            );
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
{css}
</style>
</head>
<body>
{body}</body>
</html>
"#,
            css = self.stylesheet()
        )
    }

    fn font_status(&self) -> String {
        if let Some(error) = self.font_error {
            return format!(r#"<div class="error">{}</div>"#, escape_html(error)) + "\n";
        }
        match self.fonts.and_then(FontCatalog::primary_family) {
            Some(family) => {
                format!(r#"<p class="font">→ フォントに設定: {}</p>"#, escape_html(family)) + "\n"
            }
            None => String::new(),
        }
    }

    fn stylesheet(&self) -> String {
        let mut css = String::new();
        let mut family = String::from("sans-serif");

        if let Some(fonts) = self.fonts {
            for font in fonts.fonts() {
                let _ = writeln!(
                    css,
                    concat!(
                        "@font-face {{ font-family: \"{}\"; ",
                        "src: url(\"/fonts/{}\") format(\"truetype\"); }}"
                    ),
                    escape_css(&font.family),
                    escape_css(&font.file_name)
                );
            }
            if let Some(primary) = fonts.primary_family() {
                family = format!("\"{}\", sans-serif", escape_css(primary));
            }
        }

        let _ = write!(
            css,
            "body {{ font-family: {family}; margin: 2rem; }}
.chart svg text {{ font-family: {family} !important; }}
.chart svg {{ max-width: 100%; height: auto; }}
.success {{ color: #1b5e20; background: #e8f5e9; padding: .5rem 1rem; }}
.warning {{ color: #8a6d00; background: #fff8e1; padding: .5rem 1rem; }}
.error {{ color: #b71c1c; background: #ffebee; padding: .5rem 1rem; }}"
        );
        css
    }
}

/// Escape text for HTML element and attribute content
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_css(input: &str) -> String {
    input.chars().filter(|c| !matches!(c, '"' | '\\' | '<' | '>' | '\n')).collect()
}
