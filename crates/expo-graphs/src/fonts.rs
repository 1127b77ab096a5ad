//! Local font discovery for chart text

use expo_common::{ExpoError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use ttf_parser::{name_id, Face, Language};

/// A `.ttf` file picked up from the font directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFile {
    /// File name, also the route segment it is served under
    pub file_name: String,
    /// Family name derived from the file stem
    pub family: String,
    /// Family recorded in the font's `name` table, if it parses
    pub embedded_family: Option<String>,
    pub path: PathBuf,
}

/// Fonts offered to the dashboard page.
///
/// Only files whose name contains the family hint (case-insensitive) are kept.
#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    fonts: Vec<FontFile>,
}

impl FontCatalog {
    /// Scan `dir` for `.ttf` files matching `family_hint`.
    ///
    /// A missing directory or no match is an error for the caller to show;
    /// the charts still render with the default family.
    pub fn scan(dir: impl AsRef<Path>, family_hint: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| {
            ExpoError::font(
                format!("Font directory not readable: {}", e),
                dir.display().to_string(),
            )
        })?;

        let hint = family_hint.to_lowercase();
        let mut fonts = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_ttf = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("ttf"));
            if !is_ttf || !path.is_file() {
                continue;
            }

            let (Some(file_name), Some(stem)) = (
                path.file_name().and_then(|n| n.to_str()),
                path.file_stem().and_then(|s| s.to_str()),
            ) else {
                continue;
            };

            if !file_name.to_lowercase().contains(&hint) {
                debug!(%file_name, "Ignoring font without family hint");
                continue;
            }

            let embedded_family = std::fs::read(&path)
                .ok()
                .and_then(|data| embedded_family(&data));
            if embedded_family.is_none() {
                warn!(%file_name, "Font has no readable family name");
            }

            fonts.push(FontFile {
                file_name: file_name.to_string(),
                family: stem.to_string(),
                embedded_family,
                path: path.clone(),
            });
        }

        if fonts.is_empty() {
            return Err(ExpoError::font(
                format!("No .ttf font matching '{}'", family_hint),
                dir.display().to_string(),
            ));
        }

        fonts.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        info!(count = fonts.len(), family = %fonts[0].family, "Discovered chart fonts");
        Ok(Self { fonts })
    }

    pub fn fonts(&self) -> &[FontFile] {
        &self.fonts
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Family the page declares via `@font-face`
    pub fn primary_family(&self) -> Option<&str> {
        self.fonts.first().map(|f| f.family.as_str())
    }

    /// Family name plotters resolves for raster chart text.
    ///
    /// First catalogued font whose `name` table parsed.
    pub fn chart_family(&self) -> Option<&str> {
        self.fonts.iter().find_map(|f| f.embedded_family.as_deref())
    }

    /// Path of a catalogued font by file name; anything else is `None`
    pub fn resolve(&self, file_name: &str) -> Option<&Path> {
        self.fonts
            .iter()
            .find(|f| f.file_name == file_name)
            .map(|f| f.path.as_path())
    }
}

/// Family name from a TrueType `name` table, preferring the US English record
fn embedded_family(data: &[u8]) -> Option<String> {
    let face = Face::parse(data, 0).ok()?;
    let families: Vec<_> = face
        .names()
        .into_iter()
        .filter(|name| name.name_id == name_id::FAMILY && name.is_unicode())
        .collect();

    families
        .iter()
        .find(|name| name.language() == Language::English_UnitedStates)
        .or_else(|| families.first())
        .and_then(|name| name.to_string())
        .filter(|family| !family.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_scan_keeps_matching_ttf_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ipaexg.ttf"), b"font").unwrap();
        fs::write(dir.path().join("IPAexMincho.TTF"), b"font").unwrap();
        fs::write(dir.path().join("NotoSans.ttf"), b"font").unwrap();
        fs::write(dir.path().join("ipaex-readme.txt"), b"text").unwrap();

        let catalog = FontCatalog::scan(dir.path(), "IPAex").unwrap();
        let names: Vec<_> = catalog.fonts().iter().map(|f| f.file_name.as_str()).collect();

        assert_eq!(names, vec!["IPAexMincho.TTF", "ipaexg.ttf"]);
        assert_eq!(catalog.primary_family(), Some("IPAexMincho"));
    }

    #[test]
    fn test_unparseable_font_has_no_chart_family() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ipaexg.ttf"), b"not a font").unwrap();

        let catalog = FontCatalog::scan(dir.path(), "IPAex").unwrap();

        assert_eq!(catalog.fonts()[0].embedded_family, None);
        assert_eq!(catalog.primary_family(), Some("ipaexg"));
        assert!(catalog.chart_family().is_none());
    }

    #[test]
    fn test_chart_family_skips_fonts_without_names() {
        let catalog = FontCatalog {
            fonts: vec![
                FontFile {
                    file_name: "ipaexg.ttf".to_string(),
                    family: "ipaexg".to_string(),
                    embedded_family: None,
                    path: PathBuf::from("ipaexg.ttf"),
                },
                FontFile {
                    file_name: "ipaexm.ttf".to_string(),
                    family: "ipaexm".to_string(),
                    embedded_family: Some("IPAexMincho".to_string()),
                    path: PathBuf::from("ipaexm.ttf"),
                },
            ],
        };

        assert_eq!(catalog.primary_family(), Some("ipaexg"));
        assert_eq!(catalog.chart_family(), Some("IPAexMincho"));
    }

    #[test]
    fn test_embedded_family_rejects_garbage() {
        assert!(embedded_family(b"").is_none());
        assert!(embedded_family(&[0u8; 64]).is_none());
    }

    #[test]
    fn test_resolve_only_known_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("ipaexg.ttf"), b"font").unwrap();
        let catalog = FontCatalog::scan(dir.path(), "ipaex").unwrap();

        assert_eq!(catalog.resolve("ipaexg.ttf"), Some(dir.path().join("ipaexg.ttf").as_path()));
        assert!(catalog.resolve("../secret.ttf").is_none());
        assert!(catalog.resolve("other.ttf").is_none());
    }

    #[test]
    fn test_missing_directory_is_font_error() {
        let err = FontCatalog::scan("/nonexistent/fonts", "IPAex").unwrap_err();
        assert!(matches!(err, ExpoError::Font { .. }));
    }

    #[test]
    fn test_no_match_is_font_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("NotoSans.ttf"), b"font").unwrap();

        let err = FontCatalog::scan(dir.path(), "IPAex").unwrap_err();
        assert!(err.to_string().contains("No .ttf font matching 'IPAex'"));
    }
}
