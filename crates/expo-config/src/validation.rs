//! Validation utilities and regex patterns

use regex::Regex;
use std::net::SocketAddr;
use std::sync::LazyLock;
use validator::ValidationError;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #FF0000)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

/// Validate a `host:port` listen address
pub fn validate_bind_address(bind: &str) -> Result<(), ValidationError> {
    bind.parse::<SocketAddr>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_bind_address"))
}

/// Validate the site origin: absolute http(s) URL without query or fragment
pub fn validate_origin(origin: &str) -> Result<(), ValidationError> {
    let parsed = url::Url::parse(origin).map_err(|_| ValidationError::new("invalid_origin"))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::new("unsupported_origin_scheme"));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ValidationError::new("origin_has_query"));
    }

    Ok(())
}

/// Validate a list of hex colors used for the weekly bar series
pub fn validate_palette(palette: &[String]) -> Result<(), ValidationError> {
    if palette.is_empty() {
        return Err(ValidationError::new("empty_palette"));
    }
    if palette.iter().all(|c| HEX_COLOR_REGEX.is_match(c)) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_palette_color"))
    }
}

/// Validate log level
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new("invalid_log_level")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_regex() {
        assert!(HEX_COLOR_REGEX.is_match("#FFFFFF"));
        assert!(HEX_COLOR_REGEX.is_match("#1f77b4"));

        assert!(!HEX_COLOR_REGEX.is_match("FFFFFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#FFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#GGGGGG"));
        assert!(!HEX_COLOR_REGEX.is_match(""));
    }

    #[test]
    fn test_validate_bind_address() {
        assert!(validate_bind_address("127.0.0.1:8501").is_ok());
        assert!(validate_bind_address("0.0.0.0:80").is_ok());
        assert!(validate_bind_address("[::1]:8080").is_ok());

        assert!(validate_bind_address("localhost").is_err());
        assert!(validate_bind_address("127.0.0.1").is_err());
        assert!(validate_bind_address("").is_err());
    }

    #[test]
    fn test_validate_origin() {
        assert!(validate_origin("https://www.expo2025.or.jp").is_ok());
        assert!(validate_origin("http://127.0.0.1:9000/").is_ok());

        assert!(validate_origin("ftp://www.expo2025.or.jp").is_err());
        assert!(validate_origin("https://www.expo2025.or.jp/?s=x").is_err());
        assert!(validate_origin("www.expo2025.or.jp").is_err());
    }

    #[test]
    fn test_validate_palette() {
        assert!(validate_palette(&["#1f77b4".to_string(), "#ff7f0e".to_string()]).is_ok());
        assert!(validate_palette(&[]).is_err());
        assert!(validate_palette(&["#1f77b4".to_string(), "orange".to_string()]).is_err());
    }

    #[test]
    fn test_validate_log_level() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(validate_log_level(level).is_ok());
        }
        assert!(validate_log_level("verbose").is_err());
        assert!(validate_log_level("INFO").is_err());
    }
}
