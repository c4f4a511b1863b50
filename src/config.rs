//! Build-time configuration.
//!
//! The CSR bundle has no runtime environment, so settings are baked in with
//! `option_env!` at compile time (`FIXHUB_API_URL`, `FIXHUB_LOG`).

use log::LevelFilter;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const TOKEN_STORAGE_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend base URL, no trailing slash
    pub api_base_url: String,
    /// `localStorage` key holding the bearer credential
    pub token_storage_key: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::new(option_env!("FIXHUB_API_URL"), option_env!("FIXHUB_LOG"))
    }

    pub fn new(api_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_url = api_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_API_URL);
        Self {
            api_base_url: api_url.trim_end_matches('/').to_string(),
            token_storage_key: TOKEN_STORAGE_KEY.to_string(),
            log_level: log_level.map(console_logger::parse_level).unwrap_or(LevelFilter::Info),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.token_storage_key, "token");
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = AppConfig::new(Some("https://api.fixhub.dev/"), Some("debug"));
        assert_eq!(config.api_base_url, "https://api.fixhub.dev");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_blank_url_falls_back() {
        assert_eq!(AppConfig::new(Some("  "), None).api_base_url, DEFAULT_API_URL);
    }
}
