//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::BlogError;

/// Environment variable overriding `api_endpoint`
pub const ENDPOINT_ENV: &str = "PRISMIC_API_ENDPOINT";

/// Environment variable overriding `access_token`
pub const ACCESS_TOKEN_ENV: &str = "PRISMIC_ACCESS_TOKEN";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub language: String,
    pub date_format: String,

    // Content source
    pub api_endpoint: String,
    pub access_token: Option<String>,
    pub post_type: String,

    // Listing
    pub page_size: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "SpaceTraveling".to_string(),
            language: "pt-BR".to_string(),
            date_format: "d MMM yyyy".to_string(),

            api_endpoint: String::new(),
            access_token: None,
            post_type: "post".to_string(),

            page_size: 2,
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Apply `PRISMIC_API_ENDPOINT` / `PRISMIC_ACCESS_TOKEN` overrides
    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENDPOINT_ENV).ok(),
            std::env::var(ACCESS_TOKEN_ENV).ok(),
        );
    }

    fn apply_overrides(&mut self, endpoint: Option<String>, token: Option<String>) {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            tracing::debug!("Using API endpoint from {}", ENDPOINT_ENV);
            self.api_endpoint = endpoint;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.access_token = Some(token);
        }
    }

    /// Check the settings a content source needs
    pub fn validate(&self) -> std::result::Result<(), BlogError> {
        if self.api_endpoint.trim().is_empty() {
            return Err(BlogError::Config(format!(
                "api_endpoint is not set (use _config.yml or {})",
                ENDPOINT_ENV
            )));
        }
        if self.page_size == 0 {
            return Err(BlogError::Config("page_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "SpaceTraveling");
        assert_eq!(config.post_type, "post");
        assert_eq!(config.page_size, 2);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
api_endpoint: https://my-blog.cdn.prismic.io/api/v2
page_size: 5
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.api_endpoint, "https://my-blog.cdn.prismic.io/api/v2");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.language, "pt-BR");
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: Space\naccess_token: secret\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "Space");
        assert_eq!(config.access_token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_overrides() {
        let mut config = SiteConfig::default();
        config.apply_overrides(Some("https://env.example/api/v2".to_string()), None);
        assert_eq!(config.api_endpoint, "https://env.example/api/v2");
        assert!(config.access_token.is_none());

        config.apply_overrides(Some("  ".to_string()), Some("tok".to_string()));
        assert_eq!(config.api_endpoint, "https://env.example/api/v2");
        assert_eq!(config.access_token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_validate() {
        let mut config = SiteConfig::default();
        assert!(matches!(config.validate(), Err(BlogError::Config(_))));

        config.api_endpoint = "https://x.prismic.io/api/v2".to_string();
        assert!(config.validate().is_ok());

        config.page_size = 0;
        assert!(matches!(config.validate(), Err(BlogError::Config(_))));
    }
}
