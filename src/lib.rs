//! spacetraveling: a blog front end backed by a Prismic repository
//!
//! Posts are listed a page at a time through an opaque cursor chain and each
//! post carries an estimated reading time.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod helpers;
pub mod pagination;
pub mod source;

use anyhow::Result;
use std::path::Path;

pub use error::BlogError;

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
}

impl Blog {
    /// Create a new blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self { config, base_dir })
    }

    /// Build a content source for the configured repository
    pub fn content_source(&self) -> Result<source::PrismicClient> {
        Ok(source::PrismicClient::from_config(&self.config)?)
    }

    /// Predicate selecting the configured post type
    pub fn post_predicate(&self) -> source::Predicate {
        source::Predicate::document_type(&self.config.post_type)
    }
}
