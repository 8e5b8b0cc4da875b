//! blogpress: static build front-end for a WordPress-backed blog
//!
//! Downloads posts from the WordPress REST API, normalizes local Markdown
//! posts (date-prefixed file names, front-matter, highlighted code) and
//! emits the route manifest for the static build.

pub mod api;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

/// The blog being built
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown posts directory
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Downloaded post data
    pub artifact_path: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> anyhow::Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Create from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let artifact_path = base_dir.join(&config.artifact);

        Self {
            config,
            base_dir,
            source_dir,
            public_dir,
            artifact_path,
        }
    }

    /// Markdown renderer configured from the `highlight` section
    pub fn renderer(&self) -> content::MarkdownRenderer {
        content::MarkdownRenderer::new((&self.config.highlight).into())
    }

    /// Download posts into the artifact
    pub async fn download(&self) -> anyhow::Result<()> {
        commands::download::run(self).await
    }

    /// Generate the static output
    pub fn generate(&self) -> anyhow::Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory and the artifact
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }
}
