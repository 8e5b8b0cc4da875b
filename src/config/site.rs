//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub author: String,

    // URL
    /// Router base, overridden by the `BASE_URL` environment variable
    pub root: String,

    // Directory
    /// Markdown posts, relative to the site root
    pub source_dir: String,
    /// Generated output directory
    pub public_dir: String,
    /// Downloaded post data written by `download`
    pub artifact: String,

    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            author: String::new(),

            root: "/".to_string(),

            source_dir: "assets/posts".to_string(),
            public_dir: "dist".to_string(),
            artifact: "static/api/posts.json".to_string(),

            api: ApiConfig::default(),
            highlight: HighlightConfig::default(),
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

    /// Apply environment overrides
    pub fn apply_env(&mut self) {
        if let Ok(base) = std::env::var("BASE_URL") {
            if !base.is_empty() {
                tracing::debug!("Using BASE_URL override: {}", base);
                self.root = base;
            }
        }
    }
}

/// Remote content API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and host, e.g. `https://example.com`
    pub url: String,
    pub posts_path: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: "https://slogsdon.azurewebsites.net".to_string(),
            posts_path: "/wp-json/wp/v2/posts".to_string(),
            timeout: 30,
        }
    }
}

impl ApiConfig {
    /// Full URL of the posts collection
    pub fn posts_url(&self) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            self.posts_path.trim_start_matches('/')
        )
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub auto_detect: bool,
    pub gfm: bool,
    pub lang_prefix: String,
    /// syntect theme used for the generated stylesheet
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            auto_detect: true,
            gfm: true,
            lang_prefix: "hljs language-".to_string(),
            theme: "InspiredGitHub".to_string(),
        }
    }
}
