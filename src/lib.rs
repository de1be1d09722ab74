//! tvcalc-blog: blog listing and article renderer for the YouTube TV Cost Calculator
//!
//! Posts come from a static source (markdown files or a JSON array), are
//! rendered to HTML with embed-aware markdown overrides, and are served by
//! an axum server or exported as static files.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;
pub mod views;

pub use error::{BlogError, Result};

use std::path::{Path, PathBuf};

/// Config file names, in lookup order
const CONFIG_FILES: [&str; 2] = ["_config.yml", "_config.toml"];

/// The blog site rooted at a directory
#[derive(Debug, Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Source directory
    pub source_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Static assets copied or served as-is
    pub static_dir: PathBuf,
}

impl Blog {
    /// Open the site in `base_dir`, using defaults when no config file exists
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();

        let config = match Self::config_path(&base_dir) {
            Some(path) => config::SiteConfig::load(&path)?,
            None => config::SiteConfig::default(),
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a site from an already loaded configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let source_dir = base_dir.join(&config.source_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            source_dir,
            public_dir,
            static_dir,
        }
    }

    /// The config file in `base_dir`, if there is one
    pub fn config_path(base_dir: &Path) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| base_dir.join(name))
            .find(|path| path.exists())
    }

    /// The configured post source
    pub fn post_source(&self) -> Box<dyn content::PostSource> {
        content::source_for(self)
    }

    /// Markdown renderer using the site's highlight settings
    pub fn markdown_renderer(&self) -> content::MarkdownRenderer {
        content::MarkdownRenderer::from_config(&self.config.highlight)
    }

    /// Export the site to the public directory
    pub fn generate(&self) -> anyhow::Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> anyhow::Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post, returning the file written
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> anyhow::Result<PathBuf> {
        commands::new::create_post(self, title, slug)
    }
}
