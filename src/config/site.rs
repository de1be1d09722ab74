//! Site configuration (_config.yml / _config.toml)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Fallback hero image for posts without a featured image
pub const DEFAULT_FEATURED_IMAGE: &str =
    "https://images.unsplash.com/photo-1487611459768-bd414656ea10?q=80&w=1920&auto=format&fit=crop";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub default_author: String,
    pub site_url: String,
    pub language: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,
    pub static_dir: String,

    // Posts
    #[serde(default)]
    pub posts: PostsConfig,
    pub render_drafts: bool,

    // Listing and detail views
    pub excerpt_length: usize,
    pub description_length: usize,
    pub related_posts: usize,
    pub default_featured_image: String,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Assets injected into <head>
    #[serde(default)]
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "YouTube TV Cost Calculator".to_string(),
            description: "Calculate the cost of YouTube TV subscriptions with various add-ons"
                .to_string(),
            default_author: "YouTube TV Team".to_string(),
            site_url: "https://youtube-tv-calculator.netlify.app".to_string(),
            language: "en".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),
            static_dir: "static".to_string(),

            posts: PostsConfig::default(),
            render_drafts: false,

            excerpt_length: 120,
            description_length: 160,
            related_posts: 3,
            default_featured_image: DEFAULT_FEATURED_IMAGE.to_string(),
            highlight: HighlightConfig::default(),

            stylesheets: Vec::new(),
            scripts: vec![
                "https://cdn.tailwindcss.com?plugins=typography,aspect-ratio".to_string(),
            ],

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a YAML or TOML file, picked by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        tracing::debug!("Loaded site config from {:?}", path);
        Ok(config)
    }

    /// Site URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.site_url.trim_end_matches('/')
    }
}

/// Where posts come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostSourceKind {
    /// Markdown files with front-matter
    Markdown,
    /// A single JSON array of post records
    Json,
}

/// Post source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostsConfig {
    pub source: PostSourceKind,
    /// Path relative to the source directory
    pub path: String,
}

impl Default for PostsConfig {
    fn default() -> Self {
        Self {
            source: PostSourceKind::Markdown,
            path: "_posts".to_string(),
        }
    }
}

/// Code block highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: false,
            theme: "InspiredGitHub".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "YouTube TV Cost Calculator");
        assert_eq!(config.default_author, "YouTube TV Team");
        assert_eq!(config.excerpt_length, 120);
        assert_eq!(config.posts.source, PostSourceKind::Markdown);
    }

    #[test]
    fn test_parse_yaml_config() {
        let yaml = r#"
title: TV Blog
site_url: https://example.com/
related_posts: 5
posts:
  source: json
  path: posts.json
highlight:
  enable: true
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "TV Blog");
        assert_eq!(config.base_url(), "https://example.com");
        assert_eq!(config.related_posts, 5);
        assert_eq!(config.posts.source, PostSourceKind::Json);
        assert_eq!(config.posts.path, "posts.json");
        assert!(config.highlight.enable);
        assert_eq!(config.highlight.theme, "InspiredGitHub");
        // Untouched keys keep their defaults
        assert_eq!(config.description_length, 160);
    }

    #[test]
    fn test_load_toml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.toml");
        fs::write(
            &path,
            "title = \"From TOML\"\nexcerpt_length = 80\n\n[posts]\nsource = \"markdown\"\n",
        )
        .unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "From TOML");
        assert_eq!(config.excerpt_length, 80);
        assert_eq!(config.posts.path, "_posts");
    }
}
