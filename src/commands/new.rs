//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::config::PostSourceKind;
use crate::Blog;

/// Create a markdown post file with front-matter, returning its path
pub fn create_post(blog: &Blog, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    if blog.config.posts.source != PostSourceKind::Markdown {
        anyhow::bail!(
            "New posts can only be created for a markdown post source (configured: {:?})",
            blog.config.posts.source
        );
    }

    let slug = slug::slugify(slug.unwrap_or(title));
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }

    let target_dir = blog.source_dir.join(&blog.config.posts.path);
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    let content = format!(
        r#"---
title: {}
slug: {}
date: {}
author: {}
---

# {}
"#,
        yaml_string(title),
        slug,
        now.format("%Y-%m-%d"),
        yaml_string(&blog.config.default_author),
        title
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created post {:?}", file_path);

    Ok(file_path)
}

/// Quote a value for a YAML scalar
fn yaml_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::{MarkdownDirSource, PostSource};
    use tempfile::TempDir;

    #[test]
    fn test_new_post_is_loadable() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::with_config(tmp.path(), SiteConfig::default());

        let path = create_post(&blog, "Is YouTube TV: Worth It?", None).unwrap();
        assert!(path.ends_with("source/_posts/is-youtube-tv-worth-it.md"));

        let posts = MarkdownDirSource::new(blog.source_dir.join("_posts"))
            .get_all_posts()
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "is-youtube-tv-worth-it");
        assert_eq!(posts[0].title, "Is YouTube TV: Worth It?");
        assert_eq!(posts[0].author.as_deref(), Some("YouTube TV Team"));

        assert!(create_post(&blog, "Is YouTube TV: Worth It?", None).is_err());
    }

    #[test]
    fn test_new_post_custom_slug() {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::with_config(tmp.path(), SiteConfig::default());
        let path = create_post(&blog, "Anything", Some("Custom Slug")).unwrap();
        assert!(path.ends_with("custom-slug.md"));
    }
}
