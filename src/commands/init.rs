//! Initialize a new blog site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Default `_config.yml` written by `init`
const CONFIG_TEMPLATE: &str = r#"# Blog configuration

# Site
title: YouTube TV Cost Calculator
description: Calculate the cost of YouTube TV subscriptions with various add-ons
default_author: YouTube TV Team
site_url: https://youtube-tv-calculator.netlify.app
language: en

# Directory
source_dir: source
public_dir: public
static_dir: static

# Posts
# source: markdown (one file per post) or json (a single array of posts)
posts:
  source: markdown
  path: _posts
render_drafts: false

# Views
excerpt_length: 120
description_length: 160
related_posts: 3
highlight:
  enable: false
  theme: InspiredGitHub

# Assets injected into <head>
stylesheets: []
scripts:
  - https://cdn.tailwindcss.com?plugins=typography,aspect-ratio
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?} exists", config_path);
    }

    // Create directory structure
    fs::create_dir_all(target_dir.join("source/_posts"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    fs::write(&config_path, CONFIG_TEMPLATE)?;

    // Create a sample post
    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        r#"---
title: Welcome to the Blog
slug: welcome
date: {}
author: YouTube TV Team
excerpt: What this blog covers and how to **write** your first post.
---

# Welcome to the Blog

Posts live in `source/_posts`, one markdown file each.

## Embeds

A YouTube link on its own becomes a player:

youtube:dQw4w9WgXcQ

So does a plain link such as https://www.youtube.com/watch?v=dQw4w9WgXcQ, and
an image URL alone in a paragraph becomes an image.

## Commands

```bash
$ tvcalc-blog new "My New Post"
$ tvcalc-blog server
$ tvcalc-blog generate
```
"#,
        today
    );

    fs::write(target_dir.join("source/_posts/welcome.md"), sample_post)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostSource;
    use crate::Blog;

    #[test]
    fn test_init_creates_loadable_site() {
        let tmp = tempfile::TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();

        let blog = Blog::new(tmp.path()).unwrap();
        assert_eq!(blog.config.title, "YouTube TV Cost Calculator");
        assert_eq!(blog.config.related_posts, 3);

        let posts = blog.post_source().get_all_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "welcome");

        let html = crate::views::detail(&blog, &posts[0], &[]).unwrap();
        assert!(html.contains("https://www.youtube.com/embed/dQw4w9WgXcQ"));
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let tmp = tempfile::TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();
        assert!(init_site(tmp.path()).is_err());
    }
}
