//! Generator module - writes the blog views out as static HTML files

use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Component, Path};

use walkdir::WalkDir;

use crate::content::{related_posts, BlogPost};
use crate::templates::BLOG_CSS;
use crate::{views, Blog};

/// Output paths the generator writes itself, unavailable as post slugs
const RESERVED_SLUGS: [&str; 3] = ["blog", "css", "404.html"];

/// Static site generator for a fetched set of posts
pub struct Generator {
    blog: Blog,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Self {
        Self { blog: blog.clone() }
    }

    /// Generate the entire site, returning the number of post pages written
    pub fn generate(&self, posts: &[BlogPost]) -> Result<usize> {
        // Ensure public directory exists
        fs::create_dir_all(&self.blog.public_dir)?;

        // Static assets first so generated pages win on conflicts
        self.copy_static_assets()?;

        self.write_page(Path::new("css/blog.css"), BLOG_CSS)?;

        // Only posts that get a page of their own are listed or related
        let posts: Vec<BlogPost> = posts.iter().filter(|post| is_exportable(post)).cloned().collect();

        let list_html = views::list(&self.blog, &posts)?;
        self.write_page(Path::new("blog/index.html"), &list_html)?;

        let written = self.generate_post_pages(&posts)?;

        let not_found_html = views::not_found(&self.blog)?;
        self.write_page(Path::new("404.html"), &not_found_html)?;

        Ok(written)
    }

    /// Generate one `{slug}/index.html` per post
    fn generate_post_pages(&self, posts: &[BlogPost]) -> Result<usize> {
        let mut written = 0;

        for post in posts {
            let related = related_posts(posts, &post.slug, self.blog.config.related_posts);
            let html = views::detail(&self.blog, post, &related)
                .with_context(|| format!("Failed to render post {:?}", post.slug))?;

            let output_path = Path::new(&post.slug).join("index.html");
            self.write_page(&output_path, &html)?;
            written += 1;
        }

        Ok(written)
    }

    /// Write a file below the public directory
    fn write_page(&self, relative: &Path, content: &str) -> Result<()> {
        let output_path = self.blog.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, content)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Copy the static directory (images, etc.) to the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.blog.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.blog.public_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {:?} to {:?}", path, dest))?;
        }

        Ok(())
    }
}

fn is_exportable(post: &BlogPost) -> bool {
    if !is_safe_slug(&post.slug) {
        tracing::warn!("Skipping post {:?}: slug {:?} is not a single path segment", post.title, post.slug);
        return false;
    }
    if is_reserved_slug(&post.slug) {
        tracing::warn!("Skipping post {:?}: slug {:?} is reserved", post.title, post.slug);
        return false;
    }
    true
}

fn is_reserved_slug(slug: &str) -> bool {
    RESERVED_SLUGS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(slug))
}

/// Whether a slug maps to exactly one directory under the public dir
fn is_safe_slug(slug: &str) -> bool {
    let mut components = Path::new(slug).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !slug.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    fn site() -> (TempDir, Blog) {
        let tmp = TempDir::new().unwrap();
        let blog = Blog::with_config(tmp.path(), SiteConfig::default());
        (tmp, blog)
    }

    fn posts() -> Vec<BlogPost> {
        let mut a = BlogPost::new("cost-guide", "Cost Guide", "2024-02-01");
        a.content = "Plans start at **$82.99**.".into();
        let b = BlogPost::new("4k-plus", "4K Plus", "2024-01-01");
        vec![a, b]
    }

    #[test]
    fn test_generate_layout() {
        let (_tmp, blog) = site();
        let written = Generator::new(&blog).generate(&posts()).unwrap();
        assert_eq!(written, 2);

        let public = &blog.public_dir;
        assert!(public.join("blog/index.html").is_file());
        assert!(public.join("cost-guide/index.html").is_file());
        assert!(public.join("4k-plus/index.html").is_file());
        assert!(public.join("css/blog.css").is_file());

        let not_found = fs::read_to_string(public.join("404.html")).unwrap();
        assert!(not_found.contains("url=/blog"));

        let post = fs::read_to_string(public.join("cost-guide/index.html")).unwrap();
        assert!(post.contains("<strong>$82.99</strong>"));
        assert!(post.contains(r#"href="/4k-plus""#));
    }

    #[test]
    fn test_generate_copies_static_dir() {
        let (_tmp, blog) = site();
        fs::create_dir_all(blog.static_dir.join("images")).unwrap();
        fs::write(blog.static_dir.join("images/hero.png"), b"png").unwrap();
        fs::write(blog.static_dir.join("robots.txt"), "User-agent: *").unwrap();

        Generator::new(&blog).generate(&[]).unwrap();

        assert_eq!(fs::read(blog.public_dir.join("images/hero.png")).unwrap(), b"png");
        assert!(blog.public_dir.join("robots.txt").is_file());
        let list = fs::read_to_string(blog.public_dir.join("blog/index.html")).unwrap();
        assert!(list.contains("No blog posts available yet."));
    }

    #[test]
    fn test_unsafe_slugs_skipped() {
        assert!(is_safe_slug("cost-guide"));
        assert!(!is_safe_slug("../escape"));
        assert!(!is_safe_slug("a/b"));
        assert!(!is_safe_slug(".."));
        assert!(!is_safe_slug(""));

        let (_tmp, blog) = site();
        let posts = vec![BlogPost::new("../escape", "Escape", "2024-01-01")];
        assert_eq!(Generator::new(&blog).generate(&posts).unwrap(), 0);
    }

    #[test]
    fn test_reserved_slugs_skipped() {
        assert!(is_reserved_slug("blog"));
        assert!(is_reserved_slug("CSS"));
        assert!(is_reserved_slug("404.html"));
        assert!(!is_reserved_slug("blogging"));

        let (_tmp, blog) = site();
        let posts = vec![
            BlogPost::new("blog", "Reserved Slug", "2024-02-01"),
            BlogPost::new("other", "Other", "2024-01-01"),
        ];
        assert_eq!(Generator::new(&blog).generate(&posts).unwrap(), 1);

        let list = fs::read_to_string(blog.public_dir.join("blog/index.html")).unwrap();
        assert!(list.contains(r#"href="/other""#));
        assert!(!list.contains("Back to Blog"));
        assert!(!list.contains("Reserved Slug"));

        let other = fs::read_to_string(blog.public_dir.join("other/index.html")).unwrap();
        assert!(!other.contains("Related Posts"));
    }
}
