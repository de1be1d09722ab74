//! Post sources - where the blog's post records come from

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{BlogPost, FrontMatter};
use crate::config::PostSourceKind;
use crate::error::{BlogError, Result};
use crate::Blog;

/// A read-only supplier of the full post list
pub trait PostSource: Send + Sync {
    /// Fetch every post, in the order the views should list them
    fn get_all_posts(&self) -> Result<Vec<BlogPost>>;

    /// Human-readable location, for logs
    fn describe(&self) -> String;
}

/// Pick the post source configured for a site
pub fn source_for(blog: &Blog) -> Box<dyn PostSource> {
    let path = blog.source_dir.join(&blog.config.posts.path);
    match blog.config.posts.source {
        PostSourceKind::Markdown => Box::new(MarkdownDirSource {
            dir: path,
            default_author: Some(blog.config.default_author.clone())
                .filter(|a| !a.is_empty()),
            render_drafts: blog.config.render_drafts,
        }),
        PostSourceKind::Json => Box::new(JsonFileSource { path }),
    }
}

/// Markdown files with front-matter, one post per file
pub struct MarkdownDirSource {
    pub dir: PathBuf,
    pub default_author: Option<String>,
    pub render_drafts: bool,
}

impl MarkdownDirSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            dir: dir.into(),
            default_author: None,
            render_drafts: false,
        }
    }

    /// Load a single post from a file, `None` for skipped drafts
    fn load_post(&self, path: &Path) -> Result<Option<BlogPost>> {
        let raw = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&raw)?;

        if fm.draft && !self.render_drafts {
            tracing::debug!("Skipping draft {:?}", path);
            return Ok(None);
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("untitled")
            .to_string();

        let slug = fm.slug.unwrap_or_else(|| slug::slugify(&stem));
        let title = fm
            .title
            .or_else(|| first_heading(body))
            .unwrap_or_else(|| stem.clone());

        // Fall back to the file's mtime when no date is given
        let date = match fm.date {
            Some(date) => date,
            None => {
                let modified = fs::metadata(path)?.modified()?;
                chrono::DateTime::<chrono::Local>::from(modified)
                    .format("%Y-%m-%d")
                    .to_string()
            }
        };

        Ok(Some(BlogPost {
            slug,
            title,
            date,
            author: fm.author.or_else(|| self.default_author.clone()),
            excerpt: fm.excerpt,
            featured_image: fm.featured_image,
            content: body.to_string(),
        }))
    }
}

impl PostSource for MarkdownDirSource {
    fn get_all_posts(&self) -> Result<Vec<BlogPost>> {
        match fs::metadata(&self.dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(BlogError::unavailable(self.describe(), "not a directory")),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Posts directory {:?} does not exist", self.dir);
                return Ok(Vec::new());
            }
            Err(e) => return Err(BlogError::unavailable(self.describe(), e)),
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                // The posts directory itself must be readable
                Err(e) if e.depth() == 0 => {
                    return Err(BlogError::unavailable(self.describe(), e));
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry in {:?}: {}", self.dir, e);
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_post(path) {
                    Ok(Some(post)) => posts.push(post),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        // Newest first; undated posts sink to the end
        posts.sort_by(|a, b| b.published().cmp(&a.published()));

        Ok(dedup_slugs(posts))
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

/// A JSON array of post records, listed in file order
pub struct JsonFileSource {
    pub path: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl PostSource for JsonFileSource {
    fn get_all_posts(&self) -> Result<Vec<BlogPost>> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| BlogError::unavailable(self.describe(), e))?;
        let posts: Vec<BlogPost> =
            serde_json::from_str(&raw).map_err(|e| BlogError::unavailable(self.describe(), e))?;
        Ok(dedup_slugs(posts))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Keep the first post for each slug
fn dedup_slugs(posts: Vec<BlogPost>) -> Vec<BlogPost> {
    let mut seen = HashSet::new();
    posts
        .into_iter()
        .filter(|post| {
            let fresh = seen.insert(post.slug.clone());
            if !fresh {
                tracing::warn!("Duplicate slug {:?} ignored for post {:?}", post.slug, post.title);
            }
            fresh
        })
        .collect()
}

/// Text of the first `# ` heading, if any
fn first_heading(body: &str) -> Option<String> {
    body.lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_markdown_source_not_a_directory() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "_posts", "a file, not a folder");

        let source = MarkdownDirSource::new(tmp.path().join("_posts"));
        assert!(matches!(source.get_all_posts(), Err(BlogError::Source { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_markdown_source_unreadable_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("_posts");
        // A symlink to itself cannot be resolved
        std::os::unix::fs::symlink(&dir, &dir).unwrap();

        let source = MarkdownDirSource::new(dir.clone());
        assert!(matches!(source.get_all_posts(), Err(BlogError::Source { .. })));
    }

    #[test]
    fn test_markdown_source_loads_and_sorts() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "older.md",
            "---\ntitle: Older\ndate: 2023-06-01\n---\nOld body",
        );
        write(
            tmp.path(),
            "Newer Post.md",
            "---\ndate: 2024-06-01\nauthor: Alex\n---\n# Newer heading\n\nNew body",
        );
        write(tmp.path(), "notes.txt", "not a post");

        let source = MarkdownDirSource {
            default_author: Some("YouTube TV Team".into()),
            ..MarkdownDirSource::new(tmp.path())
        };
        let posts = source.get_all_posts().unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].slug, "newer-post");
        assert_eq!(posts[0].title, "Newer heading");
        assert_eq!(posts[0].author.as_deref(), Some("Alex"));
        assert_eq!(posts[1].slug, "older");
        assert_eq!(posts[1].author.as_deref(), Some("YouTube TV Team"));
        assert_eq!(posts[1].content, "Old body");
    }

    #[test]
    fn test_markdown_source_skips_drafts() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "wip.md", "---\ntitle: WIP\ndraft: true\n---\nbody");

        let mut source = MarkdownDirSource::new(tmp.path());
        assert!(source.get_all_posts().unwrap().is_empty());

        source.render_drafts = true;
        assert_eq!(source.get_all_posts().unwrap().len(), 1);
    }

    #[test]
    fn test_markdown_source_missing_dir() {
        let source = MarkdownDirSource::new("/definitely/not/here");
        assert!(source.get_all_posts().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_slugs_keep_first() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.md", "---\nslug: same\ntitle: First\ndate: 2024-02-01\n---\n");
        write(tmp.path(), "b.md", "---\nslug: same\ntitle: Second\ndate: 2024-01-01\n---\n");

        let posts = MarkdownDirSource::new(tmp.path()).get_all_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "First");
    }

    #[test]
    fn test_json_source_keeps_file_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("posts.json");
        fs::write(
            &path,
            r#"[
  {"slug": "b", "title": "B", "date": "2023-01-01", "content": "b"},
  {"slug": "a", "title": "A", "date": "2024-01-01", "content": "a", "featuredImage": "https://img.youtube.com/vi/x/0.jpg"}
]"#,
        )
        .unwrap();

        let posts = JsonFileSource::new(&path).get_all_posts().unwrap();
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "a"]);
        assert!(posts[1].is_youtube_thumbnail());
    }

    #[test]
    fn test_json_source_failure() {
        let tmp = TempDir::new().unwrap();
        let missing = JsonFileSource::new(tmp.path().join("nope.json"));
        assert!(matches!(
            missing.get_all_posts(),
            Err(BlogError::Source { .. })
        ));

        let path = tmp.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(JsonFileSource::new(&path).get_all_posts().is_err());
    }
}
