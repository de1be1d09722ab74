//! Page metadata: title, description, canonical URL, Open Graph and Twitter tags

use super::html::html_escape;
use super::url::{full_url_for, post_path, BLOG_PATH};
use crate::config::SiteConfig;
use crate::content::BlogPost;

/// Metadata emitted into a page's `<head>`
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    /// Open Graph / Twitter card data, only for articles
    pub article: Option<ArticleMeta>,
}

/// Social card fields for a single post
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleMeta {
    pub title: String,
    pub image: Option<String>,
    pub author: Option<String>,
    pub published_time: String,
}

impl PageMeta {
    /// Metadata for the blog listing
    pub fn for_list(config: &SiteConfig) -> Self {
        Self {
            title: format!("Blog - {}", config.title),
            description: format!("Blog posts about {}", config.description),
            canonical: full_url_for(config, BLOG_PATH),
            article: None,
        }
    }

    /// Metadata for a post's detail page
    pub fn for_post(config: &SiteConfig, post: &BlogPost) -> Self {
        Self {
            title: format!("{} - {}", post.title, config.title),
            description: post.description(config.description_length),
            canonical: full_url_for(config, &post_path(&post.slug)),
            article: Some(ArticleMeta {
                title: post.title.clone(),
                image: post.featured_image.clone().filter(|s| !s.is_empty()),
                author: post.author.clone().filter(|s| !s.is_empty()),
                published_time: post.date.clone(),
            }),
        }
    }

    /// Metadata for pages outside the listing and posts
    pub fn plain(config: &SiteConfig, title: &str) -> Self {
        Self {
            title: format!("{} - {}", title, config.title),
            description: config.description.clone(),
            canonical: full_url_for(config, BLOG_PATH),
            article: None,
        }
    }

    /// Render the `<head>` tags (without `<title>`)
    pub fn to_head_html(&self) -> String {
        let description = html_escape(&self.description);
        let canonical = html_escape(&self.canonical);

        let mut tags = vec![format!(
            r#"<meta name="description" content="{}">"#,
            description
        )];

        if let Some(article) = &self.article {
            let title = html_escape(&article.title);
            tags.push(format!(r#"<meta property="og:title" content="{}">"#, title));
            tags.push(format!(
                r#"<meta property="og:description" content="{}">"#,
                description
            ));
            tags.push(format!(r#"<meta property="og:url" content="{}">"#, canonical));
            tags.push(r#"<meta property="og:type" content="article">"#.to_string());
            if let Some(image) = &article.image {
                tags.push(format!(
                    r#"<meta property="og:image" content="{}">"#,
                    html_escape(image)
                ));
            }
            tags.push(r#"<meta name="twitter:card" content="summary_large_image">"#.to_string());
            tags.push(format!(r#"<meta name="twitter:title" content="{}">"#, title));
            tags.push(format!(
                r#"<meta name="twitter:description" content="{}">"#,
                description
            ));
            if let Some(image) = &article.image {
                tags.push(format!(
                    r#"<meta name="twitter:image" content="{}">"#,
                    html_escape(image)
                ));
            }
        }

        tags.push(format!(r#"<link rel="canonical" href="{}">"#, canonical));

        if let Some(article) = &self.article {
            if let Some(author) = &article.author {
                tags.push(format!(
                    r#"<meta name="author" content="{}">"#,
                    html_escape(author)
                ));
            }
            tags.push(format!(
                r#"<meta name="article:published_time" content="{}">"#,
                html_escape(&article.published_time)
            ));
        }

        tags.join("\n")
    }
}
