//! Blog post model

use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::helpers::{long_date, parse_date_string, truncate};

lazy_static! {
    /// First level-one ATX heading, anywhere in the document
    static ref TITLE_HEADING: Regex = Regex::new(r"(?m)^#\s+.*$").unwrap();
    /// Markdown punctuation dropped from generated descriptions
    static ref MARKDOWN_PUNCT: Regex = Regex::new(r"[#*_`\[\]()]").unwrap();
}

/// A blog post record, loaded in bulk and never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// URL-safe unique identifier, used as the route key
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date as authored
    pub date: String,

    /// Post author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Short markdown summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Hero image URL
    #[serde(default, alias = "featured_image", skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,

    /// Markdown body
    #[serde(default)]
    pub content: String,
}

impl BlogPost {
    /// Create a post with the required fields
    pub fn new(slug: &str, title: &str, date: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            author: None,
            excerpt: None,
            featured_image: None,
            content: String::new(),
        }
    }

    /// Parsed publication date
    pub fn published(&self) -> Option<NaiveDateTime> {
        parse_date_string(&self.date)
    }

    /// Date for display, e.g. "January 5, 2024"
    ///
    /// Unparseable dates are shown as authored.
    pub fn display_date(&self) -> String {
        match self.published() {
            Some(date) => long_date(&date),
            None => self.date.clone(),
        }
    }

    /// Whether the featured image is a YouTube video thumbnail
    pub fn is_youtube_thumbnail(&self) -> bool {
        self.featured_image
            .as_deref()
            .is_some_and(|url| url.contains("img.youtube.com"))
    }

    /// Markdown body with the first `# ` heading removed
    ///
    /// The detail view prints the title itself, so the heading would repeat.
    pub fn content_without_title(&self) -> String {
        TITLE_HEADING
            .replace(&self.content, "")
            .trim()
            .to_string()
    }

    /// Meta description: the excerpt, or the start of the body
    pub fn description(&self, limit: usize) -> String {
        if let Some(excerpt) = self.excerpt.as_deref().filter(|e| !e.is_empty()) {
            return excerpt.to_string();
        }

        let body = self.content_without_title();
        let plain = MARKDOWN_PUNCT.replace_all(&body, "");
        let cut: String = plain.chars().take(limit).collect();
        format!("{}...", cut.trim())
    }

    /// Excerpt shortened for listing cards
    pub fn truncated_excerpt(&self, limit: usize) -> Option<String> {
        self.excerpt
            .as_deref()
            .filter(|e| !e.is_empty())
            .map(|e| truncate(e, limit, "..."))
    }
}

/// Find the post with the given slug
pub fn find_post<'a>(posts: &'a [BlogPost], slug: &str) -> Option<&'a BlogPost> {
    posts.iter().find(|p| p.slug == slug)
}

/// Posts to suggest under an article, in source order
pub fn related_posts<'a>(posts: &'a [BlogPost], current: &str, limit: usize) -> Vec<&'a BlogPost> {
    posts
        .iter()
        .filter(|p| p.slug != current)
        .take(limit)
        .collect()
}
