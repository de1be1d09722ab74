//! Embed detection for links and bare paragraphs
//!
//! Decides when a link or a paragraph in a post should be shown as a
//! YouTube player or an image instead of its plain markdown rendering.

use lazy_static::lazy_static;
use regex::Regex;

use crate::helpers::html_escape;

lazy_static! {
    static ref YOUTUBE_URL: Regex = Regex::new(
        r#"(?i)(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#
    )
    .unwrap();
    static ref IMAGE_HREF: Regex = Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp)$").unwrap();
    static ref IMAGE_URL: Regex = Regex::new(r"(?i)^https?://.*\.(jpg|jpeg|png|gif|webp)$").unwrap();
}

/// Alt text used when an image has none
pub const DEFAULT_IMAGE_ALT: &str = "Blog post image";

/// Paragraph prefix for the video shortcut, e.g. `youtube:dQw4w9WgXcQ`
const YOUTUBE_SHORTCUT: &str = "youtube:";

/// Link text shorter than this is treated as a caption, not prose
const CAPTION_MAX_CHARS: usize = 10;

/// A block that replaces a link, image or paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Embed {
    YouTube {
        video_id: String,
    },
    Image {
        src: String,
        alt: String,
        title: Option<String>,
    },
}

impl Embed {
    /// Classify a link by its target and visible text
    pub fn from_link(href: &str, text: &str) -> Option<Self> {
        if let Some(video) = Self::from_video_link(href) {
            return Some(video);
        }

        if IMAGE_HREF.is_match(href)
            && (text == href
                || text == "Image"
                || text == "image"
                || text.chars().count() < CAPTION_MAX_CHARS)
        {
            let alt = if text == href { DEFAULT_IMAGE_ALT } else { text };
            return Some(Embed::Image {
                src: href.to_string(),
                alt: alt.to_string(),
                title: None,
            });
        }

        None
    }

    /// Player for a YouTube link, whatever its text
    pub fn from_video_link(href: &str) -> Option<Self> {
        youtube_video_id(href).map(|video_id| Embed::YouTube {
            video_id: video_id.to_string(),
        })
    }

    /// Classify a paragraph that holds nothing but plain text
    pub fn from_paragraph_text(text: &str) -> Option<Self> {
        if IMAGE_URL.is_match(text) {
            return Some(Embed::Image {
                src: text.to_string(),
                alt: DEFAULT_IMAGE_ALT.to_string(),
                title: None,
            });
        }

        let trimmed = text.trim();
        if let Some(video_id) = trimmed.strip_prefix(YOUTUBE_SHORTCUT) {
            return Some(Embed::YouTube {
                video_id: video_id.to_string(),
            });
        }

        None
    }

    /// Build an image embed from markdown image syntax
    ///
    /// Images without a source are dropped.
    pub fn from_image(src: &str, alt: &str, title: &str) -> Option<Self> {
        if src.is_empty() {
            return None;
        }
        Some(Embed::Image {
            src: src.to_string(),
            alt: if alt.is_empty() { DEFAULT_IMAGE_ALT } else { alt }.to_string(),
            title: Some(title.to_string()).filter(|t| !t.is_empty()),
        })
    }

    /// Render the embed as a block of HTML
    pub fn to_html(&self) -> String {
        match self {
            Embed::YouTube { video_id } => format!(
                concat!(
                    r#"<div class="my-8 aspect-w-16 aspect-h-9">"#,
                    r#"<iframe width="100%" height="400" src="https://www.youtube.com/embed/{}" "#,
                    r#"title="YouTube video player" frameborder="0" "#,
                    r#"allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" "#,
                    r#"allowfullscreen class="rounded-lg shadow-md"></iframe></div>"#,
                    "\n"
                ),
                html_escape(video_id)
            ),
            Embed::Image { src, alt, title } => {
                let title_attr = title
                    .as_deref()
                    .map(|t| format!(r#" title="{}""#, html_escape(t)))
                    .unwrap_or_default();
                format!(
                    concat!(
                        r#"<div class="my-8"><img src="{}" alt="{}"{} "#,
                        r#"class="rounded-lg shadow-md w-full h-auto" loading="lazy" "#,
                        r#"onerror="this.style.display='none'"></div>"#,
                        "\n"
                    ),
                    html_escape(src),
                    html_escape(alt),
                    title_attr
                )
            }
        }
    }
}

/// Extract the 11-character video id from a YouTube URL
pub fn youtube_video_id(url: &str) -> Option<&str> {
    YOUTUBE_URL
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
