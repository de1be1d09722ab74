//! Built-in blog templates using the Tera template engine
//!
//! The layout, listing, post and message templates are embedded in the
//! binary. Every value handed to them is already HTML-escaped, so
//! autoescaping stays off.

use serde::Serialize;
use tera::{Context, Tera};

use crate::error::Result;

/// Stylesheet shipped with the templates, served at [`BLOG_CSS_PATH`]
pub const BLOG_CSS: &str = include_str!("blog/blog.css");

/// Site path of the bundled stylesheet
pub const BLOG_CSS_PATH: &str = "/css/blog.css";

/// Template renderer with the embedded blog templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Values are escaped when the view models are built; Tera would
        // otherwise escape `/` in every URL
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("blog/layout.html")),
            ("list.html", include_str!("blog/list.html")),
            ("post.html", include_str!("blog/post.html")),
            ("message.html", include_str!("blog/message.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

// Data structures for template context

/// Document-level data used by `layout.html`
#[derive(Debug, Clone, Serialize)]
pub struct LayoutData {
    pub lang: String,
    /// Contents of `<title>`
    pub title: String,
    /// Meta, canonical and generator tags
    pub head: String,
    /// Stylesheet and script tags
    pub assets: String,
}

/// A post as a card in the listing grid
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub path: String,
    pub title: String,
    pub date: String,
    pub display_date: String,
    pub author: Option<String>,
    pub excerpt_html: Option<String>,
    pub image_class: String,
    pub background: String,
    pub has_featured_image: bool,
}

/// A post on its own page
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub title: String,
    pub date: String,
    pub display_date: String,
    pub author: Option<String>,
    pub hero_class: String,
    pub background: String,
    pub has_featured_image: bool,
    pub content_html: String,
}

/// Link to another post below an article
#[derive(Debug, Clone, Serialize)]
pub struct RelatedLink {
    pub path: String,
    pub title: String,
    pub date: String,
    pub display_date: String,
}

/// A single notice in place of page content
#[derive(Debug, Clone, Serialize)]
pub struct MessageData {
    pub container_class: String,
    pub panel_class: String,
    /// Inner HTML of the panel
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> LayoutData {
        LayoutData {
            lang: "en".into(),
            title: "Blog - Site".into(),
            head: r#"<meta name="description" content="d">"#.into(),
            assets: r#"<link rel="stylesheet" href="/css/blog.css">"#.into(),
        }
    }

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_empty_list_renders_notice() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("layout", &layout());
        context.insert("posts", &Vec::<PostCard>::new());

        let html = renderer.render("list.html", &context).unwrap();
        assert!(html.contains("<title>Blog - Site</title>"));
        assert!(html.contains("No blog posts available yet."));
        assert!(html.contains("Check back soon for new content!"));
        // URLs are not escaped by the engine
        assert!(html.contains(r#"href="/css/blog.css""#));
    }

    #[test]
    fn test_message_renders_body_verbatim() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("layout", &layout());
        context.insert(
            "message",
            &MessageData {
                container_class: "max-w-4xl".into(),
                panel_class: "bg-red-50".into(),
                body: "Unable to load blog post".into(),
            },
        );

        let html = renderer.render("message.html", &context).unwrap();
        assert!(html.contains(r#"<div class="bg-red-50">"#));
        assert!(html.contains("Unable to load blog post"));
    }

    #[test]
    fn test_bundled_css() {
        assert!(BLOG_CSS.contains(".youtube-thumbnail"));
        assert!(BLOG_CSS.contains(".youtube-featured"));
    }
}
