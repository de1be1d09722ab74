//! Page views: the blog listing, a single post, and notice pages
//!
//! Each view turns posts into pre-escaped template data and renders a
//! complete HTML document.

use tera::Context;

use crate::content::{BlogPost, MarkdownRenderer};
use crate::helpers::{css, css_url, html_escape, js, meta_generator, post_path, PageMeta, BLOG_PATH};
use crate::templates::{
    LayoutData, MessageData, PostCard, PostView, RelatedLink, TemplateRenderer, BLOG_CSS_PATH,
};
use crate::{Blog, Result};

/// Message shown when the listing cannot be fetched
pub const LIST_LOAD_ERROR: &str = "Unable to load blog posts";

/// Message shown when a post cannot be fetched
pub const POST_LOAD_ERROR: &str = "Unable to load blog post";

const CARD_IMAGE_CLASS: &str = "h-48";
const CARD_YOUTUBE_CLASS: &str = "youtube-thumbnail";
const HERO_IMAGE_CLASS: &str = "h-64 md:h-96";
const HERO_YOUTUBE_CLASS: &str = "youtube-featured";

const ERROR_PANEL_CLASS: &str = "bg-red-50 border border-red-200 text-red-700 px-4 py-3 rounded";
const NOT_FOUND_PANEL_CLASS: &str =
    "bg-yellow-50 border border-yellow-200 text-yellow-700 px-4 py-3 rounded";

/// Render the blog listing, one card per post in the given order
pub fn list(blog: &Blog, posts: &[BlogPost]) -> Result<String> {
    let meta = PageMeta::for_list(&blog.config);
    let cards: Vec<PostCard> = posts.iter().map(|post| card(blog, post)).collect();

    let mut context = Context::new();
    context.insert("layout", &layout(blog, &meta, None));
    context.insert("posts", &cards);

    TemplateRenderer::new()?.render("list.html", &context)
}

/// Render a post's page with links to `related` posts below it
pub fn detail(blog: &Blog, post: &BlogPost, related: &[&BlogPost]) -> Result<String> {
    let meta = PageMeta::for_post(&blog.config, post);
    let content_html = blog
        .markdown_renderer()
        .render(&post.content_without_title())?;

    let image = featured_image(post);
    let view = PostView {
        title: html_escape(&post.title),
        date: html_escape(&post.date),
        display_date: html_escape(&post.display_date()),
        author: author(post).map(html_escape),
        hero_class: if post.is_youtube_thumbnail() {
            HERO_YOUTUBE_CLASS
        } else {
            HERO_IMAGE_CLASS
        }
        .to_string(),
        background: css_url(image.unwrap_or(&blog.config.default_featured_image)),
        has_featured_image: image.is_some(),
        content_html,
    };

    let related: Vec<RelatedLink> = related
        .iter()
        .map(|other| RelatedLink {
            path: html_escape(&post_path(&other.slug)),
            title: html_escape(&other.title),
            date: html_escape(&other.date),
            display_date: html_escape(&other.display_date()),
        })
        .collect();

    let mut context = Context::new();
    context.insert("layout", &layout(blog, &meta, None));
    context.insert("blog_path", BLOG_PATH);
    context.insert("post", &view);
    context.insert("related", &related);

    TemplateRenderer::new()?.render("post.html", &context)
}

/// Render the error panel shown when posts cannot be fetched
pub fn load_error(blog: &Blog, message: &str) -> Result<String> {
    let meta = PageMeta::plain(&blog.config, "Blog");
    let data = MessageData {
        container_class: "max-w-7xl".to_string(),
        panel_class: ERROR_PANEL_CLASS.to_string(),
        body: html_escape(message),
    };
    message_page(blog, &meta, &data, None)
}

/// Render the page for a post that does not exist
///
/// The page also refreshes to the listing, for static hosts that serve it
/// in place of a redirect.
pub fn not_found(blog: &Blog) -> Result<String> {
    let meta = PageMeta::plain(&blog.config, "Post not found");
    let data = MessageData {
        container_class: "max-w-4xl".to_string(),
        panel_class: NOT_FOUND_PANEL_CLASS.to_string(),
        body: format!(
            r#"Blog post not found. <a href="{}" class="text-blue-600 hover:underline">Return to blog list</a>"#,
            BLOG_PATH
        ),
    };
    let refresh = format!(r#"<meta http-equiv="refresh" content="0; url={}">"#, BLOG_PATH);
    message_page(blog, &meta, &data, Some(&refresh))
}

fn message_page(
    blog: &Blog,
    meta: &PageMeta,
    data: &MessageData,
    extra_head: Option<&str>,
) -> Result<String> {
    let mut context = Context::new();
    context.insert("layout", &layout(blog, meta, extra_head));
    context.insert("message", data);

    TemplateRenderer::new()?.render("message.html", &context)
}

/// Document head shared by every page
fn layout(blog: &Blog, meta: &PageMeta, extra_head: Option<&str>) -> LayoutData {
    let mut head = vec![meta.to_head_html(), meta_generator()];
    head.extend(extra_head.map(str::to_string));

    let assets: Vec<String> = std::iter::once(css(BLOG_CSS_PATH))
        .chain(blog.config.stylesheets.iter().map(|href| css(href)))
        .chain(blog.config.scripts.iter().map(|src| js(src)))
        .collect();

    LayoutData {
        lang: html_escape(&blog.config.language),
        title: html_escape(&meta.title),
        head: head.join("\n"),
        assets: assets.join("\n"),
    }
}

fn card(blog: &Blog, post: &BlogPost) -> PostCard {
    let image = featured_image(post);

    PostCard {
        path: html_escape(&post_path(&post.slug)),
        title: html_escape(&post.title),
        date: html_escape(&post.date),
        display_date: html_escape(&post.display_date()),
        author: author(post).map(html_escape),
        excerpt_html: post
            .truncated_excerpt(blog.config.excerpt_length)
            .map(|excerpt| MarkdownRenderer::render_plain(&excerpt)),
        image_class: if post.is_youtube_thumbnail() {
            CARD_YOUTUBE_CLASS
        } else {
            CARD_IMAGE_CLASS
        }
        .to_string(),
        background: css_url(image.unwrap_or(&blog.config.default_featured_image)),
        has_featured_image: image.is_some(),
    }
}

fn featured_image(post: &BlogPost) -> Option<&str> {
    post.featured_image.as_deref().filter(|url| !url.is_empty())
}

fn author(post: &BlogPost) -> Option<&str> {
    post.author.as_deref().filter(|name| !name.is_empty())
}
