//! Markdown rendering with embed overrides and optional syntax highlighting
//!
//! Posts are parsed with pulldown-cmark and the event stream is rewritten
//! before HTML generation: links, images and paragraphs may turn into
//! embeds (see [`Embed`]), and block elements get the site's
//! presentation classes.

use lazy_static::lazy_static;
use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd,
};
use regex::Regex;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::embed::Embed;
use crate::config::HighlightConfig;
use crate::error::{BlogError, Result};
use crate::helpers::html_escape;

lazy_static! {
    static ref BARE_URL: Regex = Regex::new(r"https?://[^\s<>]+").unwrap();
}

const PARAGRAPH_CLASS: &str = "text-gray-700 leading-relaxed mb-6";
const LINK_CLASS: &str = "text-blue-600 hover:text-blue-800 underline";
const H2_CLASS: &str = "text-3xl font-semibold mt-12 mb-6";
const H3_CLASS: &str = "text-2xl font-semibold mt-8 mb-4";
const UL_CLASS: &str = "list-disc pl-6 mb-6";
const OL_CLASS: &str = "list-decimal pl-6 mb-6";
const LI_CLASS: &str = "mb-2";
const BLOCKQUOTE_CLASS: &str = "border-l-4 border-gray-200 pl-4 italic my-6";
const INLINE_CODE_CLASS: &str = "bg-gray-100 px-1 py-0.5 rounded text-sm font-mono";
const PRE_CLASS: &str = "bg-gray-100 p-4 rounded-lg overflow-x-auto mb-6";
const CODE_CLASS: &str = "font-mono text-sm";

/// URL schemes kept in links and images; anything else is dropped
const SAFE_PROTOCOLS: [&str; 6] = ["http", "https", "mailto", "irc", "ircs", "xmpp"];

/// Syntax highlighting state, loaded only when highlighting is enabled
struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    fn load(theme_name: &str) -> Option<Self> {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = match theme_set.themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                tracing::warn!("Unknown highlight theme {:?}, highlighting disabled", theme_name);
                return None;
            }
        };
        Some(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    /// Highlight `code` as `lang`, or `None` if the language is unknown
    fn highlight(&self, code: &str, lang: &str) -> Result<Option<String>> {
        let syntax = match self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
        {
            Some(syntax) => syntax,
            None => return Ok(None),
        };

        let mut lines = HighlightLines::new(syntax, &self.theme);
        let mut output = String::with_capacity(code.len() * 2);
        for line in LinesWithEndings::from(code) {
            let regions = lines
                .highlight_line(line, &self.syntax_set)
                .map_err(|e| BlogError::Render(e.to_string()))?;
            let html = styled_line_to_highlighted_html(&regions[..], IncludeBackground::No)
                .map_err(|e| BlogError::Render(e.to_string()))?;
            output.push_str(&html);
        }
        Ok(Some(output))
    }
}

/// Markdown renderer for post bodies
pub struct MarkdownRenderer {
    highlighter: Option<Highlighter>,
}

impl MarkdownRenderer {
    /// Create a renderer without syntax highlighting
    pub fn new() -> Self {
        Self { highlighter: None }
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, highlight: bool) -> Self {
        let highlighter = if highlight {
            Highlighter::load(theme)
        } else {
            None
        };
        Self { highlighter }
    }

    /// Create from the site's highlight settings
    pub fn from_config(config: &HighlightConfig) -> Self {
        Self::with_options(&config.theme, config.enable)
    }

    /// Render a post body to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let events = normalize(Parser::new_ext(markdown, options));

        let mut rewritten = Vec::with_capacity(events.len());
        self.rewrite(&events, true, &mut rewritten)?;

        let mut html_output = String::new();
        html::push_html(&mut html_output, rewritten.into_iter());

        Ok(html_output)
    }

    /// Render markdown as plain CommonMark, without overrides
    pub fn render_plain(markdown: &str) -> String {
        let events = normalize(Parser::new(markdown))
            .into_iter()
            .map(|event| match event {
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => Event::Start(Tag::Link {
                    link_type,
                    dest_url: safe_url(&dest_url).to_string().into(),
                    title,
                    id,
                }),
                Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => Event::Start(Tag::Image {
                    link_type,
                    dest_url: safe_url(&dest_url).to_string().into(),
                    title,
                    id,
                }),
                other => other,
            });
        let mut html_output = String::new();
        html::push_html(&mut html_output, events);
        html_output
    }

    /// Rewrite a balanced slice of events into `out`
    fn rewrite<'a>(
        &self,
        events: &[Event<'a>],
        autolink: bool,
        out: &mut Vec<Event<'a>>,
    ) -> Result<()> {
        let mut i = 0;

        while i < events.len() {
            match &events[i] {
                Event::Start(Tag::Paragraph) => {
                    let end = matching_end(events, i);
                    self.paragraph(&events[i + 1..end], out)?;
                    i = end + 1;
                    continue;
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    ..
                }) => {
                    let end = matching_end(events, i);
                    let href = link_href(*link_type, dest_url);
                    self.link(safe_url(&href), title, &events[i + 1..end], out)?;
                    i = end + 1;
                    continue;
                }
                Event::Start(Tag::Image {
                    dest_url, title, ..
                }) => {
                    let end = matching_end(events, i);
                    let alt = plain_text(&events[i + 1..end]);
                    if let Some(embed) = Embed::from_image(safe_url(dest_url), &alt, title) {
                        out.push(Event::Html(embed.to_html().into()));
                    }
                    i = end + 1;
                    continue;
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    let end = matching_end(events, i);
                    let code = plain_text(&events[i + 1..end]);
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info.split_whitespace().next(),
                        CodeBlockKind::Indented => None,
                    };
                    out.push(Event::Html(self.code_block(&code, lang)?.into()));
                    i = end + 1;
                    continue;
                }
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    out.push(Event::Html(
                        heading_open(*level, id.as_deref(), classes, attrs).into(),
                    ));
                }
                Event::End(TagEnd::Heading(level)) => {
                    out.push(Event::Html(format!("</h{}>\n", *level as usize).into()));
                }
                Event::Start(Tag::List(None)) => {
                    out.push(Event::Html(format!("<ul class=\"{}\">\n", UL_CLASS).into()));
                }
                Event::Start(Tag::List(Some(start))) => {
                    let start_attr = if *start == 1 {
                        String::new()
                    } else {
                        format!(" start=\"{}\"", start)
                    };
                    out.push(Event::Html(
                        format!("<ol class=\"{}\"{}>\n", OL_CLASS, start_attr).into(),
                    ));
                }
                Event::End(TagEnd::List(ordered)) => {
                    let tag = if *ordered { "</ol>\n" } else { "</ul>\n" };
                    out.push(Event::Html(tag.into()));
                }
                Event::Start(Tag::Item) => {
                    out.push(Event::Html(format!("<li class=\"{}\">", LI_CLASS).into()));
                }
                Event::End(TagEnd::Item) => {
                    out.push(Event::Html("</li>\n".into()));
                }
                Event::Start(Tag::BlockQuote { .. }) => {
                    out.push(Event::Html(
                        format!("<blockquote class=\"{}\">\n", BLOCKQUOTE_CLASS).into(),
                    ));
                }
                Event::End(TagEnd::BlockQuote { .. }) => {
                    out.push(Event::Html("</blockquote>\n".into()));
                }
                Event::Code(code) => {
                    out.push(Event::Html(
                        format!(
                            "<code class=\"{}\">{}</code>",
                            INLINE_CODE_CLASS,
                            html_escape(code)
                        )
                        .into(),
                    ));
                }
                Event::Text(text) if autolink && BARE_URL.is_match(text) => {
                    self.autolink(text, out)?;
                }
                other => out.push(other.clone()),
            }
            i += 1;
        }

        Ok(())
    }

    /// Render a paragraph, replacing it with an embed where it applies
    fn paragraph<'a>(&self, inner: &[Event<'a>], out: &mut Vec<Event<'a>>) -> Result<()> {
        if let Some(embed) = paragraph_embed(inner) {
            out.push(Event::Html(embed.to_html().into()));
            return Ok(());
        }

        out.push(Event::Html(format!("<p class=\"{}\">", PARAGRAPH_CLASS).into()));
        self.rewrite(inner, true, out)?;
        out.push(Event::Html("</p>\n".into()));
        Ok(())
    }

    /// Render a link, or the embed it points at
    fn link<'a>(
        &self,
        href: &str,
        title: &str,
        inner: &[Event<'a>],
        out: &mut Vec<Event<'a>>,
    ) -> Result<()> {
        let embed = match link_caption(inner) {
            Some(text) => Embed::from_link(href, &text),
            None => Embed::from_video_link(href),
        };
        if let Some(embed) = embed {
            out.push(Event::Html(embed.to_html().into()));
            return Ok(());
        }

        let mut open = format!("<a href=\"{}\"", html_escape(href));
        if !title.is_empty() {
            open.push_str(&format!(" title=\"{}\"", html_escape(title)));
        }
        open.push_str(&format!(" class=\"{}\"", LINK_CLASS));
        if href.starts_with("http") {
            open.push_str(r#" target="_blank" rel="noopener noreferrer""#);
        }
        open.push('>');

        out.push(Event::Html(open.into()));
        self.rewrite(inner, false, out)?;
        out.push(Event::Html("</a>".into()));
        Ok(())
    }

    /// Turn bare URLs inside a text run into links
    fn autolink<'a>(&self, text: &str, out: &mut Vec<Event<'a>>) -> Result<()> {
        let mut last = 0;
        for m in BARE_URL.find_iter(text) {
            let url = trim_url(m.as_str());
            if url.is_empty() {
                continue;
            }
            if m.start() > last {
                out.push(Event::Text(text[last..m.start()].to_string().into()));
            }
            let inner = [Event::Text(url.to_string().into())];
            self.link(url, "", &inner, out)?;
            last = m.start() + url.len();
        }
        if last < text.len() {
            out.push(Event::Text(text[last..].to_string().into()));
        }
        Ok(())
    }

    /// Render a code block, highlighted when possible
    fn code_block(&self, code: &str, lang: Option<&str>) -> Result<String> {
        let highlighted = match (&self.highlighter, lang) {
            (Some(highlighter), Some(lang)) => highlighter.highlight(code, lang)?,
            _ => None,
        };
        let body = highlighted.unwrap_or_else(|| html_escape(code));
        Ok(format!(
            "<pre class=\"{}\"><code class=\"{}\">{}</code></pre>\n",
            PRE_CLASS, CODE_CLASS, body
        ))
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Embed that should replace a whole paragraph, if any
fn paragraph_embed(inner: &[Event<'_>]) -> Option<Embed> {
    match inner {
        [Event::Text(text)] => Embed::from_paragraph_text(text).or_else(|| {
            let url = text.trim();
            let is_single_url = BARE_URL
                .find(url)
                .is_some_and(|m| m.start() == 0 && trim_url(m.as_str()).len() == url.len());
            if is_single_url {
                Embed::from_link(url, url)
            } else {
                None
            }
        }),
        [Event::Start(Tag::Link {
            link_type,
            dest_url,
            ..
        }), rest @ ..]
            if matching_end(inner, 0) == inner.len() - 1 =>
        {
            let href = link_href(*link_type, dest_url);
            let href = safe_url(&href);
            match link_caption(&rest[..rest.len() - 1]) {
                Some(text) => Embed::from_link(href, &text),
                None => Embed::from_video_link(href),
            }
        }
        [Event::Start(Tag::Image {
            dest_url, title, ..
        }), rest @ ..]
            if matching_end(inner, 0) == inner.len() - 1 =>
        {
            Embed::from_image(safe_url(dest_url), &plain_text(&rest[..rest.len() - 1]), title)
        }
        _ => None,
    }
}

/// Open tag for a heading, keeping `{#id .class}` attributes
fn heading_open(
    level: HeadingLevel,
    id: Option<&str>,
    classes: &[CowStr<'_>],
    attrs: &[(CowStr<'_>, Option<CowStr<'_>>)],
) -> String {
    let n = level as usize;
    let mut tag = format!("<h{}", n);

    if let Some(id) = id {
        tag.push_str(&format!(" id=\"{}\"", html_escape(id)));
    }

    let mut class_list: Vec<&str> = match level {
        HeadingLevel::H2 => vec![H2_CLASS],
        HeadingLevel::H3 => vec![H3_CLASS],
        _ => Vec::new(),
    };
    class_list.extend(classes.iter().map(|c| c.as_ref()));
    if !class_list.is_empty() {
        tag.push_str(&format!(" class=\"{}\"", html_escape(&class_list.join(" "))));
    }

    for (key, value) in attrs {
        match value {
            Some(value) => tag.push_str(&format!(
                " {}=\"{}\"",
                html_escape(key),
                html_escape(value)
            )),
            None => tag.push_str(&format!(" {}", html_escape(key))),
        }
    }

    tag.push('>');
    tag
}

/// Merge adjacent text events and neutralize raw HTML from the source
fn normalize<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut merged: Vec<Event<'a>> = Vec::new();

    for event in events {
        let event = match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        };

        if let Event::Text(text) = &event {
            if let Some(Event::Text(prev)) = merged.last_mut() {
                *prev = CowStr::from(format!("{}{}", prev, text));
                continue;
            }
        }
        merged.push(event);
    }

    merged
}

/// Index of the event closing the tag opened at `start`
fn matching_end(events: &[Event<'_>], start: usize) -> usize {
    let mut depth = 0usize;
    for (offset, event) in events[start..].iter().enumerate() {
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return start + offset;
                }
            }
            _ => {}
        }
    }
    events.len() - 1
}

/// Visible text of a span of events
fn plain_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

/// Link text when it is plain text only
///
/// Formatted link text is prose, so only plain captions can turn an image
/// link into an image.
fn link_caption(events: &[Event<'_>]) -> Option<String> {
    events
        .iter()
        .all(|event| matches!(event, Event::Text(_) | Event::SoftBreak | Event::HardBreak))
        .then(|| plain_text(events))
}

/// Link target as written, with `mailto:` added to email autolinks
fn link_href(link_type: LinkType, dest_url: &str) -> String {
    match link_type {
        LinkType::Email => format!("mailto:{}", dest_url),
        _ => dest_url.to_string(),
    }
}

/// The URL when it is relative or uses a safe scheme, else empty
fn safe_url(url: &str) -> &str {
    let Some(colon) = url.find(':') else {
        return url;
    };
    // A colon after the path, query or fragment starts is not a scheme
    if url.find(['/', '?', '#']).is_some_and(|boundary| colon > boundary) {
        return url;
    }
    let scheme = &url[..colon];
    if SAFE_PROTOCOLS.iter().any(|p| scheme.eq_ignore_ascii_case(p)) {
        url
    } else {
        ""
    }
}

/// Drop trailing punctuation and unbalanced closing parens from a bare URL
fn trim_url(url: &str) -> &str {
    let mut end = url.len();
    loop {
        let candidate = &url[..end];
        match candidate.chars().last() {
            Some('.' | ',' | ':' | ';' | '!' | '?' | '"' | '\'' | '*' | '_' | '~') => {
                end -= 1;
            }
            Some(')') if candidate.matches(')').count() > candidate.matches('(').count() => {
                end -= 1;
            }
            _ => break,
        }
    }
    &url[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(md: &str) -> String {
        MarkdownRenderer::new().render(md).unwrap()
    }

    #[test]
    fn test_render_basic_markdown() {
        let html = render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains(r#"<p class="text-gray-700 leading-relaxed mb-6">This is a test.</p>"#));
    }

    #[test]
    fn test_heading_classes() {
        let html = render("## Plans\n\n### Add-ons {#addons .wide}\n");
        assert!(html.contains(r#"<h2 class="text-3xl font-semibold mt-12 mb-6">Plans</h2>"#));
        assert!(html.contains(
            r#"<h3 id="addons" class="text-2xl font-semibold mt-8 mb-4 wide">Add-ons</h3>"#
        ));
    }

    #[test]
    fn test_list_and_blockquote_classes() {
        let html = render("- one\n- two\n\n3. three\n4. four\n\n> quoted\n");
        assert!(html.contains(r#"<ul class="list-disc pl-6 mb-6">"#));
        assert!(html.contains(r#"<li class="mb-2">one</li>"#));
        assert!(html.contains(r#"<ol class="list-decimal pl-6 mb-6" start="3">"#));
        assert!(html.contains(r#"<blockquote class="border-l-4 border-gray-200 pl-4 italic my-6">"#));
        assert!(html.contains("quoted"));
    }

    #[test]
    fn test_code() {
        let html = render("Run `cargo test` now.\n\n```rust\nfn main() { 1 < 2; }\n```\n");
        assert!(html.contains(
            r#"<code class="bg-gray-100 px-1 py-0.5 rounded text-sm font-mono">cargo test</code>"#
        ));
        assert!(html.contains(
            r#"<pre class="bg-gray-100 p-4 rounded-lg overflow-x-auto mb-6"><code class="font-mono text-sm">fn main() { 1 &lt; 2; }"#
        ));
    }

    #[test]
    fn test_code_highlighting() {
        let renderer = MarkdownRenderer::with_options("InspiredGitHub", true);
        let html = renderer.render("```rust\nfn main() {}\n```\n").unwrap();
        assert!(html.contains(r#"<pre class="bg-gray-100 p-4 rounded-lg overflow-x-auto mb-6">"#));
        assert!(html.contains("<span style="));

        // Unknown languages fall back to escaped text
        let html = renderer.render("```nosuchlang\na < b\n```\n").unwrap();
        assert!(html.contains("a &lt; b"));
    }

    #[test]
    fn test_youtube_link_becomes_iframe() {
        let html = render("[Watch](https://www.youtube.com/watch?v=dQw4w9WgXcQ)");
        assert!(html.contains(r#"src="https://www.youtube.com/embed/dQw4w9WgXcQ""#));
        assert!(!html.contains("<p"));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_youtube_shortcut_paragraph() {
        let html = render("Intro\n\nyoutube:dQw4w9WgXcQ\n\nOutro");
        assert!(html.contains(r#"src="https://www.youtube.com/embed/dQw4w9WgXcQ""#));
        assert!(html.contains(">Intro</p>"));
        assert!(html.contains(">Outro</p>"));
    }

    #[test]
    fn test_bare_youtube_url_paragraph() {
        let html = render("https://youtu.be/dQw4w9WgXcQ");
        assert!(html.contains(r#"<iframe width="100%" height="400""#));
    }

    #[test]
    fn test_bare_image_url_paragraph() {
        let html = render("https://cdn.example.com/lineup.jpg");
        assert!(html.starts_with(
            r#"<div class="my-8"><img src="https://cdn.example.com/lineup.jpg" alt="Blog post image""#
        ));
    }

    #[test]
    fn test_image_link_with_short_text() {
        let html = render("[Image](https://cdn.example.com/a.png)");
        assert!(html.contains(r#"<img src="https://cdn.example.com/a.png" alt="Image""#));
    }

    #[test]
    fn test_image_link_with_long_text_stays_link() {
        let html = render("See [the full channel lineup](https://cdn.example.com/a.png).");
        assert!(html.contains(
            r#"<a href="https://cdn.example.com/a.png" class="text-blue-600 hover:text-blue-800 underline" target="_blank" rel="noopener noreferrer">the full channel lineup</a>"#
        ));
    }

    #[test]
    fn test_internal_link_has_no_target() {
        let html = render("Try the [calculator](/calculator \"Calc\").");
        assert!(html.contains(
            r#"<a href="/calculator" title="Calc" class="text-blue-600 hover:text-blue-800 underline">calculator</a>"#
        ));
    }

    #[test]
    fn test_markdown_image() {
        let html = render("![Plan chart](/img/chart.png)\n\nText ![](/img/x.png) here");
        assert!(html.starts_with(r#"<div class="my-8"><img src="/img/chart.png" alt="Plan chart""#));
        assert!(html.contains(r#"<img src="/img/x.png" alt="Blog post image""#));
    }

    #[test]
    fn test_autolink_in_text() {
        let html = render("Prices at https://tv.youtube.com/welcome. Check them.");
        assert!(html.contains(r#"<a href="https://tv.youtube.com/welcome" class="#));
        assert!(html.contains("</a>. Check them."));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render("Hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_plain() {
        let html = MarkdownRenderer::render_plain("Some **bold** text");
        assert_eq!(html, "<p>Some <strong>bold</strong> text</p>\n");
    }

    #[test]
    fn test_unsafe_link_schemes_dropped() {
        let html = render("[click](javascript:alert(1)) and [x](VBScript:msgbox)");
        assert!(!html.contains("javascript:"));
        assert!(!html.contains("VBScript:"));
        assert!(html.contains(r#"<a href="" class="text-blue-600 hover:text-blue-800 underline">click</a>"#));

        let html = render("![chart](data:image/png;base64,AAAA)");
        assert!(!html.contains("data:"));
        assert!(!html.contains("<img"));

        let html = MarkdownRenderer::render_plain("[x](javascript:alert(1))");
        assert_eq!(html, "<p><a href=\"\">x</a></p>\n");
    }

    #[test]
    fn test_safe_url() {
        assert_eq!(safe_url("https://tv.youtube.com"), "https://tv.youtube.com");
        assert_eq!(safe_url("MAILTO:team@example.com"), "MAILTO:team@example.com");
        assert_eq!(safe_url("/blog"), "/blog");
        assert_eq!(safe_url("plans?at=10:30"), "plans?at=10:30");
        assert_eq!(safe_url("#section"), "#section");
        assert_eq!(safe_url(" javascript:alert(1)"), "");
        assert_eq!(safe_url("data:text/html,hi"), "");
    }

    #[test]
    fn test_email_autolink() {
        let html = render("Mail <team@example.com> now");
        assert!(html.contains(r#"<a href="mailto:team@example.com" class="text-blue-600"#));
        assert!(html.contains(">team@example.com</a>"));
        assert!(!html.contains("target=\"_blank\""));
    }

    #[test]
    fn test_formatted_image_link_stays_link() {
        let html = render("See [*pic*](https://example.com/a.jpg) here");
        assert!(!html.contains("<img"));
        assert!(html.contains(r#"<a href="https://example.com/a.jpg""#));
        assert!(html.contains("<em>pic</em>"));

        let html = render("[**Watch**](https://youtu.be/dQw4w9WgXcQ)");
        assert!(html.contains("https://www.youtube.com/embed/dQw4w9WgXcQ"));
    }

    #[test]
    fn test_trim_url() {
        assert_eq!(trim_url("https://a.com/x."), "https://a.com/x");
        assert_eq!(trim_url("https://a.com/x)"), "https://a.com/x");
        assert_eq!(trim_url("https://en.wikipedia.org/wiki/Foo_(bar)"), "https://en.wikipedia.org/wiki/Foo_(bar)");
    }
}
