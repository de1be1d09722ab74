//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Cut a string to `length` characters, appending `omission` when cut
pub fn truncate(s: &str, length: usize, omission: &str) -> String {
    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(length).collect();
        format!("{}{}", truncated, omission)
    }
}

/// CSS `url()` value for an inline style attribute
pub fn css_url(url: &str) -> String {
    let quoted = url
        .replace('\'', "%27")
        .replace('(', "%28")
        .replace(')', "%29")
        .replace('\\', "%5C");
    html_escape(&format!("url('{}')", quoted))
}

/// Generate a stylesheet link tag
pub fn css(href: &str) -> String {
    format!(r#"<link rel="stylesheet" href="{}">"#, html_escape(href))
}

/// Generate a script tag
pub fn js(src: &str) -> String {
    format!(r#"<script src="{}"></script>"#, html_escape(src))
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="tvcalc-blog {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5, "..."), "Hello...");
        assert_eq!(truncate("Hi", 10, "..."), "Hi");
        assert_eq!(truncate("héllo wörld", 7, "…"), "héllo w…");
    }

    #[test]
    fn test_tags() {
        assert_eq!(css("/css/blog.css"), r#"<link rel="stylesheet" href="/css/blog.css">"#);
        assert_eq!(js("https://cdn.example/a.js?x=1&y=2"), r#"<script src="https://cdn.example/a.js?x=1&amp;y=2"></script>"#);
    }

    #[test]
    fn test_css_url() {
        assert_eq!(
            css_url("https://img.youtube.com/vi/x/0.jpg"),
            "url(&#39;https://img.youtube.com/vi/x/0.jpg&#39;)"
        );
        assert_eq!(css_url("/a'b(1).png"), "url(&#39;/a%27b%281%29.png&#39;)");
    }
}
