//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Path of the blog listing
pub const BLOG_PATH: &str = "/blog";

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Site-relative path of a post
///
/// # Examples
/// ```ignore
/// post_path("cost-guide") // -> "/cost-guide"
/// ```
pub fn post_path(slug: &str) -> String {
    format!("/{}", encode_segment(slug))
}

/// Generate a full URL including the site domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blog") // -> "https://example.com/blog"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    format!("{}/{}", config.base_url(), path.trim_start_matches('/'))
}

/// Percent-encode a single path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}
