//! Content module - post records, sources and markdown rendering

mod embed;
mod frontmatter;
mod markdown;
mod post;
pub mod source;

pub use embed::{youtube_video_id, Embed, DEFAULT_IMAGE_ALT};
pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{find_post, related_posts, BlogPost};
pub use source::{source_for, JsonFileSource, MarkdownDirSource, PostSource};
