//! List the posts the configured source provides

use anyhow::Result;

use crate::content::PostSource;
use crate::helpers::{iso_date, post_path};
use crate::Blog;

/// Print every post with its date, path and title
pub fn run(blog: &Blog) -> Result<()> {
    let source = blog.post_source();
    let posts = source.get_all_posts()?;

    println!("Posts ({}) from {}:", posts.len(), source.describe());
    for post in posts {
        let date = match post.published() {
            Some(date) => iso_date(&date),
            None => format!("{} (unparsed)", post.date),
        };
        println!("  {} - {} [{}]", date, post.title, post_path(&post.slug));
    }

    Ok(())
}
