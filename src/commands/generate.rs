//! Generate static files

use anyhow::{Context, Result};

use crate::content::PostSource;
use crate::generator::Generator;
use crate::Blog;

/// Fetch all posts and export the site to the public directory
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let source = blog.post_source();
    let posts = source
        .get_all_posts()
        .with_context(|| format!("Unable to load blog posts from {}", source.describe()))?;

    tracing::info!("Loaded {} posts from {}", posts.len(), source.describe());

    let written = Generator::new(blog).generate(&posts)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} post pages in {:.2}s",
        written,
        duration.as_secs_f64()
    );

    Ok(())
}
