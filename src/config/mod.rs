//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::PostSourceKind;
pub use site::PostsConfig;
pub use site::SiteConfig;
pub use site::DEFAULT_FEATURED_IMAGE;
