//! Helper functions shared by the views
//!
//! Date formatting, HTML escaping, URL building and page metadata.

mod date;
mod html;
mod meta;
mod url;

pub use date::*;
pub use html::*;
pub use meta::*;
pub use url::*;
