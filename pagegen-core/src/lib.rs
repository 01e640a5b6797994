//! Markdown tree to HTML site generation.
//!
//! Every `.md` file under a content directory becomes an `.html` file at the
//! same relative path under the output directory. Pages are built from a
//! single template with `{{ Title }}` and `{{ Content }}` slots, and
//! site-local links are re-rooted under a deployment base path.

pub mod assets;
pub mod builder;
pub mod config;
pub mod error;
pub mod links;
pub mod markdown;
pub mod renderer;
pub mod scanner;
pub mod site;
pub mod template;

// Re-export main types
pub use builder::{BuildSummary, Site, SiteBuilder, generate_pages_recursive};
pub use error::{BuildError, ConfigError, Error, MissingTitleError, Result};
pub use links::BasePath;
pub use markdown::{CommonMarkRenderer, MarkdownRenderer, extract_title};
pub use renderer::{PageGenerator, generate_page};
pub use scanner::SiteScanner;
pub use site::SourcePage;
pub use template::Template;
