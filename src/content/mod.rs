//! Content module - post sources, rendering, sanitization and listing

mod dom;
mod error;
pub mod index;
pub mod loader;
mod markdown;
mod metadata;
mod post;
mod sanitize;

pub use error::PostError;
pub use index::PostIndex;
pub use loader::PostLoader;
pub use markdown::{apply_presentation_classes, MarkdownRenderer, HIGHLIGHT_MARKER};
pub use metadata::{excerpt, Metadata, DEFAULT_AUTHOR, EXCERPT_LENGTH};
pub use post::{today, PageMeta, Post, PostSummary};
pub use sanitize::sanitize;
