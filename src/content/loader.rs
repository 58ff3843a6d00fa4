//! Post loader - reads and renders single posts from the posts directory

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{sanitize, today, MarkdownRenderer, Metadata, PageMeta, Post, PostError};
use crate::cache::MemoCache;
use crate::config::HighlightConfig;
use crate::Site;

/// Title given to posts without a `# ` heading
const UNTITLED: &str = "Untitled Post";

/// Path of the source file for post `id`
pub fn post_path(posts_dir: &Path, id: &str) -> PathBuf {
    posts_dir.join(format!("page_{}.md", id))
}

/// Ids are plain decimal numbers, which also keeps them inside the posts directory
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
}

/// Loads, renders and sanitizes posts, remembering each result
pub struct PostLoader {
    posts_dir: PathBuf,
    renderer: MarkdownRenderer,
    cache: MemoCache<Arc<Post>>,
}

impl PostLoader {
    /// Create a loader for the site's posts directory
    pub fn new(site: &Site) -> Self {
        Self::with_options(&site.posts_dir, &site.config.highlight)
    }

    /// Create a loader for an explicit directory
    pub fn with_options<P: AsRef<Path>>(posts_dir: P, highlight: &HighlightConfig) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
            renderer: MarkdownRenderer::with_options(highlight),
            cache: MemoCache::new(),
        }
    }

    /// Get a post by id, or `None` if it cannot be loaded.
    ///
    /// Read failures are logged and reported as a missing post. Rendered
    /// posts are cached for the lifetime of the loader; misses are not, and
    /// malformed ids never reach the cache.
    pub fn get(&self, id: &str) -> Option<Arc<Post>> {
        if !is_valid_id(id) {
            tracing::debug!("Rejected post id {:?}", id);
            return None;
        }

        self.cache.get_or_compute(id, || match self.load(id) {
            Ok(post) => Some(Arc::new(post)),
            Err(PostError::Read { path, source }) => {
                tracing::error!("Error reading post {:?}: {}", path, source);
                None
            }
            Err(e) => {
                tracing::debug!("{}", e);
                None
            }
        })
    }

    /// Load and render a post without consulting the cache
    pub fn load(&self, id: &str) -> Result<Post, PostError> {
        if !is_valid_id(id) {
            return Err(PostError::InvalidId(id.to_string()));
        }

        let path = post_path(&self.posts_dir, id);
        let raw = fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => PostError::NotFound(path.clone()),
            _ => PostError::Read {
                path: path.clone(),
                source,
            },
        })?;

        let meta = Metadata::extract(&raw, UNTITLED);
        let html = self.renderer.render(&meta.body(&raw));

        tracing::debug!("Rendered post {} ({} bytes of HTML)", id, html.len());

        Ok(Post {
            id: id.to_string(),
            title: meta.title,
            author: meta.author,
            content: sanitize(&html),
            date: today(),
        })
    }

    /// Page title and description for post `id`; never fails
    pub fn page_metadata(&self, id: &str) -> PageMeta {
        match self.get(id) {
            Some(post) => PageMeta::for_post(&post),
            None => PageMeta::not_found(),
        }
    }
}
