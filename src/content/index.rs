//! Post index - lists post summaries from the posts directory

use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{excerpt, today, Metadata, PostSummary};
use crate::Site;

lazy_static! {
    static ref POST_FILE: Regex = Regex::new(r"^page_(\d+)\.md$").unwrap();
}

/// Id of a post source file name, e.g. `page_12.md` -> `12`
pub fn post_id(file_name: &str) -> Option<&str> {
    POST_FILE
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str())
}

/// Lists the posts available on disk
pub struct PostIndex {
    posts_dir: PathBuf,
}

impl PostIndex {
    /// Create an index over the site's posts directory
    pub fn new(site: &Site) -> Self {
        Self::with_dir(&site.posts_dir)
    }

    /// Create an index over an explicit directory
    pub fn with_dir<P: AsRef<Path>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
        }
    }

    /// Summaries of all posts, ordered by numeric id.
    ///
    /// The directory is scanned afresh on every call. A missing or
    /// unreadable directory gives an empty list; unreadable files are
    /// skipped.
    pub fn list_posts(&self) -> Vec<PostSummary> {
        if !self.posts_dir.is_dir() {
            tracing::warn!("Posts directory {:?} not found", self.posts_dir);
            return Vec::new();
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(&self.posts_dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Error reading posts directory {:?}: {}", self.posts_dir, e);
                    continue;
                }
            };

            let path = entry.path();
            let Some(id) = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(post_id)
            else {
                continue;
            };

            if !path.is_file() {
                continue;
            }

            match fs::read_to_string(path) {
                Ok(raw) => posts.push(summarize(id, &raw)),
                Err(e) => {
                    tracing::warn!("Failed to read post {:?}: {}", path, e);
                }
            }
        }

        posts.sort_by_key(|post| numeric_id(&post.id));

        tracing::debug!("Indexed {} posts in {:?}", posts.len(), self.posts_dir);
        posts
    }
}

/// Summary of one post source; no Markdown is rendered
pub fn summarize(id: &str, raw: &str) -> PostSummary {
    let meta = Metadata::extract(raw, &format!("Post {}", id));
    PostSummary {
        id: id.to_string(),
        title: meta.title,
        excerpt: excerpt(raw),
        date: today(),
        author: meta.author,
    }
}

/// Numeric sort key; ids that overflow u128 sort last
fn numeric_id(id: &str) -> (u128, usize) {
    (id.parse().unwrap_or(u128::MAX), id.len())
}
