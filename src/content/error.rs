//! Post loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Why a post could not be loaded
#[derive(Error, Debug)]
pub enum PostError {
    #[error("Invalid post id: {0:?}")]
    InvalidId(String),

    #[error("Post not found: {0:?}")]
    NotFound(PathBuf),

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
