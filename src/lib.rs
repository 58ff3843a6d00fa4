//! ordinary-posts: the post pipeline behind a CTF team website
//!
//! Posts are plain Markdown files named `page_<id>.md`. This crate extracts
//! their title and author, renders them to highlighted and sanitized HTML,
//! lists them, and serves or exports the results.

pub mod cache;
pub mod commands;
pub mod config;
pub mod content;
pub mod server;

use anyhow::Result;
use std::path::Path;

/// The site whose posts are being processed
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding the `page_<id>.md` sources
    pub posts_dir: std::path::PathBuf,
    /// Public (output) directory
    pub public_dir: std::path::PathBuf,
}

impl Site {
    /// Create a new site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            public_dir,
        })
    }

    /// Export posts to the public directory
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, author: Option<&str>) -> Result<()> {
        commands::new::create_post(self, title, author).map(|_| ())
    }
}
