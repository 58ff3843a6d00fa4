//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::content::{index, loader};
use crate::Site;

/// Create `page_<n>.md` for the next free id and return its path
pub fn create_post(site: &Site, title: &str, author: Option<&str>) -> Result<PathBuf> {
    fs::create_dir_all(&site.posts_dir)?;

    let id = next_id(site);
    let file_path = loader::post_path(&site.posts_dir, &id.to_string());

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let mut content = format!("# {}\n", title.trim());
    if let Some(author) = author {
        content.push_str(&format!("Author: {}\n", author.trim()));
    }
    content.push('\n');

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(file_path)
}

/// One past the highest id in the posts directory
fn next_id(site: &Site) -> u64 {
    WalkDir::new(&site.posts_dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter_map(|entry| {
            entry
                .file_name()
                .to_str()
                .and_then(index::post_id)
                .and_then(|id| id.parse::<u64>().ok())
        })
        .max()
        .map_or(1, |max| max + 1)
}
