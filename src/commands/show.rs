//! Render a single post

use anyhow::Result;

use crate::content::PostLoader;
use crate::Site;

/// Print a post's sanitized HTML, or its page metadata with `meta`
pub fn run(site: &Site, id: &str, meta: bool) -> Result<()> {
    let loader = PostLoader::new(site);

    if meta {
        println!("{}", serde_json::to_string_pretty(&loader.page_metadata(id))?);
        return Ok(());
    }

    match loader.get(id) {
        Some(post) => {
            println!("{} (by {}, {})", post.title, post.author, post.date);
            println!();
            println!("{}", post.content);
            Ok(())
        }
        None => anyhow::bail!("Post not found: {}", id),
    }
}
