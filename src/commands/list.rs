//! List posts

use anyhow::Result;

use crate::content::PostIndex;
use crate::Site;

/// Print the post listing
pub fn run(site: &Site) -> Result<()> {
    let posts = PostIndex::new(site).list_posts();

    println!("{} - {}", site.config.title, site.config.description);
    println!("Posts ({}):", posts.len());
    for post in posts {
        println!("  {:>3}  {} - {}", post.id, post.title, post.author);
        println!("       {}", post.excerpt);
    }

    Ok(())
}
