//! Export posts as static JSON

use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::Path;

use crate::content::{PostIndex, PostLoader};
use crate::Site;

/// Export the site info, the listing and every configured post to the public directory
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let index = PostIndex::new(site);
    let loader = PostLoader::new(site);

    let posts_out = site.public_dir.join("posts");
    fs::create_dir_all(&posts_out)?;

    write_json(
        &site.public_dir.join("site.json"),
        &json!({
            "title": site.config.title,
            "description": site.config.description,
        }),
    )?;

    let summaries = index.list_posts();
    write_json(&site.public_dir.join("posts.json"), &summaries)?;
    tracing::info!("Indexed {} posts", summaries.len());

    let mut exported = 0;
    for id in &site.config.static_ids {
        match loader.get(id) {
            Some(post) => {
                write_json(&posts_out.join(format!("{}.json", id)), &*post)?;
                exported += 1;
            }
            None => tracing::warn!("Post {} not found, writing fallback metadata only", id),
        }
        write_json(
            &posts_out.join(format!("{}.meta.json", id)),
            &loader.page_metadata(id),
        )?;
    }

    let duration = start.elapsed();
    tracing::info!(
        "Exported {} of {} posts in {:.2}s",
        exported,
        site.config.static_ids.len(),
        duration.as_secs_f64()
    );

    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{PageMeta, Post, PostSummary};

    fn read<T: serde::de::DeserializeOwned>(path: &Path) -> T {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_generate_exports_posts() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(&site.posts_dir).unwrap();
        fs::write(site.posts_dir.join("page_2.md"), "# Two\nAuthor: Bob\n\n*hi*").unwrap();
        fs::write(site.posts_dir.join("page_1.md"), "# One\n\ntext").unwrap();

        run(&site).unwrap();

        let info: serde_json::Value = read(&site.public_dir.join("site.json"));
        assert_eq!(info["title"], site.config.title.as_str());
        assert_eq!(info["description"], site.config.description.as_str());

        let summaries: Vec<PostSummary> = read(&site.public_dir.join("posts.json"));
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, "1");

        let post: Post = read(&site.public_dir.join("posts/2.json"));
        assert_eq!(post.author, "Bob");
        assert!(post.content.contains(r#"<em class="markdown-em italic">hi</em>"#));

        let meta: PageMeta = read(&site.public_dir.join("posts/2.meta.json"));
        assert_eq!(meta.description, "A blog post by Bob about cybersecurity");

        // Ids without a source only get fallback metadata
        assert!(!site.public_dir.join("posts/3.json").exists());
        let missing: PageMeta = read(&site.public_dir.join("posts/3.meta.json"));
        assert_eq!(missing, PageMeta::not_found());
    }
}
