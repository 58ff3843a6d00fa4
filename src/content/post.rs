//! Post models

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A fully rendered blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Numeric identifier taken from the file name
    pub id: String,

    /// Post title
    pub title: String,

    /// Post author
    pub author: String,

    /// Sanitized HTML content
    pub content: String,

    /// Date the post was rendered (YYYY-MM-DD)
    pub date: String,
}

/// A post as shown in the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    /// Start of the body text, always ending in "..."
    pub excerpt: String,
    pub date: String,
    pub author: String,
}

/// Title and description for a post page's `<head>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

impl PageMeta {
    /// Metadata for an existing post
    pub fn for_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            description: format!("A blog post by {} about cybersecurity", post.author),
        }
    }

    /// Metadata for an id with no post behind it
    pub fn not_found() -> Self {
        Self {
            title: "Post Not Found".to_string(),
            description: "The requested post could not be found".to_string(),
        }
    }
}

/// Today's date in ISO format. Posts carry no date of their own.
pub fn today() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_meta_for_post() {
        let post = Post {
            id: "1".to_string(),
            title: "Pwn 101".to_string(),
            author: "Jane".to_string(),
            content: String::new(),
            date: today(),
        };
        let meta = PageMeta::for_post(&post);
        assert_eq!(meta.title, "Pwn 101");
        assert_eq!(meta.description, "A blog post by Jane about cybersecurity");
    }

    #[test]
    fn test_today_is_iso_date() {
        let date = today();
        assert!(chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_ok());
        assert_eq!(date.len(), 10);
    }

    #[test]
    fn test_summary_serializes_field_names() {
        let summary = PostSummary {
            id: "3".to_string(),
            title: "T".to_string(),
            excerpt: "...".to_string(),
            date: "2024-01-15".to_string(),
            author: "A".to_string(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["id"], "3");
        assert_eq!(json["excerpt"], "...");
        assert_eq!(json["date"], "2024-01-15");
    }
}
