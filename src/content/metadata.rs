//! Title and author extraction for post sources
//!
//! Post files carry no front-matter. By convention the first `# ` heading is
//! the title and an `Author:` line right below it names the author:
//!
//! ```text
//! # Breaking the Vault
//! Author: Jane
//!
//! Body text...
//! ```

/// Author used when a post does not name one
pub const DEFAULT_AUTHOR: &str = "The Ordinary Player";

/// Maximum number of characters kept in a listing excerpt
pub const EXCERPT_LENGTH: usize = 150;

/// Number of body lines an excerpt is built from
const EXCERPT_LINES: usize = 3;

/// Metadata recovered from a post source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub author: String,
    /// Index of the first line that belongs to the body
    pub body_start_line: usize,
}

impl Metadata {
    /// Scan `raw` for the title and author lines.
    ///
    /// The author line directly below the title wins. Without one, the first
    /// `Author:` line anywhere in the document is used, and failing that
    /// [`DEFAULT_AUTHOR`]. A source without a title line gets
    /// `fallback_title` and a body starting at line 0.
    ///
    /// Author lines are matched case-insensitively after trimming, including
    /// the one right below the title, so `author: jane` there counts too.
    pub fn extract(raw: &str, fallback_title: &str) -> Self {
        let lines: Vec<&str> = raw.lines().collect();

        let mut title = None;
        let mut author = None;
        let mut body_start_line = 0;

        for (i, line) in lines.iter().enumerate() {
            if let Some(heading) = title_value(line) {
                title = Some(heading.to_string());
                match lines.get(i + 1).and_then(|next| author_value(next)) {
                    Some(name) => {
                        author = Some(name.to_string());
                        body_start_line = i + 2;
                    }
                    None => body_start_line = i + 1,
                }
                break;
            }

            if author.is_none() {
                author = author_value(line).map(str::to_string);
            }
        }

        // Author lines below the body start still count when nothing else did
        if author.is_none() {
            author = lines
                .iter()
                .skip(body_start_line)
                .find_map(|line| author_value(line))
                .map(str::to_string);
        }

        Self {
            title: title.unwrap_or_else(|| fallback_title.to_string()),
            author: author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
            body_start_line,
        }
    }

    /// The part of `raw` after the title and author lines
    pub fn body(&self, raw: &str) -> String {
        raw.lines()
            .skip(self.body_start_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Build a listing excerpt from a post source.
///
/// Title and author lines are dropped wherever they appear, the first three
/// remaining lines are joined with spaces and cut to [`EXCERPT_LENGTH`]
/// characters. The ellipsis is always appended, even to short excerpts.
pub fn excerpt(raw: &str) -> String {
    let text = raw
        .lines()
        .filter(|line| title_value(line).is_none() && author_value(line).is_none())
        .take(EXCERPT_LINES)
        .collect::<Vec<_>>()
        .join(" ");

    let mut excerpt: String = text.chars().take(EXCERPT_LENGTH).collect();
    excerpt.push_str("...");
    excerpt
}

/// Heading text of a `# ` title line
fn title_value(line: &str) -> Option<&str> {
    line.strip_prefix("# ").map(str::trim)
}

/// Name on an `Author:` line, matched case-insensitively
fn author_value(line: &str) -> Option<&str> {
    const PREFIX: &str = "author:";

    let line = line.trim();
    let head = line.get(..PREFIX.len())?;
    if head.eq_ignore_ascii_case(PREFIX) {
        Some(line[PREFIX.len()..].trim())
    } else {
        None
    }
}
