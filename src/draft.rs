use std::fmt::Write;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDateTime};

use crate::slug::slugify;
use crate::text_utils::format_published;

pub const BODY_PLACEHOLDER: &str = "_To be written_";

/// A new post, alive between the command line and the file written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub tags: Vec<String>,
    pub slug: String,
    pub published_at: NaiveDateTime,
    pub is_draft: bool,
}

impl PostDraft {
    pub fn new(title: &str, tags: &[String], published_at: NaiveDateTime) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            tags: tags.to_vec(),
            slug: slugify(title),
            published_at,
            is_draft: true,
        }
    }

    /// `input/posts/{year}/{slug}.md`, relative to the site root.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from("input")
            .join("posts")
            .join(self.published_at.year().to_string())
            .join(format!("{}.md", self.slug))
    }

    /// Renders the front matter document:
    /// ```text
    /// ---
    /// Title: Hello World
    /// Slug: hello-world
    /// Published: 2024-02-27
    /// Draft: True
    /// Tags:
    /// - rust
    /// ---
    ///
    /// _To be written_
    /// ```
    pub fn render(&self) -> String {
        let mut buf = String::new();

        let _ = writeln!(&mut buf, "---");
        let _ = writeln!(&mut buf, "Title: {}", self.title);
        let _ = writeln!(&mut buf, "Slug: {}", self.slug);
        let _ = writeln!(&mut buf, "Published: {}", format_published(&self.published_at));
        let _ = writeln!(&mut buf, "Draft: {}", if self.is_draft { "True" } else { "False" });
        if !self.tags.is_empty() {
            let _ = writeln!(&mut buf, "Tags:");
            for tag in &self.tags {
                let _ = writeln!(&mut buf, "- {}", tag);
            }
        }
        let _ = writeln!(&mut buf, "---");
        let _ = writeln!(&mut buf);
        let _ = writeln!(&mut buf, "{}", BODY_PLACEHOLDER);
        buf
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn published() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 27).unwrap().and_hms_opt(6, 20, 53).unwrap()
    }

    #[test]
    fn test_render_without_tags() {
        let draft = PostDraft::new("Hello World", &[], published());
        assert_eq!(draft.slug, "hello-world");
        assert!(draft.is_draft);
        assert_eq!(draft.render(), "---
Title: Hello World
Slug: hello-world
Published: 2024-02-27
Draft: True
---

_To be written_
");
    }

    #[test]
    fn test_render_with_tags() {
        let tags = vec!["Rust".to_string(), "C#".to_string()];
        let draft = PostDraft::new("Porting C# to Rust", &tags, published());
        assert_eq!(draft.render(), "---
Title: Porting C# to Rust
Slug: porting-c-to-rust
Published: 2024-02-27
Draft: True
Tags:
- Rust
- C#
---

_To be written_
");
    }

    #[test]
    fn test_relative_path() {
        let draft = PostDraft::new("Hello World", &[], published());
        assert_eq!(draft.relative_path(), PathBuf::from("input/posts/2024/hello-world.md"));
    }
}
