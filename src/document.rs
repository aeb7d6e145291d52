use std::fmt::{self, Display, Formatter};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{fs, io};

use chrono::{Datelike, NaiveDateTime};
use thiserror::Error;

use crate::config::Site;
use crate::front_matter;
use crate::slug::normalize_file_name;
use crate::text_utils::{format_long_date, parse_published};

#[derive(Debug, Error, PartialEq)]
pub enum DocumentError {
    #[error("Blog post is missing published date.")]
    MissingPublished,
    #[error("Blog post is missing slug.")]
    MissingSlug,
}

/// A post read back from `input/posts`.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDocument {
    pub file_name: PathBuf,
    pub title: String,
    pub slug: Option<String>,
    pub published: Option<NaiveDateTime>,
    pub draft: bool,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub body: String,
}

impl Display for PostDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "title={}, slug={}, published={}, draft={}, tags={:?}",
               self.title,
               self.slug.as_deref().unwrap_or(""),
               self.published.map(|p| p.to_string()).unwrap_or_default(),
               self.draft,
               self.tags,
        )
    }
}

/// Spells out `#` and `+` so tags such as `C#` survive as path segments.
pub fn tag_name(tag: &str) -> String {
    tag.replace('#', "sharp").replace('+', "plus")
}

/// First paragraph of the body, skipping headings.
fn extract_excerpt(body: &str) -> String {
    let mut lines = vec![];
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            if lines.is_empty() {
                continue;
            }
            break;
        }
        if lines.is_empty() && line.starts_with('#') {
            continue;
        }
        lines.push(line);
    }
    lines.join("\n")
}

impl PostDocument {
    pub fn from_file(file_name: &Path) -> io::Result<PostDocument> {
        let content = fs::read_to_string(file_name)?;
        Self::from_string(file_name, &content)
    }

    pub fn from_string(file_name: &Path, content: &str) -> io::Result<PostDocument> {
        let invalid = |msg: String| io::Error::new(ErrorKind::InvalidData, format!("{} - file={}", msg, file_name.display()));

        let (fm, body) = front_matter::parse(content).map_err(|e| invalid(e.to_string()))?;

        let published = match fm.get_text("Published") {
            Some(p) if !p.trim().is_empty() => Some(parse_published(p).map_err(invalid)?),
            _ => None,
        };

        let excerpt = match fm.get_text("Excerpt") {
            Some(excerpt) if !excerpt.is_empty() => excerpt.to_string(),
            _ => extract_excerpt(body),
        };

        Ok(PostDocument {
            file_name: file_name.to_path_buf(),
            title: fm.get_text("Title").unwrap_or_default().to_string(),
            slug: fm.get_text("Slug").map(|s| s.to_string()),
            published,
            draft: fm.get_bool("Draft", false),
            tags: fm.get("Tags").map(|t| t.to_list()).unwrap_or_default(),
            excerpt,
            body: body.to_string(),
        })
    }

    pub fn published(&self) -> Result<NaiveDateTime, DocumentError> {
        self.published.ok_or(DocumentError::MissingPublished)
    }

    pub fn slug(&self) -> Result<&str, DocumentError> {
        match self.slug.as_deref() {
            Some(slug) if !slug.trim().is_empty() => Ok(slug),
            _ => Err(DocumentError::MissingSlug),
        }
    }

    /// `{year}/{month}/{slug}/index.html`
    pub fn blog_post_path(&self) -> Result<PathBuf, DocumentError> {
        let date = self.published()?;
        let slug = self.slug()?;
        Ok(PathBuf::from(format!("{}/{:02}/{}/index.html", date.year(), date.month(), slug)))
    }

    pub fn as_post(&self, links: &LinkGenerator) -> Result<PostView, DocumentError> {
        let path = self.blog_post_path()?;
        let date = self.published()?;
        Ok(PostView {
            link: links.link(&path),
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            draft: self.draft,
            date: format_long_date(&date),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostView {
    pub link: String,
    pub title: String,
    pub excerpt: String,
    pub draft: bool,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagView {
    pub link: String,
    pub title: String,
    pub has_posts: bool,
    pub count: usize,
}

/// All posts sharing a tag.
pub struct TagGroup<'a> {
    pub tag: String,
    pub posts: Vec<&'a PostDocument>,
}

impl<'a> TagGroup<'a> {
    pub fn path(&self) -> PathBuf {
        PathBuf::from("tags").join(normalize_file_name(&tag_name(&self.tag))).join("index.html")
    }

    /// Drafts don't count.
    pub fn as_tag(&self, links: &LinkGenerator) -> TagView {
        let count = self.posts.iter().filter(|p| !p.draft).count();
        TagView {
            link: links.link(&self.path()),
            title: self.tag.clone(),
            has_posts: count > 0,
            count,
        }
    }
}

/// Site relative links, `index.html` hidden.
pub struct LinkGenerator {
    pub lowercase: bool,
}

impl LinkGenerator {
    pub fn new(site: &Site) -> Self {
        LinkGenerator { lowercase: site.links_lowercase }
    }

    pub fn link(&self, path: &Path) -> String {
        let mut segments: Vec<String> = path.iter()
            .map(|s| s.to_string_lossy().to_string())
            .collect();
        if segments.last().map(|s| s == "index.html").unwrap_or(false) {
            segments.pop();
        }

        let link = format!("/{}", segments.join("/"));
        if self.lowercase {
            link.to_lowercase()
        } else {
            link
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    const POST_DATA: &str = "---
Title: Writing a Blog Tool
Slug: Writing-a-blog-tool
Published: 2024-02-27
Tags:
- Rust
- C#
---

# Intro

Small tools are fun
to write.

And the rest of the post.
";

    fn post() -> PostDocument {
        PostDocument::from_string(Path::new("input/posts/2024/writing.md"), POST_DATA).unwrap()
    }

    #[test]
    fn test_from_string() {
        let post = post();
        assert_eq!(post.title, "Writing a Blog Tool");
        assert_eq!(post.slug.as_deref(), Some("Writing-a-blog-tool"));
        assert_eq!(post.published, NaiveDate::from_ymd_opt(2024, 2, 27).unwrap().and_hms_opt(0, 0, 0));
        assert!(!post.draft);
        assert_eq!(post.tags, ["Rust", "C#"]);
        assert_eq!(post.excerpt, "Small tools are fun\nto write.");
        println!("{}", post);
    }

    #[test]
    fn test_invalid_published() {
        let err = PostDocument::from_string(Path::new("x.md"), "---\nPublished: soon\n---\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("file=x.md"));
    }

    #[test]
    fn test_tag_name() {
        assert_eq!(tag_name("C#"), "Csharp");
        assert_eq!(tag_name("C++"), "Cplusplus");
        assert_eq!(tag_name("rust"), "rust");
    }

    #[test]
    fn test_blog_post_path() {
        assert_eq!(post().blog_post_path().unwrap(), PathBuf::from("2024/02/Writing-a-blog-tool/index.html"));

        let mut missing_date = post();
        missing_date.published = None;
        assert_eq!(missing_date.blog_post_path(), Err(DocumentError::MissingPublished));
        assert_eq!(DocumentError::MissingPublished.to_string(), "Blog post is missing published date.");

        let mut missing_slug = post();
        missing_slug.slug = Some("  ".to_string());
        assert_eq!(missing_slug.blog_post_path(), Err(DocumentError::MissingSlug));
    }

    #[test]
    fn test_as_post() {
        let links = LinkGenerator { lowercase: true };
        let view = post().as_post(&links).unwrap();
        assert_eq!(view, PostView {
            link: "/2024/02/writing-a-blog-tool".to_string(),
            title: "Writing a Blog Tool".to_string(),
            excerpt: "Small tools are fun\nto write.".to_string(),
            draft: false,
            date: "Tuesday, February 27, 2024".to_string(),
        });

        let links = LinkGenerator { lowercase: false };
        assert_eq!(post().as_post(&links).unwrap().link, "/2024/02/Writing-a-blog-tool");
    }

    #[test]
    fn test_as_tag() {
        let published = post();
        let mut draft = post();
        draft.draft = true;

        let links = LinkGenerator { lowercase: true };
        let group = TagGroup { tag: "C#".to_string(), posts: vec![&published, &draft] };
        assert_eq!(group.as_tag(&links), TagView {
            link: "/tags/csharp".to_string(),
            title: "C#".to_string(),
            has_posts: true,
            count: 1,
        });

        let group = TagGroup { tag: "C++".to_string(), posts: vec![&draft] };
        let view = group.as_tag(&links);
        assert_eq!(view.link, "/tags/cplusplus");
        assert!(!view.has_posts);
        assert_eq!(view.count, 0);
    }
}
