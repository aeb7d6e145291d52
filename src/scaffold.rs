use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use spdlog::{debug, info, warn};
use thiserror::Error;

use crate::draft::PostDraft;

#[derive(Debug, Error)]
pub enum NewPostError {
    #[error("No title specified.")]
    NoTitle,
    #[error("Tags cannot be empty.")]
    BlankTag,
    #[error("A blog post with the same slug already exist.")]
    AlreadyExists(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Where a draft ended up, both as written and as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedPost {
    pub absolute_path: PathBuf,
    pub relative_path: String,
    pub slug: String,
}

/// Rejects blank titles. Used as the clap value parser of `new-post`.
pub fn validate_title(title: &str) -> Result<String, NewPostError> {
    if title.trim().is_empty() {
        return Err(NewPostError::NoTitle);
    }
    Ok(title.to_string())
}

/// Rejects blank tags, which would not read back as a tag.
pub fn validate_tag(tag: &str) -> Result<String, NewPostError> {
    if tag.trim().is_empty() {
        return Err(NewPostError::BlankTag);
    }
    Ok(tag.to_string())
}

/// Writes a new draft under `root`. An existing post is never overwritten,
/// even with `force`, and the year directory must already exist.
pub fn create_post(
    root: &Path,
    title: &str,
    tags: &[String],
    force: bool,
    now: NaiveDateTime,
) -> Result<CreatedPost, NewPostError> {
    let title = validate_title(title)?;
    for tag in tags {
        validate_tag(tag)?;
    }
    let draft = PostDraft::new(&title, tags, now);

    let relative = draft.relative_path();
    let absolute_path = root.join(&relative);
    debug!("New post {} resolved to {}", draft.slug, absolute_path.display());

    if force {
        warn!("--force does not overwrite existing posts");
    }

    if absolute_path.exists() {
        return Err(NewPostError::AlreadyExists(absolute_path));
    }

    fs::write(&absolute_path, draft.render())?;
    info!("Wrote draft {}", absolute_path.display());

    Ok(CreatedPost {
        absolute_path,
        relative_path: format!("./{}", relative.to_string_lossy().replace('\\', "/")),
        slug: draft.slug,
    })
}
