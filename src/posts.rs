use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use spdlog::{debug, warn};
use walkdir::WalkDir;

use crate::document::{PostDocument, TagGroup};

pub struct PostList {
    pub root_dir: PathBuf,
}

impl PostList {
    pub fn new(root_dir: &Path) -> Self {
        PostList { root_dir: root_dir.to_path_buf() }
    }

    /// Every markdown file below the root, sorted by path.
    pub fn retrieve_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut posts = vec![];
        for entry in WalkDir::new(&self.root_dir).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().map(|e| e == "md").unwrap_or(false) {
                posts.push(entry.into_path());
            }
        }
        Ok(posts)
    }

    /// Files that fail to parse are skipped.
    pub fn load(&self) -> io::Result<Vec<PostDocument>> {
        let mut posts = vec![];
        for file in self.retrieve_files()? {
            match PostDocument::from_file(&file) {
                Ok(post) => {
                    debug!("Loaded post {}", post);
                    posts.push(post);
                }
                Err(e) => warn!("Skipping {}: {}", file.display(), e),
            }
        }
        Ok(posts)
    }
}

/// Groups posts per tag, ordered by tag name.
pub fn group_by_tag(posts: &[PostDocument]) -> Vec<TagGroup<'_>> {
    let mut groups: BTreeMap<&str, Vec<&PostDocument>> = BTreeMap::new();
    for post in posts {
        for tag in &post.tags {
            groups.entry(tag.as_str()).or_default().push(post);
        }
    }

    groups.into_iter()
        .map(|(tag, posts)| TagGroup { tag: tag.to_string(), posts })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_post(dir: &Path, name: &str, title: &str, tags: &[&str], draft: bool) {
        let mut content = format!("---\nTitle: {}\nSlug: {}\nPublished: 2024-01-02\nDraft: {}\n", title, name, draft);
        if !tags.is_empty() {
            content.push_str("Tags:\n");
            for tag in tags {
                content.push_str(&format!("- {}\n", tag));
            }
        }
        content.push_str("---\n\nBody\n");
        fs::write(dir.join(format!("{}.md", name)), content).unwrap();
    }

    #[test]
    fn test_load() {
        let root = tempfile::tempdir().unwrap();
        let y2023 = root.path().join("2023");
        let y2024 = root.path().join("2024");
        fs::create_dir_all(&y2023).unwrap();
        fs::create_dir_all(&y2024).unwrap();

        write_post(&y2023, "first", "First", &["rust"], false);
        write_post(&y2024, "second", "Second", &["rust", "C#"], true);
        fs::write(y2024.join("broken.md"), "no front matter").unwrap();
        fs::write(y2024.join("image.png"), "png").unwrap();

        let list = PostList::new(root.path());
        assert_eq!(list.retrieve_files().unwrap().len(), 3);

        let posts = list.load().unwrap();
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
        assert!(posts[1].draft);
    }

    #[test]
    fn test_missing_root() {
        let root = tempfile::tempdir().unwrap();
        let list = PostList::new(&root.path().join("nope"));
        assert!(list.retrieve_files().is_err());
    }

    #[test]
    fn test_group_by_tag() {
        let root = tempfile::tempdir().unwrap();
        write_post(root.path(), "a", "A", &["rust", "C#"], false);
        write_post(root.path(), "b", "B", &["rust"], false);

        let posts = PostList::new(root.path()).load().unwrap();
        let groups = group_by_tag(&posts);
        let summary: Vec<(&str, usize)> = groups.iter().map(|g| (g.tag.as_str(), g.posts.len())).collect();
        assert_eq!(summary, [("C#", 1), ("rust", 2)]);
    }
}
