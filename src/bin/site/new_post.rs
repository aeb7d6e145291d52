use std::path::Path;

use anyhow::Result;
use chrono::Local;
use colored::Colorize;

use blogsite::scaffold::{create_post, NewPostError};

use crate::NewPostArgs;

/// Returns -1 when a post with the same slug exists.
pub fn new_post_cmd(args: NewPostArgs, root: &Path) -> Result<i32> {
    let now = Local::now().naive_local();

    match create_post(root, &args.title, &args.tags, args.force, now) {
        Ok(created) => {
            println!("{}", format!("Created new blog post at {}", created.relative_path).yellow());
            Ok(0)
        }
        Err(err @ NewPostError::AlreadyExists(_)) => {
            println!("{}", err.to_string().red());
            Ok(-1)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::Datelike;

    use super::*;

    fn args(title: &str, force: bool) -> NewPostArgs {
        NewPostArgs {
            title: title.to_string(),
            tags: vec!["rust".to_string()],
            force,
        }
    }

    #[test]
    fn test_exit_codes() {
        let root = tempfile::tempdir().unwrap();
        let year = Local::now().year().to_string();
        let year_dir = root.path().join("input").join("posts").join(&year);
        fs::create_dir_all(&year_dir).unwrap();

        assert_eq!(new_post_cmd(args("Hello World", false), root.path()).unwrap(), 0);
        let post_path = year_dir.join("hello-world.md");
        let content = fs::read_to_string(&post_path).unwrap();
        assert!(content.contains("Title: Hello World\n"));

        assert_eq!(new_post_cmd(args("Hello World", false), root.path()).unwrap(), -1);
        assert_eq!(new_post_cmd(args("Hello World", true), root.path()).unwrap(), -1);
        assert_eq!(fs::read_to_string(&post_path).unwrap(), content);
        assert_eq!(fs::read_dir(&year_dir).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_year_directory_fails() {
        let root = tempfile::tempdir().unwrap();

        let err = new_post_cmd(args("Hello World", false), root.path()).unwrap_err();
        let io_err = err.downcast_ref::<NewPostError>();
        assert!(matches!(io_err, Some(NewPostError::Io(_))), "{:?}", err);
    }
}
