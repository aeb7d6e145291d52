use std::fs;

use anyhow::{Context, Result};
use colored::Colorize;
use spdlog::info;

use blogsite::config::Config;
use blogsite::feed::{feed_posts, AtomFeed, RssChannel, ATOM_FILE_NAME, RSS_FILE_NAME};
use blogsite::posts::PostList;
use blogsite::shortcode::FullUrlShortcode;

use crate::FullUrlArgs;

pub fn full_url_cmd(config: &Config, args: FullUrlArgs) -> Result<i32> {
    let shortcode = FullUrlShortcode::new(&config.site.host);
    println!("{}", shortcode.execute(&[("path", args.path.as_str())]));
    Ok(0)
}

/// Writes both the RSS and the Atom feed.
pub fn feed_cmd(config: &Config) -> Result<i32> {
    let posts = PostList::new(&config.paths.posts_dir()).load()?;
    let selected = feed_posts(&posts);

    let rss = RssChannel::new(&config.site).render(&selected)
        .context("Error rendering the RSS feed")?;
    let atom = AtomFeed::new(&config.site).render(&selected)
        .context("Error rendering the Atom feed")?;

    let output_dir = &config.paths.output_dir;
    fs::create_dir_all(output_dir)?;
    for (file_name, xml) in [(RSS_FILE_NAME, rss), (ATOM_FILE_NAME, atom)] {
        let feed_path = output_dir.join(file_name);
        fs::write(&feed_path, xml)?;
        info!("Feed with {} posts written to {}", selected.len(), feed_path.display());
        println!("{}", format!("Wrote {} posts to {}", selected.len(), feed_path.display()).yellow());
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use blogsite::config::Paths;

    use super::*;

    #[test]
    fn test_feed_cmd_writes_both_feeds() {
        let root = tempfile::tempdir().unwrap();
        let config = Config {
            paths: Paths {
                input_dir: root.path().join("input"),
                output_dir: root.path().join("output"),
            },
            ..Config::default()
        };
        let posts_dir = config.paths.posts_dir().join("2024");
        fs::create_dir_all(&posts_dir).unwrap();
        fs::write(posts_dir.join("hello.md"), "---\nTitle: Hello\nSlug: hello\nPublished: 2024-02-27\n---\nFirst post\n").unwrap();

        assert_eq!(feed_cmd(&config).unwrap(), 0);

        let rss = fs::read_to_string(root.path().join("output").join(RSS_FILE_NAME)).unwrap();
        assert!(rss.contains("<title>Hello</title>"));
        let atom = fs::read_to_string(root.path().join("output").join(ATOM_FILE_NAME)).unwrap();
        assert!(atom.contains("<entry><title>Hello</title>"));
    }
}
