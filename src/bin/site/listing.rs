use anyhow::Result;
use colored::Colorize;

use blogsite::config::Config;
use blogsite::document::LinkGenerator;
use blogsite::posts::{group_by_tag, PostList};

use crate::PostsArgs;

pub fn posts_cmd(config: &Config, args: PostsArgs) -> Result<i32> {
    let posts = PostList::new(&config.paths.posts_dir()).load()?;
    let links = LinkGenerator::new(&config.site);

    let mut posts: Vec<_> = posts.iter()
        .filter(|p| args.drafts || !p.draft)
        .collect();
    posts.sort_by(|a, b| b.published.cmp(&a.published));

    for post in posts {
        match post.as_post(&links) {
            Ok(view) => {
                let marker = if view.draft { " [draft]".yellow().to_string() } else { String::new() };
                println!("{}  {}{}", view.date, view.title.bold(), marker);
                println!("    {}", view.link);
            }
            Err(e) => eprintln!("{}", format!("{}: {}", post.file_name.display(), e).red()),
        }
    }

    Ok(0)
}

pub fn tags_cmd(config: &Config) -> Result<i32> {
    let posts = PostList::new(&config.paths.posts_dir()).load()?;
    let links = LinkGenerator::new(&config.site);

    for group in group_by_tag(&posts) {
        let tag = group.as_tag(&links);
        if !tag.has_posts {
            continue;
        }
        println!("{} ({})  {}", tag.title.bold(), tag.count, tag.link);
    }

    Ok(0)
}
