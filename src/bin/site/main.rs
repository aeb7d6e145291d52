use std::path::PathBuf;
use std::{env, process};

use anyhow::Result;
use clap::{Parser, Subcommand};
use spdlog::{debug, warn};

use blogsite::logger::configure_logger;
use blogsite::scaffold::{validate_tag, validate_title};

use crate::config::open_config;
use crate::listing::{posts_cmd, tags_cmd};
use crate::new_post::new_post_cmd;
use crate::publish::{feed_cmd, full_url_cmd};

mod config;
mod listing;
mod new_post;
mod publish;

const CFG_FILE_NAME: &str = "site.toml";

#[derive(Parser, Debug)]
#[command(version, about = "Authoring tools for the blog", long_about = None)]
struct Cli {
    /// Config path. Defaults to site.toml next to the executable, in the
    /// current directory or in the user config directory
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Creates a new blog post draft
    NewPost(NewPostArgs),
    /// Prints the absolute URL of a path on the site
    FullUrl(FullUrlArgs),
    /// Lists the posts of the blog
    Posts(PostsArgs),
    /// Lists the tags of the blog with their number of published posts
    Tags,
    /// Writes the RSS feed of published posts to the output directory
    Feed,
}

#[derive(Parser, Debug)]
struct NewPostArgs {
    /// The title of the blog post
    #[arg(value_name = "TITLE", value_parser = validate_title)]
    title: String,

    /// Adds a tag to the blog post
    #[arg(short, long = "tag", value_name = "TAG", value_parser = validate_tag)]
    tags: Vec<String>,

    /// Overwrites the blog post if it already exist
    #[arg(short, long)]
    force: bool,
}

#[derive(Parser, Debug)]
struct FullUrlArgs {
    /// Path on the site, e.g. /posts/foo
    path: String,
}

#[derive(Parser, Debug)]
struct PostsArgs {
    /// Includes drafts
    #[arg(short, long)]
    drafts: bool,
}

fn run(cli: Cli) -> Result<i32> {
    let config = open_config(cli.config.map(PathBuf::from))?;

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }
    debug!("Running {:?}", cli.command);

    match cli.command {
        Command::NewPost(args) => new_post_cmd(args, &env::current_dir()?),
        Command::FullUrl(args) => full_url_cmd(&config, args),
        Command::Posts(args) => posts_cmd(&config, args),
        Command::Tags => tags_cmd(&config),
        Command::Feed => feed_cmd(&config),
    }
}

fn main() -> Result<()> {
    let code = run(Cli::parse())?;
    if code != 0 {
        process::exit(code);
    }
    Ok(())
}
