use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use chrono::{Datelike, Utc};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Site {
    pub host: String,
    pub title: String,
    pub description: String,
    pub author: Option<String>,
    pub copyright: Option<String>,
    pub links_lowercase: bool,
}

impl Default for Site {
    fn default() -> Self {
        Site {
            host: "patriksvensson.se".to_string(),
            title: "Patrik Svensson".to_string(),
            description: "Patrik Svensson's blog".to_string(),
            author: Some("Patrik Svensson".to_string()),
            copyright: None,
            links_lowercase: true,
        }
    }
}

impl Site {
    /// Falls back to the real name of the OS user when no author is configured.
    pub fn author(&self) -> String {
        if let Some(ref author) = self.author {
            return author.clone();
        }

        let name = whoami::realname();
        if name.is_empty() {
            return whoami::username();
        }
        name
    }

    pub fn copyright(&self) -> String {
        match self.copyright {
            Some(ref copyright) => copyright.clone(),
            None => Utc::now().year().to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Paths {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Paths {
    fn default() -> Self {
        Paths {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("public"),
        }
    }
}

impl Paths {
    pub fn posts_dir(&self) -> PathBuf {
        self.input_dir.join("posts")
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Log {
    pub level: LogLevel,
    pub log_to_console: bool,
    pub location: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Copy, Clone, PartialEq)]
pub enum LogLevel {
    Critical = 0,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub site: Site,
    pub paths: Paths,
    pub log: Option<Log>,
}

fn parse_path(path: PathBuf) -> io::Result<PathBuf> {
    if !path.starts_with("${exe_dir}") {
        return Ok(path);
    }

    let cur_exe = env::current_exe()?;
    let exe_dir = cur_exe.parent().unwrap_or(Path::new("."));
    let rest = path.strip_prefix("${exe_dir}").unwrap_or(&path);
    Ok(exe_dir.join(rest))
}

pub fn parse_config(cfg_content: &str) -> io::Result<Config> {
    let mut cfg: Config = match toml::from_str::<Config>(cfg_content) {
        Ok(cfg) => cfg,
        Err(e) => return Err(io::Error::new(
            ErrorKind::InvalidData, format!("Error parsing configuration file: {}", e))),
    };

    cfg.paths = Paths {
        input_dir: parse_path(cfg.paths.input_dir)?,
        output_dir: parse_path(cfg.paths.output_dir)?,
    };

    Ok(cfg)
}

pub fn read_config(cfg_path: &Path) -> io::Result<Config> {
    let cfg_content = match fs::read_to_string(cfg_path) {
        Ok(content) => content,
        Err(e) => return Err(io::Error::new(e.kind(), format!("Error opening configuration file {}: {}", cfg_path.display(), e))),
    };

    parse_config(&cfg_content)
}
