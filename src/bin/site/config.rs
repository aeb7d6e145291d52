use std::env;
use std::path::PathBuf;

use spdlog::debug;

use blogsite::config::{read_config, Config};

use crate::CFG_FILE_NAME;

fn get_config_path() -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()));
    let cur_dir = env::current_dir().ok();
    let cfg_dir = dirs::config_dir();

    [exe_dir, cur_dir, cfg_dir].into_iter()
        .flatten()
        .map(|dir| dir.join(CFG_FILE_NAME))
        .find(|path| path.exists())
}

/// Without any site.toml the built-in site settings are used.
pub(crate) fn open_config(cfg_path: Option<PathBuf>) -> anyhow::Result<Config> {
    let Some(config_path) = cfg_path.or_else(get_config_path) else {
        debug!("No {} found. Using default settings", CFG_FILE_NAME);
        return Ok(Config::default());
    };

    debug!("Reading config from {}", config_path.display());
    let mut config = read_config(&config_path)?;

    if let Some(mut log) = config.log {
        if log.location.is_none() && !log.log_to_console {
            let location = dirs::cache_dir()
                .map(|dir| dir.join("blogsite").join("log").join("site.log"));
            log.location = location;
        }
        config.log = Some(log);
    }

    Ok(config)
}
