//! Layered configuration loading
//!
//! Sources, lowest priority first: built-in defaults, the config files
//! returned by [`config_paths`] that exist, an explicit `--config` file, and
//! finally `CMDRELAY_*` environment variables (`__` separates sections, e.g.
//! `CMDRELAY_SUBCOMMAND__EXECUTABLE_PATH`).

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use super::model::Config;

const APP_NAME: &str = "cmdrelay";
const ENV_PREFIX: &str = "CMDRELAY_";

/// Candidate config files, lowest priority first
pub fn config_paths() -> Vec<PathBuf> {
    let file_name = format!("{}.toml", APP_NAME);
    let dotfile = format!(".{}", file_name);

    [
        Some(Path::new("/etc").join(APP_NAME).join("config.toml")),
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join("config.toml")),
        dirs::home_dir().map(|home| home.join(&dotfile)),
        Some(PathBuf::from(&dotfile)),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Candidate config files that exist on disk
pub fn find_config_files() -> Vec<PathBuf> {
    config_paths().into_iter().filter(|p| p.is_file()).collect()
}

/// Load the effective configuration.
///
/// `override_path` is layered above every discovered file. Unlike the
/// discovered files it must exist: naming a missing file is an error.
pub fn load_config(override_path: Option<&str>) -> Result<Config> {
    let mut files = find_config_files();

    if let Some(path) = override_path.map(PathBuf::from) {
        if !path.is_file() {
            bail!("Config file not found: {}", path.display());
        }
        files.push(path);
    }

    layered(&files)
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("Failed to load configuration")
}

/// Defaults with each of `files` merged on top, in order
fn layered(files: &[PathBuf]) -> Figment {
    files.iter().fold(
        Figment::from(Serialized::defaults(Config::default())),
        |figment, path| {
            tracing::debug!("Loading config from: {}", path.display());
            figment.merge(Toml::file(path))
        },
    )
}
