//! Locating and reading the CLI's TOML configuration.
//!
//! A `--config` path always wins and must exist. Without one, the CLI looks
//! for `swimlane/config.toml` under the working directory and then for
//! `config.toml` in the platform config directory. The first file that
//! exists is used; when none does, [`AppConfig::default`] applies.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use swimlane::{SwimlaneError, config::AppConfig};

const LOCAL_CONFIG: &str = "swimlane/config.toml";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot parse `{path}`: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("configuration file `{0}` does not exist")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for SwimlaneError {
    fn from(err: ConfigError) -> Self {
        SwimlaneError::Config(err.to_string())
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    Explicit(PathBuf),
    Local(PathBuf),
    System(PathBuf),
}

impl ConfigSource {
    fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Local(path) | Self::System(path) => path,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let origin = match self {
            Self::Explicit(_) => "explicit",
            Self::Local(_) => "local",
            Self::System(_) => "system",
        };
        f.write_str(origin)
    }
}

/// Implicit search locations, most specific first.
fn candidates() -> Vec<ConfigSource> {
    let mut candidates = vec![ConfigSource::Local(PathBuf::from(LOCAL_CONFIG))];
    match ProjectDirs::from("com", "swimlane", "swimlane") {
        Some(dirs) => candidates.push(ConfigSource::System(
            dirs.config_dir().join(CONFIG_FILE_NAME),
        )),
        None => debug!("Could not determine platform-specific config directory"),
    }
    candidates
}

/// Picks the configuration file to read, if any.
///
/// An explicit path is returned as is, even when the file is missing, so
/// that reading it reports the error.
fn locate(explicit: Option<&Path>, candidates: Vec<ConfigSource>) -> Option<ConfigSource> {
    if let Some(path) = explicit {
        return Some(ConfigSource::Explicit(path.to_path_buf()));
    }
    candidates.into_iter().find(|candidate| {
        let found = candidate.path().is_file();
        if !found {
            debug!(path:% = candidate.path().display(); "Configuration file not found");
        }
        found
    })
}

/// Loads the configuration the CLI runs with.
///
/// # Errors
///
/// A [`SwimlaneError::Config`] when the explicit file is missing or any
/// selected file is not valid TOML for [`AppConfig`], and
/// [`SwimlaneError::Io`] when it cannot be read.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, SwimlaneError> {
    let explicit: Option<&Path> = explicit_path.as_ref().map(|path| path.as_ref());
    let Some(source) = locate(explicit, candidates()) else {
        debug!("No configuration file found, using default configuration");
        return Ok(AppConfig::default());
    };

    info!(path:% = source.path().display(), origin:% = &source; "Loading configuration");
    read_config(source.path())
}

fn read_config(path: &Path) -> Result<AppConfig, SwimlaneError> {
    if !path.is_file() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|err| {
        SwimlaneError::from(ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.message().to_string(),
        })
    })
}
