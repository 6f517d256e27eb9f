use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

mod logs_config;
mod server_config;
mod storage_config;

pub use logs_config::LogsConfig;
pub use server_config::ServerConfig;
pub use storage_config::{StorageConfig, StorageDriver};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Please specify configuration file argument. Usage: -c <config_file>")]
    MissingArgument,
    #[error("Please specify path string for {0} argument.")]
    MissingValue(String),
    #[error(
        "Configuration file not found or invalid.\n\
        Please make sure that the configuration file exists and is a valid TOML file.\n\
        Expected file path: {0:?}"
    )]
    NotFound(PathBuf),
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logs: LogsConfig,
}

/// Directory relative paths in the configuration resolve against.
pub fn root_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

pub(crate) fn resolve_path(path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root_dir().join(path)
    }
}

fn parse_config_path<I>(mut args: I) -> Result<PathBuf, ConfigError>
where
    I: Iterator<Item = String>,
{
    while let Some(arg) = args.next() {
        if arg == "-c" || arg == "--config" {
            return args
                .next()
                .map(PathBuf::from)
                .ok_or(ConfigError::MissingValue(arg));
        }
    }
    Err(ConfigError::MissingArgument)
}

pub fn parse(content: &str) -> anyhow::Result<Config> {
    toml::from_str(content).with_context(|| {
        "Failed to parse configuration file.\n\
        Please check the file syntax is valid TOML syntax"
    })
}

pub fn load() -> anyhow::Result<Config> {
    let path = parse_config_path(std::env::args().skip(1))?;
    if !path.is_file() {
        return Err(ConfigError::NotFound(path).into());
    }
    let content = std::fs::read_to_string(&path).with_context(|| {
        format!(
            "Failed to read configuration file {:?}.\n\
            Please check the file path and file permissions",
            path
        )
    })?;
    parse(&content)
}
