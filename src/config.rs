use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "dinkur-desktop.json";
const EMBEDDED_DEFAULTS: &str = "(embedded defaults)";
const DEFAULT_GRPC_ADDRESS: &str = "localhost:59122";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("decode config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("encode config: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("user config directory not found")]
    NoConfigDir,
}

impl ConfigError {
    fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    #[default]
    Sqlite,
    Grpc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogColor {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    #[serde(skip)]
    file_used: Option<PathBuf>,
    pub exit_on_window_close: bool,
    pub client: ClientType,
    pub sqlite: Sqlite,
    pub grpc: Grpc,
    pub daemon: Daemon,
    pub log: Log,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sqlite {
    /// Database file holding the tracked entries.
    pub path: PathBuf,
    /// Create missing parent directories of `path`.
    pub mkdir: bool,
}

impl Default for Sqlite {
    fn default() -> Self {
        Self {
            path: default_sqlite_path(),
            mkdir: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Grpc {
    /// Where the daemon's API is reached.
    pub address: String,
}

impl Default for Grpc {
    fn default() -> Self {
        Self {
            address: DEFAULT_GRPC_ADDRESS.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Daemon {
    pub enabled: bool,
    /// Where the daemon's API is served. `0.0.0.0` accepts any peer.
    pub bind_address: String,
}

impl Default for Daemon {
    fn default() -> Self {
        Self {
            enabled: false,
            bind_address: DEFAULT_GRPC_ADDRESS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Log {
    pub format: LogFormat,
    pub level: LogLevel,
    pub color: LogColor,
}

impl Config {
    /// The file this config was loaded from, for log output.
    pub fn file_used(&self) -> String {
        self.file_used
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| EMBEDDED_DEFAULTS.to_string())
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Encode)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push(CONFIG_FILE_NAME);
    Some(path)
}

/// Reads the config from the default location. A missing file yields the
/// defaults.
pub fn read_auto() -> Result<Config, ConfigError> {
    let Some(path) = config_path() else {
        return Ok(Config::default());
    };
    match read_file(&path) {
        Err(err) if err.is_not_found() => Ok(Config::default()),
        other => other,
    }
}

/// Reads the config from `path`, which must exist. Keys missing from the
/// file keep their defaults.
pub fn read_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: Config = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.file_used = Some(path.to_path_buf());
    Ok(config)
}

fn default_sqlite_path() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_default();
    path.push("dinkur");
    path.push("dinkur.db");
    path
}
