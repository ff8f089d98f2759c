use std::path::PathBuf;

use thiserror::Error;

use growthchart_reference::error::ReferenceError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(
        "config_version {found} is newer than this build supports ({supported}). \
         Please update growthchart."
    )]
    NewerVersion { found: u32, supported: u32 },

    #[error("config is not a JSON object")]
    NotAnObject,

    #[error("no config directory found")]
    NoConfigDir,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("reference data error: {0}")]
    Reference(#[from] ReferenceError),
}
