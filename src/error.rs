use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown provider '{0}'")]
    UnknownProvider(String),

    #[error("Provider '{0}' not available")]
    ProviderUnavailable(String),

    #[error("No supported package manager found")]
    NoProvider,

    #[error("Invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
