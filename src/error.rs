use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("script {path} has no steps")]
    Empty { path: PathBuf },
}

impl Error {
    /// Erreurs dues à l'entrée utilisateur plutôt qu'à l'environnement.
    pub const fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::Config(ConfigError::InvalidField { .. } | ConfigError::Parse(_))
                | Self::Script(ScriptError::Parse { .. } | ScriptError::Empty { .. })
        )
    }
}
