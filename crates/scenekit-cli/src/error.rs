use scenekit_core::SceneError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("Step {step}: {source}")]
    Step {
        step: usize,
        #[source]
        source: SceneError,
    },
    #[error("Step {step}: no component at index {index}")]
    BadIndex { step: usize, index: usize },
    #[error("Failed to encode output: {0}")]
    Output(#[source] serde_json::Error),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

pub type CliResult<T> = Result<T, CliError>;
