use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort an export run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no corpus files found for the selected inputs")]
    NoInputs,
    #[error("a concordance needs at least one word type")]
    NoTypes,
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write tab-separated output: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Corpus(#[from] anyhow::Error),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ExportError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ExportError> = std::result::Result<T, E>;
