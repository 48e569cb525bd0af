use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure kinds a stage reports before stopping.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("file not found: {}", .path.display())]
    MissingFile { path: PathBuf },

    #[error("column `{column}` not found in {}", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StageError {
    pub fn missing_file(path: &Path) -> Self {
        Self::MissingFile {
            path: path.to_path_buf(),
        }
    }

    pub fn missing_column(path: &Path, column: &str) -> Self {
        Self::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        }
    }

    /// Short label used by the binaries when printing the failure.
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::MissingFile { .. } => "missing file",
            Self::MissingColumn { .. } => "missing column",
            Self::Other(_) => "unexpected error",
        }
    }
}

pub type StageResult<T> = std::result::Result<T, StageError>;
