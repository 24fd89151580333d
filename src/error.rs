use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("Invalid width or height: {width} x {height}")]
    InvalidDimensions { width: String, height: String },

    #[error("Map width doesn't match: line {line} has {found} cells, expected {expected}")]
    WidthMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Can't open file: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Error loading the map file: {0}")]
    Io(#[from] io::Error),
}

impl GridError {
    pub fn invalid_dimensions(width: impl ToString, height: impl ToString) -> Self {
        Self::InvalidDimensions {
            width: width.to_string(),
            height: height.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GridError>;
