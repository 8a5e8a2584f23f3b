//! Output engine errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot open '{path}': {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("code read failed: {0}")]
    Code(#[from] rd65_code::CodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OutputError>;
