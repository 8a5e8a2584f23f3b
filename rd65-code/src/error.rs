//! Code buffer errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodeError {
    #[error("image of {len} bytes at base {base:#06X} exceeds the 64K address space")]
    ImageTooLarge { base: u32, len: usize },

    #[error("read of {len} byte(s) at {addr:#06X} is outside the loaded range")]
    OutOfRange { addr: u32, len: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CodeError>;
