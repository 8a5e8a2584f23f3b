//! # rd65 Code Buffer
//!
//! Binary image management for the disassembler: a fixed 64K address
//! space, the populated sub-range set once at load time, and the
//! decoder's read cursor.
//!
//! Two byte orders coexist on purpose: [`CodeBuf::read_word`] follows
//! the target's native little-endian order while [`CodeBuf::read_dbyte`]
//! follows the big-endian `.dbyt` display convention. Both read the same
//! two bytes; only the interpretation differs.

pub mod buffer;
pub mod error;

pub use buffer::CodeBuf;
pub use error::{CodeError, Result};
