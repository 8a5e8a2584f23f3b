//! # rd65 Output Engine
//!
//! Renders reconstructed assembly text with column alignment and
//! pagination, under the control of a multi-pass decoder.
//!
//! ## Pass gating
//!
//! The decoder walks the image several times. Exploratory passes only
//! establish label placement and operand widths, so every text-producing
//! operation here is a no-op until the driver sets [`Pass::Final`].
//! Given the same call sequence, the final pass always produces the same
//! bytes; column, line, and page state are tracked against the actual
//! characters written, never computed separately.
//!
//! ## Example
//!
//! ```rust
//! use rd65_code::CodeBuf;
//! use rd65_output::OutputEngine;
//! use rd65_spec::{AddrSize, Config, Pass};
//!
//! let mut code = CodeBuf::new();
//! code.load(&[0xA9, 0x01], 0x0600).unwrap();
//!
//! let mut out = OutputEngine::new(Config::default());
//! out.set_pass(Pass::Final);
//! out.open_writer(Vec::new()).unwrap();
//!
//! out.start_segment("CODE", AddrSize::Default).unwrap();
//! out.define_label("START").unwrap();
//! out.data_byte_line(&code, 2).unwrap();
//! out.end_segment().unwrap();
//! out.close().unwrap();
//! ```

pub mod engine;
pub mod error;

pub use engine::{OutputEngine, PAGE_HEADER_LINES};
pub use error::{OutputError, Result};

pub use rd65_spec::Pass;
