//! # rd65 Specification
//!
//! Shared vocabulary for the rd65 disassembler: target CPU selection,
//! analysis passes, segment address sizes, and the output configuration
//! surface consumed by the rendering engine.
//!
//! ## Key Features
//! - 64K flat address space model (8/16-bit targets)
//! - Two-pass analysis: exploratory passes, then one final rendering pass
//! - Column/pagination/verbosity configuration with validation

pub mod addrsize;
pub mod config;
pub mod cpu;
pub mod pass;

pub use addrsize::AddrSize;
pub use config::{Config, ConfigError};
pub use cpu::Cpu;
pub use pass::Pass;

/// Size of the modeled address space (64K)
pub const ADDR_SPACE_SIZE: u32 = 0x10000;

/// Address type (16-bit addresses carried as u32 so range arithmetic
/// around 0xFFFF cannot wrap)
pub type Addr = u32;
