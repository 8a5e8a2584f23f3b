//! The code buffer
//!
//! Owns the flat 64K image being disassembled plus the populated range
//! and the decoder's read cursor. Pure data access: every multi-byte
//! read is bounds-checked against the loaded range, and a read that
//! starts inside the range but extends past its end is an error, never
//! a wraparound.

use crate::error::{CodeError, Result};
use rd65_spec::{Addr, ADDR_SPACE_SIZE};

/// Bounds-checked random access over a loaded binary image
#[derive(Debug, Clone)]
pub struct CodeBuf {
    /// Full address space; only `[start, end)` holds loaded bytes
    image: Vec<u8>,
    start: Addr,
    end: Addr,
    /// Decoder cursor. The output engine reads around it but never
    /// moves it.
    pc: Addr,
}

impl CodeBuf {
    /// Create an empty buffer; nothing is readable until [`load`](Self::load)
    pub fn new() -> Self {
        CodeBuf {
            image: vec![0; ADDR_SPACE_SIZE as usize],
            start: 0,
            end: 0,
            pc: 0,
        }
    }

    /// Copy a binary image into the address space at `base`.
    ///
    /// Sets the populated range to `[base, base + bytes.len())` and
    /// rewinds the cursor to `base`. The range is fixed for the rest of
    /// the run.
    pub fn load(&mut self, bytes: &[u8], base: Addr) -> Result<()> {
        let end = base as usize + bytes.len();
        if base >= ADDR_SPACE_SIZE || end > ADDR_SPACE_SIZE as usize {
            return Err(CodeError::ImageTooLarge {
                base,
                len: bytes.len(),
            });
        }

        self.image[base as usize..end].copy_from_slice(bytes);
        self.start = base;
        self.end = end as Addr;
        self.pc = base;

        tracing::debug!(
            "loaded {} bytes at {:#06X}..{:#06X}",
            bytes.len(),
            self.start,
            self.end
        );
        Ok(())
    }

    /// Read a binary file and load it at `base`
    pub fn load_file(&mut self, path: &std::path::Path, base: Addr) -> Result<()> {
        let bytes = std::fs::read(path)?;
        self.load(&bytes, base)
    }

    /// First loaded address
    #[inline]
    pub fn start(&self) -> Addr {
        self.start
    }

    /// One past the last loaded address
    #[inline]
    pub fn end(&self) -> Addr {
        self.end
    }

    /// Verify `[addr, addr + len)` lies inside the loaded range and
    /// return the image offset
    fn check(&self, addr: Addr, len: u32) -> Result<usize> {
        if addr < self.start || addr.saturating_add(len) > self.end {
            return Err(CodeError::OutOfRange { addr, len });
        }
        Ok(addr as usize)
    }

    /// Get a byte from the given address
    pub fn read_byte(&self, addr: Addr) -> Result<u8> {
        let i = self.check(addr, 1)?;
        Ok(self.image[i])
    }

    /// Get a dbyte from the given address (big-endian display order)
    pub fn read_dbyte(&self, addr: Addr) -> Result<u16> {
        let i = self.check(addr, 2)?;
        Ok(u16::from_be_bytes([self.image[i], self.image[i + 1]]))
    }

    /// Get a word from the given address (little-endian machine order)
    pub fn read_word(&self, addr: Addr) -> Result<u16> {
        let i = self.check(addr, 2)?;
        Ok(u16::from_le_bytes([self.image[i], self.image[i + 1]]))
    }

    /// Get a dword from the given address (little-endian)
    pub fn read_dword(&self, addr: Addr) -> Result<u32> {
        let i = self.check(addr, 4)?;
        Ok(u32::from_le_bytes([
            self.image[i],
            self.image[i + 1],
            self.image[i + 2],
            self.image[i + 3],
        ]))
    }

    /// Get a 24-bit address stored in 3 bytes, zero-extended
    pub fn read_long_addr(&self, addr: Addr) -> Result<u32> {
        let i = self.check(addr, 3)?;
        Ok(u32::from_le_bytes([
            self.image[i],
            self.image[i + 1],
            self.image[i + 2],
            0,
        ]))
    }

    /// Number of loaded bytes from `addr` to the end of the range,
    /// saturating at 0
    #[inline]
    pub fn remaining_from(&self, addr: Addr) -> u32 {
        self.end.saturating_sub(addr)
    }

    /// True while `addr` is below the end of the loaded range
    #[inline]
    pub fn has_remaining(&self, addr: Addr) -> bool {
        addr < self.end
    }

    /// Current cursor position
    #[inline]
    pub fn pc(&self) -> Addr {
        self.pc
    }

    /// Move the cursor. Decoder-only; rendering never calls this.
    #[inline]
    pub fn set_pc(&mut self, addr: Addr) {
        self.pc = addr;
    }

    /// Advance the cursor by `n` bytes
    #[inline]
    pub fn advance(&mut self, n: u32) {
        self.pc += n;
    }

    /// Rewind the cursor for the next pass. Image and loaded range are
    /// untouched.
    pub fn reset(&mut self) {
        self.pc = self.start;
    }
}

impl Default for CodeBuf {
    fn default() -> Self {
        Self::new()
    }
}
