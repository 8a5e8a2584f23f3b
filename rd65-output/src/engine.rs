//! The output engine
//!
//! Stateful renderer for the reconstructed assembly text. Every derived
//! operation is built from the `emit` / `indent_to` / `newline`
//! primitives so the column counter can never drift from the characters
//! actually written.
//!
//! The engine is pass-gated: while the driver has it in
//! [`Pass::Exploratory`] all gated operations are complete no-ops, so
//! exploratory passes leave the sink byte-free. The final pass is
//! deterministic for a given call sequence; line/column/page state is
//! accumulated incrementally and any divergence would compound.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use rd65_code::CodeBuf;
use rd65_spec::{Addr, AddrSize, Config, Cpu, Pass};

use crate::error::{OutputError, Result};

/// Lines occupied by the page header block (4 comment lines + 1 blank)
pub const PAGE_HEADER_LINES: u32 = 5;

const SEPARATOR: &str =
    "; ----------------------------------------------------------------------------";

/// Granularity of a data directive line
#[derive(Debug, Clone, Copy)]
enum DataKind {
    Byte,
    DByte,
    Word,
    DWord,
}

impl DataKind {
    fn directive(self) -> &'static str {
        match self {
            DataKind::Byte => ".byte",
            DataKind::DByte => ".dbyt",
            DataKind::Word => ".word",
            DataKind::DWord => ".dword",
        }
    }

    fn step(self) -> u32 {
        match self {
            DataKind::Byte => 1,
            DataKind::DByte | DataKind::Word => 2,
            DataKind::DWord => 4,
        }
    }
}

/// Pass-aware assembly text renderer
pub struct OutputEngine {
    sink: Option<Box<dyn Write>>,
    /// 1-based column of the next character on the current line
    col: u32,
    /// Lines written on the current page
    line: u32,
    page: u32,
    pass: Pass,
    segment_name: Option<String>,
    config: Config,
}

impl OutputEngine {
    /// Create an engine with no bound sink, in the exploratory pass
    pub fn new(config: Config) -> Self {
        OutputEngine {
            sink: None,
            col: 1,
            line: 0,
            page: 1,
            pass: Pass::Exploratory,
            segment_name: None,
            config,
        }
    }

    /// Set the pass before a traversal starts. Read-only to everything
    /// below; only the driver calls this.
    pub fn set_pass(&mut self, pass: Pass) {
        self.pass = pass;
    }

    pub fn pass(&self) -> Pass {
        self.pass
    }

    pub fn col(&self) -> u32 {
        self.col
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    // ------------------------------------------------------------------
    // Open/close lifecycle
    // ------------------------------------------------------------------

    /// Bind the named file, or stdout when no name is given, and write
    /// the first page header
    pub fn open(&mut self, name: Option<&Path>) -> Result<()> {
        let sink: Box<dyn Write> = match name {
            Some(path) => {
                let file = File::create(path).map_err(|source| OutputError::Open {
                    path: path.display().to_string(),
                    source,
                })?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };
        self.attach(sink)
    }

    /// Bind an arbitrary sink; used by drivers that render somewhere
    /// other than a file, and by tests
    pub fn open_writer<W: Write + 'static>(&mut self, writer: W) -> Result<()> {
        self.attach(Box::new(writer))
    }

    fn attach(&mut self, sink: Box<dyn Write>) -> Result<()> {
        self.sink = Some(sink);
        self.page_header()?;
        self.line = PAGE_HEADER_LINES;
        self.col = 1;
        tracing::debug!("output opened on page {}", self.page);
        Ok(())
    }

    /// Flush and release the sink. A failing flush is reported, not
    /// swallowed.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut sink) = self.sink.take() {
            sink.flush()?;
            tracing::debug!("output closed after {} page(s)", self.page);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Raw writes (not pass-gated; the gate lives in the public
    // primitives below)
    // ------------------------------------------------------------------

    fn sink_write(&mut self, s: &str) -> Result<()> {
        if let Some(sink) = self.sink.as_mut() {
            sink.write_all(s.as_bytes())?;
        }
        Ok(())
    }

    fn write_raw(&mut self, s: &str) -> Result<()> {
        if self.sink.is_none() {
            return Ok(());
        }
        self.sink_write(s)?;
        self.col += s.chars().count() as u32;
        Ok(())
    }

    fn newline_raw(&mut self) -> Result<()> {
        if self.sink.is_none() {
            return Ok(());
        }
        self.sink_write("\n")?;
        self.line += 1;
        if self.config.page_length > 0 && self.line >= self.config.page_length {
            if self.config.form_feeds {
                self.sink_write("\x0C")?;
            }
            self.page += 1;
            self.page_header()?;
            self.line = PAGE_HEADER_LINES;
        }
        self.col = 1;
        Ok(())
    }

    /// Write the page banner: tool identity, creation timestamp, input
    /// file, page number, then a blank line. Written on open and on
    /// every page rollover.
    pub fn page_header(&mut self) -> Result<()> {
        let header = format!(
            "; rd65 V{}\n\
             ; Created:    {}\n\
             ; Input file: {}\n\
             ; Page:       {}\n\n",
            env!("CARGO_PKG_VERSION"),
            self.config.created,
            self.config.input_file,
            self.page,
        );
        self.sink_write(&header)
    }

    // ------------------------------------------------------------------
    // Core primitives
    // ------------------------------------------------------------------

    /// Write formatted text and advance the column. No newline handling.
    pub fn emit(&mut self, args: fmt::Arguments<'_>) -> Result<()> {
        if self.pass.is_final() {
            let text = args.to_string();
            self.write_raw(&text)?;
        }
        Ok(())
    }

    /// Pad with spaces until the column reaches `target`; no-op at or
    /// past it
    pub fn indent_to(&mut self, target: u32) -> Result<()> {
        if self.pass.is_final() && self.col < target {
            let pad = (target - self.col) as usize;
            self.write_raw(&" ".repeat(pad))?;
        }
        Ok(())
    }

    /// Terminate the line, handling page rollover
    pub fn newline(&mut self) -> Result<()> {
        if self.pass.is_final() {
            self.newline_raw()?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Derived operations
    // ------------------------------------------------------------------

    /// Define a label. If the label text runs past the break column or
    /// into the mnemonic column, the next directive starts a fresh line.
    pub fn define_label(&mut self, name: &str) -> Result<()> {
        if !self.pass.is_final() {
            return Ok(());
        }
        self.emit(format_args!("{}:", name))?;
        if self.col > self.config.label_break + 2 || self.col > self.config.mnemonic_col {
            self.newline()?;
        }
        Ok(())
    }

    /// Define a label as `* + offs`, relative to the current PC
    pub fn define_forward(&mut self, name: &str, comment: Option<&str>, offs: u32) -> Result<()> {
        if !self.pass.is_final() {
            return Ok(());
        }

        // Flush existing output if necessary
        if self.col > 1 {
            self.newline()?;
        }

        self.emit(format_args!("{}", name))?;
        self.indent_to(self.config.arg_col)?;
        if self.config.use_hex_offs {
            self.emit(format_args!(":= * + ${:04X}", offs))?;
        } else {
            self.emit(format_args!(":= * + {}", offs))?;
        }
        if let Some(comment) = comment {
            self.indent_to(self.config.comment_col)?;
            self.emit(format_args!("; {}", comment))?;
        }
        self.newline()
    }

    /// Define an address constant
    pub fn define_const(&mut self, name: &str, comment: Option<&str>, addr: Addr) -> Result<()> {
        if !self.pass.is_final() {
            return Ok(());
        }
        self.emit(format_args!("{}", name))?;
        self.indent_to(self.config.arg_col)?;
        self.emit(format_args!(":= ${:04X}", addr))?;
        if let Some(comment) = comment {
            self.indent_to(self.config.comment_col)?;
            self.emit(format_args!("; {}", comment))?;
        }
        self.newline()
    }

    /// Output a line with byte data
    pub fn data_byte_line(&mut self, code: &CodeBuf, byte_count: u32) -> Result<()> {
        self.data_line(DataKind::Byte, code, byte_count)
    }

    /// Output a line with dbyte data (big-endian display order)
    pub fn data_dbyte_line(&mut self, code: &CodeBuf, byte_count: u32) -> Result<()> {
        self.data_line(DataKind::DByte, code, byte_count)
    }

    /// Output a line with word data (native little-endian order)
    pub fn data_word_line(&mut self, code: &CodeBuf, byte_count: u32) -> Result<()> {
        self.data_line(DataKind::Word, code, byte_count)
    }

    /// Output a line with dword data
    pub fn data_dword_line(&mut self, code: &CodeBuf, byte_count: u32) -> Result<()> {
        self.data_line(DataKind::DWord, code, byte_count)
    }

    fn data_line(&mut self, kind: DataKind, code: &CodeBuf, byte_count: u32) -> Result<()> {
        if !self.pass.is_final() {
            return Ok(());
        }

        self.indent_to(self.config.mnemonic_col)?;
        self.emit(format_args!("{}", kind.directive()))?;
        self.indent_to(self.config.arg_col)?;

        let pc = code.pc();
        let mut i = 0;
        while i < byte_count {
            if i > 0 {
                self.emit(format_args!(","))?;
            }
            match kind {
                DataKind::Byte => {
                    self.emit(format_args!("${:02X}", code.read_byte(pc + i)?))?;
                }
                DataKind::DByte => {
                    self.emit(format_args!("${:04X}", code.read_dbyte(pc + i)?))?;
                }
                DataKind::Word => {
                    self.emit(format_args!("${:04X}", code.read_word(pc + i)?))?;
                }
                DataKind::DWord => {
                    self.emit(format_args!("${:08X}", code.read_dword(pc + i)?))?;
                }
            }
            i += kind.step();
        }

        self.line_comment(code, pc, byte_count)?;
        self.newline()
    }

    /// Trailing comment with the address and raw bytes of the current
    /// line, gated by the configured verbosity:
    ///
    /// - 0: nothing
    /// - 1+: the address
    /// - 3+: each byte in hex
    /// - 4: the bytes as ASCII, non-printable shown as `.`
    ///
    /// Level 2 adds nothing over level 1 on this path; the tier is kept
    /// distinct anyway so verbosity stays a single ordered scale.
    pub fn line_comment(&mut self, code: &CodeBuf, addr: Addr, count: u32) -> Result<()> {
        if !self.pass.is_final() || self.config.comments < 1 {
            return Ok(());
        }

        self.indent_to(self.config.comment_col)?;
        self.emit(format_args!("; {:04X}", addr))?;
        if self.config.comments >= 3 {
            for i in 0..count {
                self.emit(format_args!(" {:02X}", code.read_byte(addr + i)?))?;
            }
            if self.config.comments >= 4 {
                self.indent_to(self.config.text_col)?;
                for i in 0..count {
                    let byte = code.read_byte(addr + i)?;
                    let ch = if (0x20..=0x7E).contains(&byte) {
                        byte as char
                    } else {
                        '.'
                    };
                    self.emit(format_args!("{}", ch))?;
                }
            }
        }
        Ok(())
    }

    /// Print a separator rule; verbosity 1 and up only
    pub fn separator_line(&mut self) -> Result<()> {
        if self.pass.is_final() && self.config.comments >= 1 {
            self.emit(format_args!("{}", SEPARATOR))?;
            self.newline()?;
        }
        Ok(())
    }

    /// Start a segment, with an explicit address-size qualifier when it
    /// differs from the default
    pub fn start_segment(&mut self, name: &str, addr_size: AddrSize) -> Result<()> {
        if !self.pass.is_final() {
            return Ok(());
        }
        self.newline()?;
        self.emit(format_args!(".segment"))?;
        self.indent_to(self.config.arg_col)?;
        self.segment_name = Some(name.to_string());
        self.emit(format_args!("\"{}\"", name))?;
        if addr_size != AddrSize::Default {
            self.emit(format_args!(": {}", addr_size.to_str()))?;
        }
        self.newline()?;
        self.newline()
    }

    /// End the current segment and return to the default one
    pub fn end_segment(&mut self) -> Result<()> {
        if !self.pass.is_final() {
            return Ok(());
        }
        let name = self.segment_name.take().unwrap_or_default();
        self.newline()?;
        self.emit(format_args!("; End of \"{}\" segment", name))?;
        self.newline()?;
        self.separator_line()?;
        self.emit(format_args!(".code"))?;
        self.newline()?;
        self.newline()
    }

    /// Output a comment line. Intentionally not pass-gated: user-authored
    /// comments render in whatever pass the driver has a sink bound for.
    pub fn user_comment(&mut self, text: &str) -> Result<()> {
        self.write_raw(&format!("; {}", text))?;
        self.newline_raw()
    }

    /// Output the `.setcpu` directive for the target CPU
    pub fn output_settings(&mut self, cpu: Cpu) -> Result<()> {
        if !self.pass.is_final() {
            return Ok(());
        }
        self.newline()?;
        self.indent_to(self.config.mnemonic_col)?;
        self.emit(format_args!(".setcpu"))?;
        self.indent_to(self.config.arg_col)?;
        self.emit(format_args!("\"{}\"", cpu.name()))?;
        self.newline()?;
        self.newline()
    }

    /// Output the accumulator width assumed from here on (65816 M flag)
    pub fn output_m_flag(&mut self, is_8bit: bool) -> Result<()> {
        if !self.pass.is_final() {
            return Ok(());
        }
        self.indent_to(self.config.mnemonic_col)?;
        self.emit(format_args!("{}", if is_8bit { ".a8" } else { ".a16" }))?;
        self.newline()
    }

    /// Output the index register width assumed from here on (65816 X flag)
    pub fn output_x_flag(&mut self, is_8bit: bool) -> Result<()> {
        if !self.pass.is_final() {
            return Ok(());
        }
        self.indent_to(self.config.mnemonic_col)?;
        self.emit(format_args!("{}", if is_8bit { ".i8" } else { ".i16" }))?;
        self.newline()
    }
}

impl fmt::Debug for OutputEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputEngine")
            .field("col", &self.col)
            .field("line", &self.line)
            .field("page", &self.page)
            .field("pass", &self.pass)
            .field("segment_name", &self.segment_name)
            .field("open", &self.sink.is_some())
            .finish()
    }
}
