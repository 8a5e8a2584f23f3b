//! End-to-end rendering tests
//!
//! Larger decoder-style runs: mixed data granularities, verbose trailing
//! comments, CPU mode annotations, and pagination.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use rd65_code::CodeBuf;
use rd65_output::{OutputEngine, PAGE_HEADER_LINES};
use rd65_spec::{AddrSize, Config, Cpu, Pass};

#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<Vec<u8>>>);

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedSink {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

fn verbose_config() -> Config {
    Config {
        comments: 4,
        use_hex_offs: true,
        input_file: "game.prg".to_string(),
        created: "2026-08-30 12:00:00".to_string(),
        ..Config::default()
    }
}

/// A scripted decoder walk over a 16-byte image: constants up front,
/// then a zeropage segment of byte data and a code segment with mixed
/// granularities and width annotations.
fn disassemble(out: &mut OutputEngine, code: &mut CodeBuf) {
    code.reset();

    out.output_settings(Cpu::Wdc65816).unwrap();
    out.define_const("VRAM", Some("video memory"), 0x2000).unwrap();
    out.define_const("IRQV", None, 0xFFFE).unwrap();

    out.start_segment("ZEROPAGE", AddrSize::Zeropage).unwrap();
    out.define_forward("temp", Some("scratch"), 2).unwrap();
    out.end_segment().unwrap();

    out.start_segment("CODE", AddrSize::Default).unwrap();
    out.output_m_flag(true).unwrap();
    out.output_x_flag(false).unwrap();

    out.define_label("ENTRY").unwrap();
    out.data_byte_line(code, 4).unwrap();
    code.advance(4);

    out.data_word_line(code, 4).unwrap();
    code.advance(4);

    out.data_dbyte_line(code, 4).unwrap();
    code.advance(4);

    out.data_dword_line(code, 4).unwrap();
    code.advance(4);

    out.separator_line().unwrap();
    out.end_segment().unwrap();
}

fn image() -> CodeBuf {
    let mut code = CodeBuf::new();
    code.load(
        &[
            0x48, 0x65, 0x6C, 0x6C, // "Hell"
            0x6F, 0x21, 0x00, 0xFF, // "o!" + non-printables
            0x01, 0x02, 0x03, 0x04, //
            0xDE, 0xAD, 0xBE, 0xEF, //
        ],
        0x8000,
    )
    .unwrap();
    code
}

#[test]
fn test_full_run_renders_every_directive_kind() {
    let mut code = image();
    let mut out = OutputEngine::new(verbose_config());

    out.set_pass(Pass::Exploratory);
    disassemble(&mut out, &mut code);

    let sink = SharedSink::default();
    out.set_pass(Pass::Final);
    out.open_writer(sink.clone()).unwrap();
    disassemble(&mut out, &mut code);
    out.close().unwrap();

    let text = sink.contents();

    // CPU and width annotations
    assert!(text.contains("        .setcpu \"65816\"\n"));
    assert!(text.contains("        .a8\n"));
    assert!(text.contains("        .i16\n"));

    // Symbol definitions
    assert!(text.contains("VRAM            := $2000                        ; video memory\n"));
    assert!(text.contains("IRQV            := $FFFE\n"));
    assert!(text.contains("temp            := * + $0002                    ; scratch\n"));

    // Segments
    assert!(text.contains("\n.segment        \"ZEROPAGE\": zeropage\n"));
    assert!(text.contains("\n.segment        \"CODE\"\n"));
    assert!(text.contains("; End of \"ZEROPAGE\" segment\n"));
    assert!(text.contains("; End of \"CODE\" segment\n"));

    // Data lines with address, hex dump, and ASCII dump
    assert!(text.contains(
        "        .byte   $48,$65,$6C,$6C                 ; 8000 48 65 6C 6C              Hell\n"
    ));
    assert!(text.contains("        .word   $216F,$FF00"));
    assert!(text.contains("        .dbyt   $0102,$0304"));
    assert!(text.contains("        .dword  $EFBEADDE"));
    assert!(text.contains("; 8004 6F 21 00 FF              o!..\n"));

    // Separator rule at verbosity >= 1
    assert!(text.contains("; ----"));
}

#[test]
fn test_exploratory_then_final_consistency() {
    // Rendering with or without a preceding exploratory pass must give
    // byte-identical final output.
    let render = |explore_first: bool| {
        let mut code = image();
        let mut out = OutputEngine::new(verbose_config());
        if explore_first {
            out.set_pass(Pass::Exploratory);
            disassemble(&mut out, &mut code);
        }
        let sink = SharedSink::default();
        out.set_pass(Pass::Final);
        out.open_writer(sink.clone()).unwrap();
        disassemble(&mut out, &mut code);
        out.close().unwrap();
        sink.contents()
    };

    assert_eq!(render(true), render(false));
}

#[test]
fn test_paginated_run_reissues_headers() {
    let mut config = verbose_config();
    config.page_length = 16;
    config.form_feeds = true;

    let mut code = image();
    let sink = SharedSink::default();
    let mut out = OutputEngine::new(config);
    out.set_pass(Pass::Final);
    out.open_writer(sink.clone()).unwrap();
    disassemble(&mut out, &mut code);
    out.close().unwrap();

    let text = sink.contents();
    assert!(out.page() >= 2);
    assert!(text.contains("; Page:       1\n"));
    assert!(text.contains("; Page:       2\n"));
    assert!(text.contains('\x0C'));
    // after a rollover the line counter restarts below the header block
    assert!(out.line() >= PAGE_HEADER_LINES);
}

#[test]
fn test_user_comments_render_in_any_pass() {
    let sink = SharedSink::default();
    let mut out = OutputEngine::new(verbose_config());
    out.set_pass(Pass::Final);
    out.open_writer(sink.clone()).unwrap();

    out.set_pass(Pass::Exploratory);
    out.user_comment("reverse engineered from tape dump").unwrap();
    out.set_pass(Pass::Final);
    out.user_comment("entry point found by trace").unwrap();
    out.close().unwrap();

    let text = sink.contents();
    assert!(text.contains("; reverse engineered from tape dump\n"));
    assert!(text.contains("; entry point found by trace\n"));
}
