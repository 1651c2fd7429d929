//! Trace Parsing Tests.
//!
//! Verifies the `<pc> <addr>` text format: optional `0x` prefixes, comments,
//! blank lines, extra columns, and line-numbered errors.

use dcpt_core::common::TraceError;
use dcpt_core::sim::{Access, load_trace, parse_trace};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Write;

#[test]
fn parses_mixed_prefixes_comments_and_extra_columns() {
    let text = "\
# pc       addr
0x400a10   0x7fff0000

400a10     7fff0100   # second touch
0x400b00   0x10 1234 H
";
    let accesses = match parse_trace(text) {
        Ok(a) => a,
        Err(e) => panic!("valid trace rejected: {e}"),
    };
    assert_eq!(
        accesses,
        vec![
            Access::new(0x40_0a10, 0x7fff_0000),
            Access::new(0x40_0a10, 0x7fff_0100),
            Access::new(0x40_0b00, 0x10),
        ]
    );
}

#[test]
fn empty_trace_is_empty() {
    assert!(matches!(parse_trace("\n# nothing\n\n"), Ok(v) if v.is_empty()));
}

/// Errors name the 1-based line of the first bad record.
#[rstest]
#[case("0x1 0x2\n0x3\n", 2)]
#[case("# header\n0x1 0xzz\n", 2)]
#[case("g00d 0x2\n", 1)]
#[case("0x1 0x2\n\n0x3 0x4\n-1 0x5\n", 4)]
fn reports_offending_line(#[case] text: &str, #[case] expected: usize) {
    match parse_trace(text) {
        Err(TraceError::Parse { line, .. }) => assert_eq!(line, expected),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn loads_from_file() {
    let mut file = match tempfile::NamedTempFile::new() {
        Ok(f) => f,
        Err(e) => panic!("tempfile: {e}"),
    };
    writeln!(file, "0x400 0x1000").unwrap_or_else(|e| panic!("{e}"));
    writeln!(file, "0x400 0x1100").unwrap_or_else(|e| panic!("{e}"));

    let accesses = match load_trace(file.path()) {
        Ok(a) => a,
        Err(e) => panic!("load failed: {e}"),
    };
    assert_eq!(accesses.len(), 2);
    assert_eq!(accesses[1], Access::new(0x400, 0x1100));
}

#[test]
fn missing_file_is_io_error() {
    let dir = match tempfile::tempdir() {
        Ok(d) => d,
        Err(e) => panic!("tempdir: {e}"),
    };
    assert!(matches!(
        load_trace(dir.path().join("absent.trace")),
        Err(TraceError::Io(_))
    ));
}
