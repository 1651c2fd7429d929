//! Access Trace Loading.
//!
//! Traces are plain text, one access per line:
//!
//! ```text
//! # pc        addr
//! 0x400a10    0x7fff0000
//! 400a10      7fff0100
//! ```
//!
//! Both columns are hexadecimal with an optional `0x` prefix. Blank lines and
//! anything after `#` are ignored. Extra columns (timestamps, hit/miss flags) are
//! accepted and ignored.

use std::fs;
use std::path::Path;

use crate::common::TraceError;

/// One observed memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Access {
    /// Address of the issuing instruction.
    pub pc: u64,
    /// Accessed memory address.
    pub addr: u64,
}

impl Access {
    /// Creates an access record.
    pub const fn new(pc: u64, addr: u64) -> Self {
        Self { pc, addr }
    }
}

fn parse_hex(token: &str) -> Result<u64, String> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u64::from_str_radix(digits, 16).map_err(|e| format!("invalid hex value '{token}': {e}"))
}

/// Parses a trace from its text form.
///
/// # Errors
///
/// Returns [`TraceError::Parse`] with the 1-based line number of the first line
/// that lacks two hexadecimal columns.
pub fn parse_trace(text: &str) -> Result<Vec<Access>, TraceError> {
    let mut accesses = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let mut cols = line.split_whitespace();
        let (Some(pc), Some(addr)) = (cols.next(), cols.next()) else {
            return Err(TraceError::Parse {
                line: idx + 1,
                reason: "expected '<pc> <addr>'".to_string(),
            });
        };

        let parse = |tok: &str| {
            parse_hex(tok).map_err(|reason| TraceError::Parse {
                line: idx + 1,
                reason,
            })
        };
        accesses.push(Access::new(parse(pc)?, parse(addr)?));
    }

    Ok(accesses)
}

/// Reads and parses a trace file.
///
/// # Errors
///
/// Returns [`TraceError::Io`] if the file cannot be read, or [`TraceError::Parse`]
/// for malformed content.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<Access>, TraceError> {
    let text = fs::read_to_string(path)?;
    parse_trace(&text)
}
