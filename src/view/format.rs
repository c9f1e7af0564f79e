//! Line formatting for paged dumps.
//!
//! Digits are produced into a per-call stack buffer so formatting never
//! shares mutable state between calls.

use crate::config::ViewerConfig;
use std::fmt::Write as _;

const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Token written in place of byte positions that lie past the end of the file.
pub const PLACEHOLDER: char = '_';

/// Appends `value` in `radix`, left-padded with zeros to at least `width` digits.
///
/// `radix` must be in 2..=36.
pub fn push_digits(out: &mut String, mut value: u64, radix: u32, width: usize) {
    debug_assert!((2..=36).contains(&radix));
    let radix = u64::from(radix);
    // u64::MAX in base 2 needs 64 digits.
    let mut buf = [0u8; 64];
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = DIGITS[(value % radix) as usize];
        value /= radix;
        if value == 0 {
            break;
        }
    }
    let used = buf.len() - pos;
    for _ in used..width {
        out.push('0');
    }
    for &b in &buf[pos..] {
        out.push(b as char);
    }
}

/// Number of digits needed to show any byte value in `radix`.
pub fn byte_token_width(radix: u32) -> usize {
    let mut value = u8::MAX as u32;
    let mut width = 0;
    while value > 0 {
        value /= radix;
        width += 1;
    }
    width
}

/// ASCII rendering used in the text column.
pub fn printable(byte: u8) -> char {
    if (32..=127).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

/// Layout parameters for dump lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpFormat {
    pub line_length: usize,
    pub radix: u32,
    pub address_width: usize,
}

impl Default for DumpFormat {
    fn default() -> Self {
        Self::from(&ViewerConfig::default())
    }
}

impl From<&ViewerConfig> for DumpFormat {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            line_length: config.line_length,
            radix: config.radix,
            address_width: config.address_width,
        }
    }
}

/// One line of a dump: the bytes of a sub-range and the file offset they start at.
///
/// `bytes` holds only real file bytes. It is shorter than the line length on
/// the last line of a page that does not divide evenly into lines, or on the
/// last line of the file. `file_len` tells the two apart: a line cut by the
/// page is padded with blanks, a line cut by the end of the file with
/// placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpLine<'a> {
    pub address: u64,
    pub bytes: &'a [u8],
    pub file_len: u64,
}

impl DumpLine<'_> {
    /// Appends `ADDR: XX XX __ | text` followed by a newline.
    pub fn write_to(&self, out: &mut String, format: &DumpFormat) {
        let token_width = byte_token_width(format.radix);

        push_digits(out, self.address, format.radix, format.address_width);
        out.push(':');

        for &b in self.bytes {
            out.push(' ');
            push_digits(out, u64::from(b), format.radix, token_width);
        }
        let end = self.address.saturating_add(self.bytes.len() as u64);
        let pad = if end >= self.file_len { PLACEHOLDER } else { ' ' };
        for _ in self.bytes.len()..format.line_length {
            out.push(' ');
            for _ in 0..token_width {
                out.push(pad);
            }
        }

        out.push_str(" | ");
        for &b in self.bytes {
            out.push(printable(b));
        }
        out.push('\n');
    }

    pub fn render(&self, format: &DumpFormat) -> String {
        let mut out = String::new();
        self.write_to(&mut out, format);
        out
    }
}

/// Appends the dump header naming the file and its size.
pub fn write_header(out: &mut String, label: &str, size: u64) {
    let _ = writeln!(out, "File: {label}");
    let _ = writeln!(out, "Size: {size}");
}
