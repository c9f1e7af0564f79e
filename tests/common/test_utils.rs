//! Shared helpers for creating temporary files and mapping them.

use memsight::{MappedFile, ViewerConfig};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Creates a temporary file with the given content.
///
/// The file is removed when the returned `NamedTempFile` is dropped.
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Creates a temporary file whose bytes count up from 0, wrapping at 256.
pub fn create_sequential_file(size: usize) -> NamedTempFile {
    let content: Vec<u8> = (0..size).map(|i| i as u8).collect();
    create_temp_file(&content)
}

/// Maps a file, panicking on failure.
pub fn open_mapped<P: AsRef<Path>>(path: P) -> MappedFile {
    MappedFile::open(path).unwrap()
}

/// Default viewer layout with a custom page size.
pub fn viewer_config(page_size: usize) -> ViewerConfig {
    ViewerConfig {
        page_size,
        ..ViewerConfig::default()
    }
}

/// Splits a dump line into its address, byte tokens and text column.
pub fn split_dump_line(line: &str) -> (&str, Vec<&str>, &str) {
    let (head, text) = line.split_once(" | ").unwrap();
    let (address, tokens) = head.split_once(':').unwrap();
    (address, tokens.split_whitespace().collect(), text)
}
