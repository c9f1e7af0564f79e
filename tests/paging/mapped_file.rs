//! Integration tests for the mapped file lifecycle.

use memsight::{MappedFile, OpenError, OpenMode};

use crate::common::test_data::*;
use crate::common::test_utils::*;
use crate::common::{sample_file_exists, sample_file_path};

#[test]
fn test_open_release_release() {
    let file = create_sequential_file(4096);
    let mut mapped = open_mapped(file.path());
    assert!(mapped.is_mapped());
    assert_eq!(mapped.len(), 4096);

    mapped.release();
    assert!(!mapped.is_mapped());
    assert!(mapped.as_ptr().is_null());
    assert!(mapped.bytes().is_empty());

    // Second release observes the released state and does nothing.
    mapped.release();
    assert!(mapped.is_released());
    drop(mapped);
}

#[test]
fn test_drop_after_explicit_release() {
    let file = create_temp_file(b"abc");
    {
        let mut mapped = open_mapped(file.path());
        mapped.release();
    }
    // The file stays usable after the scope ends.
    let again = open_mapped(file.path());
    assert_eq!(again.bytes(), b"abc");
}

#[test]
fn test_missing_path() {
    match MappedFile::open("/nonexistent/path") {
        Err(OpenError::NotFound { path }) => assert_eq!(path.to_str(), Some("/nonexistent/path")),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_unsupported_mode_checked_before_existence() {
    let result = MappedFile::open_with("/nonexistent/path", OpenMode::Create);
    assert!(matches!(result, Err(OpenError::UnsupportedMode { .. })));
}

#[test]
fn test_explicit_read_existing_mode() {
    let file = create_temp_file(b"mode");
    let mapped = MappedFile::open_with(file.path(), OpenMode::ReadExisting).unwrap();
    assert_eq!(mapped.bytes(), b"mode");
}

#[test]
fn test_empty_file_maps_to_null() {
    let file = create_temp_file(b"");
    let mapped = open_mapped(file.path());
    assert_eq!(mapped.len(), 0);
    assert!(mapped.as_ptr().is_null());
}

#[test]
fn test_large_sparse_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let size = 64 * 1024 * 1024;
    file.as_file().set_len(size).unwrap();
    let mapped = open_mapped(file.path());
    assert_eq!(mapped.len(), size);
    let mut buf = [0xFFu8; 16];
    assert_eq!(mapped.copy_to(size - 8, &mut buf), 8);
    assert!(buf[..8].iter().all(|&b| b == 0));
}

#[test]
fn test_sample_file() {
    if !sample_file_exists(SAMPLE_PANGRAM) {
        println!("Skipping {} - file not found", SAMPLE_PANGRAM);
        return;
    }
    let mapped = open_mapped(sample_file_path(SAMPLE_PANGRAM));
    assert_eq!(mapped.len(), SAMPLE_PANGRAM_LEN);
    assert!(mapped.bytes().starts_with(b"The quick brown fox"));
}
