//! Common test utilities and helpers.

pub mod test_utils;

use std::path::Path;

/// Test helper for checking if sample files exist
pub fn sample_file_exists<P: AsRef<Path>>(relative_path: P) -> bool {
    sample_file_path(relative_path).exists()
}

/// Get the full path to a sample file
pub fn sample_file_path<P: AsRef<Path>>(relative_path: P) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(relative_path)
}

/// Common test data and constants
pub mod test_data {
    /// 30 repetitions of a 45-byte pangram line, 1350 bytes in total
    pub const SAMPLE_PANGRAM: &str = "text/pangram.txt";

    pub const SAMPLE_PANGRAM_LEN: u64 = 1350;
}
