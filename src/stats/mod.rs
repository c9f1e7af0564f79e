//! Process, system and filesystem statistics.
//!
//! `StatProvider` is the query surface display code is written against. The
//! platform implementation, `NativeStats`, is chosen at build time; every
//! query is a fresh read of the OS counters and returns a byte count.

pub mod heap;
pub mod native;
pub mod summary;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub use native::NativeStats;

/// Uniform query surface over platform memory and storage counters.
///
/// Queries return 0 where the platform does not define the counter.
pub trait StatProvider {
    /// Resident (in-RAM) memory used by this process.
    fn process_resident(&self) -> i64;
    /// Virtual memory reserved by this process, resident or not.
    fn process_virtual(&self) -> i64;
    fn system_free(&self) -> i64;
    fn system_total(&self) -> i64;
    /// Total size of the filesystem holding `path`.
    fn filesystem_total(&self, path: &Path) -> i64;
    /// Free space on the filesystem holding `path`, including reserved blocks.
    fn filesystem_free(&self, path: &Path) -> i64;
    /// Space on the filesystem holding `path` available to this user.
    fn filesystem_available(&self, path: &Path) -> i64;

    /// Live heap bytes. Reads the in-process counter, never native code.
    fn heap_allocated(&self) -> i64 {
        heap::allocated_bytes() as i64
    }
}

/// Every statistic captured at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSnapshot {
    pub taken_at: DateTime<Utc>,
    pub heap_allocated: i64,
    pub process_resident: i64,
    pub process_virtual: i64,
    pub system_free: i64,
    pub system_total: i64,
    pub filesystem_path: PathBuf,
    pub filesystem_total: i64,
    pub filesystem_free: i64,
    pub filesystem_available: i64,
}

impl StatSnapshot {
    /// Queries every counter of `provider`, using `path` for the filesystem ones.
    pub fn capture<S: StatProvider + ?Sized>(provider: &S, path: &Path) -> Self {
        let snapshot = Self {
            taken_at: Utc::now(),
            heap_allocated: provider.heap_allocated(),
            process_resident: provider.process_resident(),
            process_virtual: provider.process_virtual(),
            system_free: provider.system_free(),
            system_total: provider.system_total(),
            filesystem_path: path.to_path_buf(),
            filesystem_total: provider.filesystem_total(path),
            filesystem_free: provider.filesystem_free(path),
            filesystem_available: provider.filesystem_available(path),
        };
        debug!(
            resident = snapshot.process_resident,
            system_free = snapshot.system_free,
            fs_available = snapshot.filesystem_available,
            "Captured statistics"
        );
        snapshot
    }

    /// Multi-line text for the display sink.
    pub fn summary(&self) -> String {
        summary::format_snapshot(self)
    }
}
