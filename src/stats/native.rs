//! Platform implementation of `StatProvider`.
//!
//! Memory counters come from `sysinfo` and filesystem counters from `fs2` on
//! the platforms they support. Elsewhere, or with the `stats` feature off,
//! every query reports 0.

use crate::stats::StatProvider;
use std::path::Path;

/// Counters of the platform this crate was built for.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeStats;

impl StatProvider for NativeStats {
    fn process_resident(&self) -> i64 {
        platform::process_memory().0
    }

    fn process_virtual(&self) -> i64 {
        platform::process_memory().1
    }

    fn system_free(&self) -> i64 {
        platform::system_memory().0
    }

    fn system_total(&self) -> i64 {
        platform::system_memory().1
    }

    fn filesystem_total(&self, path: &Path) -> i64 {
        platform::filesystem_total(path)
    }

    fn filesystem_free(&self, path: &Path) -> i64 {
        platform::filesystem_free(path)
    }

    fn filesystem_available(&self, path: &Path) -> i64 {
        platform::filesystem_available(path)
    }
}

#[cfg(all(
    feature = "stats",
    any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios",
        target_os = "windows",
        target_os = "freebsd"
    )
))]
mod platform {
    use std::path::Path;
    use sysinfo::{Pid, ProcessesToUpdate, System};
    use tracing::debug;

    fn to_i64(value: u64) -> i64 {
        i64::try_from(value).unwrap_or(i64::MAX)
    }

    /// (resident, virtual) for the current process.
    pub fn process_memory() -> (i64, i64) {
        let pid = Pid::from_u32(std::process::id());
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        match sys.process(pid) {
            Some(p) => (to_i64(p.memory()), to_i64(p.virtual_memory())),
            None => {
                debug!(pid = %pid, "Current process missing from process table");
                (0, 0)
            }
        }
    }

    /// (free, total) physical memory.
    pub fn system_memory() -> (i64, i64) {
        let mut sys = System::new();
        sys.refresh_memory();
        (to_i64(sys.free_memory()), to_i64(sys.total_memory()))
    }

    fn filesystem(path: &Path, query: fn(&Path) -> std::io::Result<u64>, what: &str) -> i64 {
        match query(path) {
            Ok(v) => to_i64(v),
            Err(e) => {
                debug!(path = %path.display(), error = %e, query = what, "Filesystem query failed");
                0
            }
        }
    }

    pub fn filesystem_total(path: &Path) -> i64 {
        filesystem(path, |p| fs2::total_space(p), "total")
    }

    pub fn filesystem_free(path: &Path) -> i64 {
        filesystem(path, |p| fs2::free_space(p), "free")
    }

    pub fn filesystem_available(path: &Path) -> i64 {
        filesystem(path, |p| fs2::available_space(p), "available")
    }
}

#[cfg(not(all(
    feature = "stats",
    any(
        target_os = "linux",
        target_os = "android",
        target_os = "macos",
        target_os = "ios",
        target_os = "windows",
        target_os = "freebsd"
    )
)))]
mod platform {
    use std::path::Path;

    pub fn process_memory() -> (i64, i64) {
        (0, 0)
    }

    pub fn system_memory() -> (i64, i64) {
        (0, 0)
    }

    pub fn filesystem_total(_path: &Path) -> i64 {
        0
    }

    pub fn filesystem_free(_path: &Path) -> i64 {
        0
    }

    pub fn filesystem_available(_path: &Path) -> i64 {
        0
    }
}
