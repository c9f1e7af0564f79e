//! Text formatting of statistics for the display sink.

use crate::stats::StatSnapshot;
use std::fmt::Write as _;

const BYTES_PER_KILOBYTE: i64 = 1000;
const BYTES_PER_MEGABYTE: i64 = 1000 * 1000;

/// Formats a byte count as decimal megabytes with one truncated decimal, e.g. `12.3MB`.
pub fn format_megabytes(bytes: i64) -> String {
    let bytes = bytes.max(0);
    format!(
        "{}.{}MB",
        bytes / BYTES_PER_MEGABYTE,
        (bytes % BYTES_PER_MEGABYTE) / (BYTES_PER_MEGABYTE / 10)
    )
}

/// Multi-line summary of a snapshot.
pub fn format_snapshot(snapshot: &StatSnapshot) -> String {
    let mut out = String::new();
    let rows = [
        ("Heap", snapshot.heap_allocated),
        ("Resident", snapshot.process_resident),
        ("Virtual", snapshot.process_virtual),
        ("System free", snapshot.system_free),
        ("System total", snapshot.system_total),
        ("Disk total", snapshot.filesystem_total),
        ("Disk free", snapshot.filesystem_free),
        ("Disk available", snapshot.filesystem_available),
    ];
    for (name, bytes) in rows {
        let _ = writeln!(out, "{name}: {}", format_megabytes(bytes));
    }
    let _ = writeln!(out, "Disk path: {}", snapshot.filesystem_path.display());
    out
}

/// Resident memory readout that only reformats when the value changes.
///
/// Changes are detected at kilobyte granularity so small fluctuations do
/// not cause a redraw.
#[derive(Debug, Clone, Default)]
pub struct ResidentMeter {
    last_kilobytes: Option<i64>,
    text: String,
}

impl ResidentMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a new reading. Returns the new text if it changed, else `None`.
    pub fn update(&mut self, bytes: i64) -> Option<&str> {
        let bytes = bytes.max(0);
        let kilobytes = (bytes + BYTES_PER_KILOBYTE - 1) / BYTES_PER_KILOBYTE;
        if self.last_kilobytes == Some(kilobytes) {
            return None;
        }
        self.last_kilobytes = Some(kilobytes);
        self.text = format_megabytes(bytes);
        Some(&self.text)
    }

    /// The most recent text, empty before the first reading.
    pub fn text(&self) -> &str {
        &self.text
    }
}
