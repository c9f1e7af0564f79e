//! Memory and storage statistics plus paged inspection of memory-mapped files.
//!
//! - [`io::MappedFile`] owns a read-only mapping released exactly once.
//! - [`view::WindowedView`] renders a page of a mapped file as an address/hex/text dump.
//! - [`stats::StatProvider`] reads process, system and filesystem counters.

pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod stats;
pub mod view;

pub use config::{AcquireConfig, MemsightConfig, StatsConfig, ViewerConfig};
pub use error::{MemsightError, Result};
pub use io::error::OpenError;
pub use io::{MappedFile, OpenMode};
pub use stats::{NativeStats, StatProvider, StatSnapshot};
pub use view::WindowedView;
