//! Staging of resources that cannot be mapped in place.
//!
//! Packaged assets (for example an entry inside an archive addressed as
//! `jar:file://<archive>!/<entry>`) must be fetched and written to a local file
//! before they can be mapped. The fetch runs asynchronously and is not retried;
//! any failure along the way is reported as `OpenError::Acquisition`.

use crate::config::AcquireConfig;
use crate::io::error::{OpenError, Result};
use crate::io::MappedFile;
use bytes::Bytes;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::time::timeout;
use tracing::{debug, info};

const PACKAGED_PREFIX: &str = "jar:file://";
const PACKAGED_SEPARATOR: &str = "!/";

/// Where a resource lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLocation {
    /// A plain filesystem path that can be mapped directly.
    File(PathBuf),
    /// An entry inside a packaged archive; must be staged before mapping.
    Packaged { archive: PathBuf, entry: String },
}

impl AssetLocation {
    pub fn parse(location: &str) -> Self {
        if let Some(rest) = location.strip_prefix(PACKAGED_PREFIX) {
            if let Some((archive, entry)) = rest.split_once(PACKAGED_SEPARATOR) {
                return AssetLocation::Packaged {
                    archive: PathBuf::from(archive),
                    entry: entry.to_string(),
                };
            }
        }
        AssetLocation::File(PathBuf::from(location))
    }

    /// Whether the location can be handed straight to `MappedFile::open`.
    pub fn is_mappable(&self) -> bool {
        matches!(self, AssetLocation::File(_))
    }
}

impl fmt::Display for AssetLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetLocation::File(path) => write!(f, "{}", path.display()),
            AssetLocation::Packaged { archive, entry } => write!(
                f,
                "{PACKAGED_PREFIX}{}{PACKAGED_SEPARATOR}{entry}",
                archive.display()
            ),
        }
    }
}

/// Retrieves the full contents of a resource.
pub trait Fetch {
    fn fetch(&self, location: &AssetLocation) -> impl Future<Output = std::io::Result<Bytes>> + Send;
}

/// Fetches plain files from the local filesystem.
///
/// Packaged locations are rejected; hosts that ship archives supply their own `Fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFetcher;

impl Fetch for LocalFetcher {
    fn fetch(&self, location: &AssetLocation) -> impl Future<Output = std::io::Result<Bytes>> + Send {
        let location = location.clone();
        async move {
            match location {
                AssetLocation::File(path) => Ok(Bytes::from(tokio::fs::read(path).await?)),
                AssetLocation::Packaged { .. } => Err(std::io::Error::new(
                    std::io::ErrorKind::Unsupported,
                    "packaged resources need an archive-aware fetcher",
                )),
            }
        }
    }
}

fn acquisition_error(location: &AssetLocation, reason: impl Into<String>) -> OpenError {
    crate::log_error!(
        OpenError::Acquisition {
            location: location.to_string(),
            reason: reason.into(),
        },
        "acquire"
    )
}

/// Makes `location` available as a local file and returns its path.
///
/// Mappable locations are returned unchanged without fetching.
pub async fn acquire<F: Fetch>(
    fetcher: &F,
    location: &AssetLocation,
    staging_dir: &Path,
    config: &AcquireConfig,
) -> Result<PathBuf> {
    let entry = match location {
        AssetLocation::File(path) => return Ok(path.clone()),
        AssetLocation::Packaged { entry, .. } => entry,
    };

    let file_name = Path::new(entry)
        .file_name()
        .ok_or_else(|| acquisition_error(location, "entry has no file name"))?;
    let dest = staging_dir.join(file_name);

    debug!(
        location = %location,
        dest = %dest.display(),
        timeout_secs = config.timeout_secs,
        "Staging packaged resource"
    );

    let data = match timeout(config.timeout(), fetcher.fetch(location)).await {
        Ok(Ok(data)) => data,
        Ok(Err(e)) => return Err(acquisition_error(location, e.to_string())),
        Err(_) => {
            return Err(acquisition_error(
                location,
                format!("timed out after {}s", config.timeout_secs),
            ))
        }
    };

    tokio::fs::create_dir_all(staging_dir)
        .await
        .map_err(|e| acquisition_error(location, e.to_string()))?;
    tokio::fs::write(&dest, &data)
        .await
        .map_err(|e| acquisition_error(location, e.to_string()))?;

    info!(location = %location, size = data.len(), "Staged packaged resource");
    Ok(dest)
}

/// Stages `location` if needed, then maps it.
pub async fn acquire_and_open<F: Fetch>(
    fetcher: &F,
    location: &AssetLocation,
    staging_dir: &Path,
    config: &AcquireConfig,
) -> Result<MappedFile> {
    let path = acquire(fetcher, location, staging_dir, config).await?;
    MappedFile::open(path)
}
