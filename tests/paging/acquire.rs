//! Integration tests for staging packaged resources before mapping.

use bytes::Bytes;
use memsight::io::acquire::{acquire, acquire_and_open, AssetLocation, Fetch, LocalFetcher};
use memsight::{AcquireConfig, OpenError, WindowedView};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use crate::common::test_utils::*;

/// Serves packaged entries from memory.
struct MemoryFetcher {
    entries: HashMap<String, Bytes>,
}

impl Fetch for MemoryFetcher {
    fn fetch(&self, location: &AssetLocation) -> impl Future<Output = std::io::Result<Bytes>> + Send {
        let found = match location {
            AssetLocation::Packaged { entry, .. } => self.entries.get(entry).cloned(),
            AssetLocation::File(_) => None,
        };
        async move {
            found.ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no such entry"))
        }
    }
}

/// Never completes.
struct StalledFetcher;

impl Fetch for StalledFetcher {
    fn fetch(&self, _location: &AssetLocation) -> impl Future<Output = std::io::Result<Bytes>> + Send {
        async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Bytes::new())
        }
    }
}

fn fetcher_with(entry: &str, data: &'static [u8]) -> MemoryFetcher {
    let mut entries = HashMap::new();
    entries.insert(entry.to_string(), Bytes::from_static(data));
    MemoryFetcher { entries }
}

#[tokio::test]
async fn test_plain_path_is_not_fetched() {
    let file = create_temp_file(b"direct");
    let location = AssetLocation::File(file.path().to_path_buf());
    let staging = tempfile::tempdir().unwrap();
    let path = acquire(&StalledFetcher, &location, staging.path(), &AcquireConfig::default())
        .await
        .unwrap();
    assert_eq!(path, file.path());
}

#[tokio::test]
async fn test_packaged_entry_is_staged_and_mapped() {
    let fetcher = fetcher_with("assets/blob.bin", b"packaged bytes");
    let location = AssetLocation::parse("jar:file:///app/base.apk!/assets/blob.bin");
    let staging = tempfile::tempdir().unwrap();

    let mapped = acquire_and_open(&fetcher, &location, staging.path(), &AcquireConfig::default())
        .await
        .unwrap();
    assert_eq!(mapped.bytes(), b"packaged bytes");
    assert_eq!(mapped.path(), staging.path().join("blob.bin"));

    let mut view = WindowedView::with_defaults(&mapped);
    assert!(view.render().contains("| packaged bytes\n"));
}

#[tokio::test]
async fn test_missing_entry_is_acquisition_error() {
    let fetcher = fetcher_with("assets/other.bin", b"x");
    let location = AssetLocation::parse("jar:file:///app/base.apk!/assets/blob.bin");
    let staging = tempfile::tempdir().unwrap();
    let result = acquire_and_open(&fetcher, &location, staging.path(), &AcquireConfig::default()).await;
    match result {
        Err(OpenError::Acquisition { location, reason }) => {
            assert_eq!(location, "jar:file:///app/base.apk!/assets/blob.bin");
            assert!(reason.contains("no such entry"));
        }
        other => panic!("expected Acquisition, got {:?}", other.map(|m| m.len())),
    }
    assert!(!staging.path().join("blob.bin").exists());
}

#[tokio::test(start_paused = true)]
async fn test_stalled_fetch_times_out() {
    let location = AssetLocation::parse("jar:file:///app/base.apk!/assets/blob.bin");
    let staging = tempfile::tempdir().unwrap();
    let config = AcquireConfig { timeout_secs: 5 };
    let result = acquire(&StalledFetcher, &location, staging.path(), &config).await;
    assert!(matches!(result, Err(OpenError::Acquisition { reason, .. }) if reason.contains("timed out")));
}

#[tokio::test]
async fn test_local_fetcher_reads_files() {
    let file = create_temp_file(b"local");
    let location = AssetLocation::File(file.path().to_path_buf());
    let data = LocalFetcher.fetch(&location).await.unwrap();
    assert_eq!(&data[..], b"local");
}
