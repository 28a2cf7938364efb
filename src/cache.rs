//! Asset cache inventory and purge.
//!
//! The inventory only feeds the summary shown to the user. A failure while enumerating degrades
//! the summary to [`CacheInventory::Unavailable`]; the purge always runs afterwards.
//!
//! Enumeration is synchronous and runs on the UI thread, so very large caches stall the UI for the
//! duration of the walk. There is no cancellation.

use crate::host::{AssetCache, Dialogs};
use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info};

pub const CACHE_CLEARED_TITLE: &str = "Cache Cleared";
pub const INVENTORY_UNAVAILABLE_MESSAGE: &str =
    "Errors occurred while calculating cache file information. Cache cleared.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub is_file: bool,
    pub exists: bool,
    pub size: u64,
}

pub type CacheEntries = Box<dyn Iterator<Item = Result<CacheEntry>>>;

/// Lists `directory` one level deep, reading metadata lazily per entry.
///
/// Symlinks are classified by their target. A link whose target is gone does not exist.
pub fn read_cache_dir(directory: &Path) -> Result<CacheEntries> {
    let iter = fs::read_dir(directory)
        .with_context(|| format!("Failed to list cache directory {}", directory.display()))?;
    Ok(Box::new(iter.map(|entry| {
        let path = entry.context("Failed to read cache directory entry")?.path();
        match fs::metadata(&path) {
            Ok(metadata) => Ok(CacheEntry { exists: true, is_file: metadata.is_file(), size: metadata.len() }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Ok(CacheEntry { exists: false, is_file: false, size: 0 })
            }
            Err(err) => Err(err).with_context(|| format!("Failed to read metadata of {}", path.display())),
        }
    })))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheInventory {
    Known { file_count: u64, total_bytes: u64 },
    /// Enumeration failed part-way; partial counts are discarded, not reported.
    Unavailable,
}

impl CacheInventory {
    pub fn take(cache: &dyn AssetCache, directory: &Path) -> Self {
        let entries = match cache.entries(directory) {
            Ok(entries) => entries,
            Err(err) => {
                error!(target: "menubar::cache", "Failed to iterate files in cache: {err:#}");
                return CacheInventory::Unavailable;
            }
        };
        let mut file_count = 0u64;
        let mut total_bytes = 0u64;
        for entry in entries {
            match entry {
                Ok(entry) => {
                    if entry.is_file && entry.exists {
                        file_count = file_count.saturating_add(1);
                        total_bytes = total_bytes.saturating_add(entry.size);
                    }
                }
                Err(err) => {
                    error!(target: "menubar::cache", "Failed to iterate files in cache: {err:#}");
                    return CacheInventory::Unavailable;
                }
            }
        }
        CacheInventory::Known { file_count, total_bytes }
    }

    pub fn file_count(self) -> Option<u64> {
        match self {
            CacheInventory::Known { file_count, .. } => Some(file_count),
            CacheInventory::Unavailable => None,
        }
    }

    /// Total size in megabytes rounded to two decimals.
    pub fn megabytes(self) -> Option<f64> {
        match self {
            CacheInventory::Known { total_bytes, .. } => {
                let megabytes = total_bytes as f64 / 1024.0 / 1024.0;
                Some((megabytes * 100.0).round() / 100.0)
            }
            CacheInventory::Unavailable => None,
        }
    }

    pub fn summary(self) -> String {
        match (self.file_count(), self.megabytes()) {
            (Some(count), Some(megabytes)) => {
                format!("Cleared {count} files with total size of {megabytes:.2} MB from asset cache.")
            }
            _ => INVENTORY_UNAVAILABLE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheClearReport {
    pub inventory: CacheInventory,
    pub message: String,
    /// Whether the summary was also shown in a dialog.
    pub notified: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CacheClearOutcome {
    /// No cache directory configured.
    Skipped,
    /// The purge itself failed; nothing was reported to the user.
    PurgeFailed(String),
    Cleared(CacheClearReport),
}

pub fn clear_cache(cache: &dyn AssetCache, dialogs: &dyn Dialogs) -> CacheClearOutcome {
    let Some(directory) = cache.cache_directory().filter(|dir| !dir.as_os_str().is_empty()) else {
        return CacheClearOutcome::Skipped;
    };

    let inventory = CacheInventory::take(cache, &directory);

    if let Err(err) = cache.purge() {
        error!(target: "menubar::cache", "Failed to clear asset cache {}: {err:#}", directory.display());
        return CacheClearOutcome::PurgeFailed(format!("{err:#}"));
    }

    let message = inventory.summary();
    info!(target: "menubar::cache", "{message}");

    let notified = dialogs.has_main_window();
    if notified {
        dialogs.information(CACHE_CLEARED_TITLE, &message);
    }
    CacheClearOutcome::Cleared(CacheClearReport { inventory, message, notified })
}

/// Disk backed cache rooted at a single directory.
#[derive(Debug, Clone, Default)]
pub struct DiskAssetCache {
    directory: Option<PathBuf>,
}

impl DiskAssetCache {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: Some(directory.into()) }
    }

    pub fn disabled() -> Self {
        Self { directory: None }
    }
}

impl AssetCache for DiskAssetCache {
    fn cache_directory(&self) -> Option<PathBuf> {
        self.directory.clone()
    }

    fn purge(&self) -> Result<()> {
        let Some(directory) = &self.directory else {
            return Ok(());
        };
        let iter = match fs::read_dir(directory) {
            Ok(iter) => iter,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("Failed to list cache directory {}", directory.display()));
            }
        };
        for entry in iter {
            let entry = entry.context("Failed to read cache directory entry")?;
            let path = entry.path();
            // Links are removed, never followed.
            let is_dir = entry.file_type().map(|kind| kind.is_dir()).unwrap_or(false);
            if is_dir {
                fs::remove_dir_all(&path).with_context(|| format!("Failed to remove {}", path.display()))?;
            } else {
                fs::remove_file(&path).with_context(|| format!("Failed to remove {}", path.display()))?;
            }
        }
        Ok(())
    }
}
