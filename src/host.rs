//! Collaborator interfaces the menu bar consumes from the hosting application.

use crate::cache::{read_cache_dir, CacheEntries};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Modal dialogs. Every call blocks the UI thread until the user dismisses the dialog.
pub trait Dialogs {
    /// False when running without a main window; informational popups are skipped then.
    fn has_main_window(&self) -> bool;
    /// Yes/No question; true only on an explicit "Yes".
    fn confirm(&self, title: &str, text: &str) -> bool;
    fn information(&self, title: &str, text: &str);
    /// `None` (or an empty path) when the user cancels.
    fn open_file(&self, title: &str, directory: &Path, filter: &str) -> Option<PathBuf>;
    fn open_url(&self, url: &str) -> Result<()>;
}

pub trait SceneHost {
    fn has_active_scene(&self) -> bool;
    fn create_scene(&self, name: &str) -> Result<()>;
    /// Adds a named entity carrying a sky component to `scene`.
    fn spawn_environment(&self, scene: &str, entity_name: &str, sky_enabled: bool) -> Result<()>;
    /// Registers the asset storage described next to `path` as the default storage.
    fn adopt_asset_storage(&self, path: &Path) -> Result<()>;
    fn load_scene(&self, scene: &str, path: &Path) -> Result<()>;
}

pub trait HostSession {
    fn logout(&self) -> Result<()>;
    /// Renders the main camera to disk and returns the image path.
    fn save_screenshot(&self) -> Result<PathBuf>;
    fn exit(&self);
    fn config_folder(&self) -> PathBuf;
    fn working_directory(&self) -> PathBuf;
}

pub trait AssetCache {
    /// `None` when the host runs without a disk cache.
    fn cache_directory(&self) -> Option<PathBuf>;

    fn entries(&self, directory: &Path) -> Result<CacheEntries> {
        read_cache_dir(directory)
    }

    /// Deletes the cache contents.
    fn purge(&self) -> Result<()>;
}

/// Everything the action handlers reach out to.
#[derive(Clone)]
pub struct HostServices {
    pub dialogs: Rc<dyn Dialogs>,
    pub scenes: Rc<dyn SceneHost>,
    pub session: Rc<dyn HostSession>,
    pub cache: Rc<dyn AssetCache>,
}
