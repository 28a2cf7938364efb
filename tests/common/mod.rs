#![allow(dead_code)]

use anyhow::{anyhow, bail, Result};
use kestrel_menubar::cache::{CacheEntries, DiskAssetCache};
use kestrel_menubar::capabilities::{
    Capability, CapabilityFlags, CapabilityModule, EditorSetting, ModuleCommand, ModuleRegistry,
};
use kestrel_menubar::host::{AssetCache, Dialogs, HostServices, HostSession, SceneHost};
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Default)]
pub struct FakeModule {
    pub invoked: RefCell<Vec<ModuleCommand>>,
    pub gizmo: Cell<bool>,
    pub highlighting: Cell<bool>,
}

impl CapabilityModule for FakeModule {
    fn invoke(&self, command: ModuleCommand) -> Result<()> {
        self.invoked.borrow_mut().push(command);
        Ok(())
    }

    fn setting(&self, setting: EditorSetting) -> Option<bool> {
        Some(match setting {
            EditorSetting::GizmoEnabled => self.gizmo.get(),
            EditorSetting::HighlightingEnabled => self.highlighting.get(),
        })
    }

    fn set_setting(&self, setting: EditorSetting, value: bool) -> Result<()> {
        match setting {
            EditorSetting::GizmoEnabled => self.gizmo.set(value),
            EditorSetting::HighlightingEnabled => self.highlighting.set(value),
        }
        Ok(())
    }
}

pub fn registry_with(flags: CapabilityFlags) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    for capability in flags.capabilities() {
        registry.register_capability(capability, Rc::new(FakeModule::default()));
    }
    registry
}

pub fn registry_with_module(capability: Capability, module: Rc<FakeModule>) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry.register_capability(capability, module);
    registry
}

pub struct RecordingDialogs {
    pub main_window: bool,
    pub answer: Cell<bool>,
    pub selection: RefCell<Option<PathBuf>>,
    pub confirms: RefCell<Vec<String>>,
    /// (title, directory, filter) of every file dialog shown.
    pub file_requests: RefCell<Vec<(String, PathBuf, String)>>,
    pub infos: RefCell<Vec<(String, String)>>,
    pub urls: RefCell<Vec<String>>,
}

impl RecordingDialogs {
    pub fn new(main_window: bool) -> Self {
        Self {
            main_window,
            answer: Cell::new(true),
            selection: RefCell::new(None),
            confirms: RefCell::new(Vec::new()),
            file_requests: RefCell::new(Vec::new()),
            infos: RefCell::new(Vec::new()),
            urls: RefCell::new(Vec::new()),
        }
    }
}

impl Dialogs for RecordingDialogs {
    fn has_main_window(&self) -> bool {
        self.main_window
    }

    fn confirm(&self, title: &str, _text: &str) -> bool {
        self.confirms.borrow_mut().push(title.to_string());
        self.answer.get()
    }

    fn information(&self, title: &str, text: &str) {
        self.infos.borrow_mut().push((title.to_string(), text.to_string()));
    }

    fn open_file(&self, title: &str, directory: &Path, filter: &str) -> Option<PathBuf> {
        self.file_requests.borrow_mut().push((title.to_string(), directory.to_path_buf(), filter.to_string()));
        self.selection.borrow().clone()
    }

    fn open_url(&self, url: &str) -> Result<()> {
        self.urls.borrow_mut().push(url.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeScenes {
    pub active: RefCell<Option<String>>,
    pub created: RefCell<Vec<String>>,
    pub environments: RefCell<Vec<(String, String, bool)>>,
    pub storages: RefCell<Vec<PathBuf>>,
    pub loaded: RefCell<Vec<(String, PathBuf)>>,
}

impl FakeScenes {
    pub fn with_active(name: &str) -> Self {
        Self { active: RefCell::new(Some(name.to_string())), ..Self::default() }
    }
}

impl SceneHost for FakeScenes {
    fn has_active_scene(&self) -> bool {
        self.active.borrow().is_some()
    }

    fn create_scene(&self, name: &str) -> Result<()> {
        self.created.borrow_mut().push(name.to_string());
        *self.active.borrow_mut() = Some(name.to_string());
        Ok(())
    }

    fn spawn_environment(&self, scene: &str, entity_name: &str, sky_enabled: bool) -> Result<()> {
        self.environments.borrow_mut().push((scene.to_string(), entity_name.to_string(), sky_enabled));
        Ok(())
    }

    fn adopt_asset_storage(&self, path: &Path) -> Result<()> {
        self.storages.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn load_scene(&self, scene: &str, path: &Path) -> Result<()> {
        self.loaded.borrow_mut().push((scene.to_string(), path.to_path_buf()));
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeSession {
    pub logouts: Cell<usize>,
    pub exits: Cell<usize>,
    pub fail_logout: Cell<bool>,
}

impl HostSession for FakeSession {
    fn logout(&self) -> Result<()> {
        if self.fail_logout.get() {
            bail!("not connected");
        }
        self.logouts.set(self.logouts.get() + 1);
        Ok(())
    }

    fn save_screenshot(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("/tmp/screenshot.png"))
    }

    fn exit(&self) {
        self.exits.set(self.exits.get() + 1);
    }

    fn config_folder(&self) -> PathBuf {
        PathBuf::from("/home/user/.config/tundra")
    }

    fn working_directory(&self) -> PathBuf {
        PathBuf::from("/home/user/scenes")
    }
}

/// Disk cache whose enumeration fails on entry `fail_at` (zero based).
pub struct FlakyCache {
    pub inner: DiskAssetCache,
    pub fail_at: usize,
}

impl AssetCache for FlakyCache {
    fn cache_directory(&self) -> Option<PathBuf> {
        self.inner.cache_directory()
    }

    fn entries(&self, directory: &Path) -> Result<CacheEntries> {
        let fail_at = self.fail_at;
        let entries = self.inner.entries(directory)?;
        Ok(Box::new(entries.enumerate().map(move |(index, entry)| {
            if index == fail_at {
                Err(anyhow!("permission denied on entry {index}"))
            } else {
                entry
            }
        })))
    }

    fn purge(&self) -> Result<()> {
        self.inner.purge()
    }
}

pub struct Harness {
    pub dialogs: Rc<RecordingDialogs>,
    pub scenes: Rc<FakeScenes>,
    pub session: Rc<FakeSession>,
    pub cache: Rc<dyn AssetCache>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_cache(Rc::new(DiskAssetCache::disabled()))
    }

    pub fn with_cache(cache: Rc<dyn AssetCache>) -> Self {
        Self {
            dialogs: Rc::new(RecordingDialogs::new(true)),
            scenes: Rc::new(FakeScenes::default()),
            session: Rc::new(FakeSession::default()),
            cache,
        }
    }

    pub fn services(&self) -> HostServices {
        HostServices {
            dialogs: self.dialogs.clone(),
            scenes: self.scenes.clone(),
            session: self.session.clone(),
            cache: self.cache.clone(),
        }
    }
}

/// Writes `sizes.len()` files into `dir` and returns their total size.
pub fn fill_cache(dir: &Path, sizes: &[usize]) -> u64 {
    for (index, size) in sizes.iter().enumerate() {
        fs::write(dir.join(format!("asset_{index}.bin")), vec![0u8; *size]).expect("write cache file");
    }
    sizes.iter().map(|size| *size as u64).sum()
}

pub fn dir_is_empty(dir: &Path) -> bool {
    fs::read_dir(dir).map(|mut entries| entries.next().is_none()).unwrap_or(true)
}
