//! Optional host subsystems whose presence gates parts of the menu bar.
//!
//! The host exposes its modules by name. [`ResolvedCapabilities::resolve`] performs exactly one
//! lookup per well-known [`Capability`] and keeps the returned handles for the lifetime of a
//! single menu build; nothing re-queries the registry afterwards.

use anyhow::{bail, Result};
use bitflags::bitflags;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Capability {
    SceneStructure,
    EcEditor,
    DebugStats,
    MumbleVoip,
    CaveStereo,
}

impl Capability {
    /// Declaration order. Resolution and menu emission both follow it.
    pub const ALL: [Capability; 5] = [
        Capability::SceneStructure,
        Capability::EcEditor,
        Capability::DebugStats,
        Capability::MumbleVoip,
        Capability::CaveStereo,
    ];

    /// Any one of these makes the Settings section appear.
    pub const SETTINGS_TRIGGERS: [Capability; 3] =
        [Capability::MumbleVoip, Capability::CaveStereo, Capability::EcEditor];

    pub fn module_name(self) -> &'static str {
        match self {
            Capability::SceneStructure => "SceneStructure",
            Capability::EcEditor => "ECEditor",
            Capability::DebugStats => "DebugStats",
            Capability::MumbleVoip => "MumbleVoip",
            Capability::CaveStereo => "CAVEStereo",
        }
    }

    pub fn from_module_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|capability| capability.module_name().eq_ignore_ascii_case(name))
    }

    pub fn flag(self) -> CapabilityFlags {
        match self {
            Capability::SceneStructure => CapabilityFlags::SCENE_STRUCTURE,
            Capability::EcEditor => CapabilityFlags::EC_EDITOR,
            Capability::DebugStats => CapabilityFlags::DEBUG_STATS,
            Capability::MumbleVoip => CapabilityFlags::MUMBLE_VOIP,
            Capability::CaveStereo => CapabilityFlags::CAVE_STEREO,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.module_name())
    }
}

bitflags! {
    /// Compact presence set, handy for enumerating every combination of optional modules.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CapabilityFlags: u8 {
        const SCENE_STRUCTURE = 1 << 0;
        const EC_EDITOR = 1 << 1;
        const DEBUG_STATS = 1 << 2;
        const MUMBLE_VOIP = 1 << 3;
        const CAVE_STEREO = 1 << 4;
    }
}

impl CapabilityFlags {
    pub fn capabilities(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |capability| self.contains(capability.flag()))
    }

    /// Parses `all`, `none` or a comma separated list of module names.
    pub fn parse_list(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => return Ok(Self::all()),
            "" | "none" => return Ok(Self::empty()),
            _ => {}
        }
        let mut flags = Self::empty();
        for name in value.split(',').map(str::trim).filter(|name| !name.is_empty()) {
            let Some(capability) = Capability::from_module_name(name) else {
                bail!(
                    "Unknown capability '{name}'. Known capabilities: {}.",
                    Capability::ALL.map(Capability::module_name).join(", ")
                );
            };
            flags |= capability.flag();
        }
        Ok(flags)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModuleCommand {
    ToggleAssetsWindow,
    ToggleSceneWindow,
    ToggleKeyBindingsWindow,
    ShowEditorWindow,
    ShowProfilerWindow,
    ToggleVoiceSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EditorSetting {
    GizmoEnabled,
    HighlightingEnabled,
}

/// The narrow surface a host module exposes to the menu bar.
pub trait CapabilityModule {
    fn invoke(&self, command: ModuleCommand) -> Result<()>;

    /// Live value of a boolean setting, `None` when the module has no such setting.
    fn setting(&self, _setting: EditorSetting) -> Option<bool> {
        None
    }

    fn set_setting(&self, setting: EditorSetting, _value: bool) -> Result<()> {
        bail!("module does not expose setting {setting:?}")
    }
}

pub type CapabilityHandle = Rc<dyn CapabilityModule>;

pub trait CapabilityRegistry {
    fn lookup(&self, name: &str) -> Option<CapabilityHandle>;
}

/// In-memory registry keyed by module name.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<String, CapabilityHandle>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self { modules: BTreeMap::new() }
    }

    pub fn register(&mut self, name: impl Into<String>, module: CapabilityHandle) {
        self.modules.insert(name.into(), module);
    }

    pub fn register_capability(&mut self, capability: Capability, module: CapabilityHandle) {
        self.register(capability.module_name(), module);
    }
}

impl CapabilityRegistry for ModuleRegistry {
    fn lookup(&self, name: &str) -> Option<CapabilityHandle> {
        self.modules.get(name).cloned()
    }
}

/// Handles for the capabilities that were present when the menu was built.
#[derive(Clone, Default)]
pub struct ResolvedCapabilities {
    handles: BTreeMap<Capability, CapabilityHandle>,
}

impl ResolvedCapabilities {
    pub fn resolve(registry: &dyn CapabilityRegistry) -> Self {
        let handles = Capability::ALL
            .into_iter()
            .filter_map(|capability| registry.lookup(capability.module_name()).map(|handle| (capability, handle)))
            .collect();
        Self { handles }
    }

    pub fn handle(&self, capability: Capability) -> Option<&CapabilityHandle> {
        self.handles.get(&capability)
    }

    pub fn is_present(&self, capability: Capability) -> bool {
        self.handles.contains_key(&capability)
    }

    pub fn any_of(&self, capabilities: &[Capability]) -> bool {
        capabilities.iter().any(|capability| self.is_present(*capability))
    }

    pub fn flags(&self) -> CapabilityFlags {
        self.handles.keys().fold(CapabilityFlags::empty(), |flags, capability| flags | capability.flag())
    }
}

impl fmt::Debug for ResolvedCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handles.keys()).finish()
    }
}
