//! Builds the menu bar from the capabilities present at startup.

use crate::actions::{MenuCommand, ToggleCommand};
use crate::capabilities::{
    Capability, CapabilityRegistry, EditorSetting, ModuleCommand, ResolvedCapabilities,
};
use crate::config::MenuBarConfig;
use crate::menu::{ActionId, MenuBar};
use anyhow::{bail, Result};
use tracing::debug;

pub const VIEW_MENU_NAME: &str = "ViewMenu";
pub const SETTINGS_MENU_NAME: &str = "SettingsMenu";

const DISCONNECT_ICON: &str = "disconnect.ico";
const QUIT_ICON: &str = "system-shutdown.ico";
const BROWSER_ICON: &str = "browser.ico";

/// View entries in emission order. A capability may contribute several entries.
const VIEW_ENTRIES: &[(Capability, &str, ModuleCommand)] = &[
    (Capability::SceneStructure, "Assets", ModuleCommand::ToggleAssetsWindow),
    (Capability::SceneStructure, "Scene", ModuleCommand::ToggleSceneWindow),
    (Capability::SceneStructure, "Key Bindings", ModuleCommand::ToggleKeyBindingsWindow),
    (Capability::EcEditor, "EC Editor", ModuleCommand::ShowEditorWindow),
    (Capability::DebugStats, "Profiler", ModuleCommand::ShowProfilerWindow),
];

const EDITOR_TOGGLES: &[(&str, EditorSetting)] = &[
    ("Show editing gizmo", EditorSetting::GizmoEnabled),
    ("Highlight selected entities", EditorSetting::HighlightingEnabled),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionRole {
    /// Connects outward to a remote server.
    #[default]
    Client,
    /// Hosts the scene itself.
    Server,
}

impl ConnectionRole {
    pub fn is_client(self) -> bool {
        self == ConnectionRole::Client
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "client" => Ok(ConnectionRole::Client),
            "server" | "host" => Ok(ConnectionRole::Server),
            other => bail!("Invalid role '{other}'. Use client or server."),
        }
    }
}

/// Ids of the actions whose enablement follows the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuLayout {
    pub screenshot: ActionId,
    /// Only emitted in the client role.
    pub disconnect: Option<ActionId>,
}

pub struct AssembledMenu {
    pub layout: MenuLayout,
    pub capabilities: ResolvedCapabilities,
}

pub struct MenuAssembler<'a> {
    config: &'a MenuBarConfig,
}

impl<'a> MenuAssembler<'a> {
    pub fn new(config: &'a MenuBarConfig) -> Self {
        Self { config }
    }

    /// Resolves capabilities and assembles `root`. Without a registry (headless) nothing is built
    /// and `root` is left untouched.
    pub fn build(
        &self,
        root: &mut MenuBar,
        registry: Option<&dyn CapabilityRegistry>,
        role: ConnectionRole,
    ) -> Option<AssembledMenu> {
        let Some(registry) = registry else {
            debug!(target: "menubar::assembler", "Headless mode, skipping menu bar");
            return None;
        };
        let capabilities = ResolvedCapabilities::resolve(registry);
        let layout = self.assemble(root, &capabilities, role);
        Some(AssembledMenu { layout, capabilities })
    }

    /// Replaces whatever `root` held with a freshly built menu.
    pub fn assemble(&self, root: &mut MenuBar, capabilities: &ResolvedCapabilities, role: ConnectionRole) -> MenuLayout {
        root.clear();
        let layout = self.file_menu(root, role);
        self.view_menu(root, capabilities);
        self.settings_menu(root, capabilities);
        self.help_menu(root);
        debug!(
            target: "menubar::assembler",
            "Menu bar assembled: {:?} role={role:?} capabilities={capabilities:?}",
            root.menu_labels()
        );
        layout
    }

    fn file_menu(&self, root: &mut MenuBar, role: ConnectionRole) -> MenuLayout {
        let mut file = root.add_menu("&File");
        file.add_trigger("New scene", MenuCommand::NewScene);
        file.add_trigger("Open scene", MenuCommand::OpenScene);
        file.add_separator();
        let screenshot = file.next_action_id();
        file.add_trigger("Take Screenshot", MenuCommand::TakeScreenshot).disabled();
        file.add_separator();
        file.add_trigger("Clear Asset Cache", MenuCommand::ClearAssetCache);
        file.add_separator();
        let disconnect = if role.is_client() {
            let id = file.next_action_id();
            file.add_trigger("Disconnect", MenuCommand::Disconnect)
                .with_icon(self.config.icon(DISCONNECT_ICON))
                .disabled();
            Some(id)
        } else {
            None
        };
        file.add_trigger("Quit", MenuCommand::Quit).with_icon(self.config.icon(QUIT_ICON));

        MenuLayout { screenshot, disconnect }
    }

    fn view_menu(&self, root: &mut MenuBar, capabilities: &ResolvedCapabilities) {
        let mut view = root.add_menu("&View");
        view.set_object_name(VIEW_MENU_NAME);
        for (capability, label, command) in VIEW_ENTRIES {
            if capabilities.is_present(*capability) {
                view.add_trigger(*label, MenuCommand::Module(*capability, *command));
            }
        }
    }

    fn settings_menu(&self, root: &mut MenuBar, capabilities: &ResolvedCapabilities) {
        if !capabilities.any_of(&Capability::SETTINGS_TRIGGERS) {
            return;
        }
        let mut settings = root.add_menu("&Settings");
        settings.set_object_name(SETTINGS_MENU_NAME);
        settings.add_trigger("Open config folder", MenuCommand::OpenConfigFolder);

        if capabilities.is_present(Capability::MumbleVoip) {
            settings.add_trigger(
                "Voice settings",
                MenuCommand::Module(Capability::MumbleVoip, ModuleCommand::ToggleVoiceSettings),
            );
        }

        if let Some(editor) = capabilities.handle(Capability::EcEditor) {
            for (label, setting) in EDITOR_TOGGLES {
                let checked = editor.setting(*setting).unwrap_or(false);
                settings.add_toggle(*label, ToggleCommand::Editor(*setting), checked);
            }
        }
    }

    fn help_menu(&self, root: &mut MenuBar) {
        let mut help = root.add_menu("&Help");
        let icon = self.config.icon(BROWSER_ICON);
        for link in &self.config.help_links {
            help.add_trigger(link.label.clone(), MenuCommand::OpenUrl(link.url.clone())).with_icon(icon.clone());
        }
    }
}
