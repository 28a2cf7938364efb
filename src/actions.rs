use crate::cache::{clear_cache, CacheClearOutcome};
use crate::capabilities::{Capability, EditorSetting, ModuleCommand, ResolvedCapabilities};
use crate::guard::{confirm_if_scene_exists, GuardPrompt};
use crate::host::HostServices;
use anyhow::{anyhow, Context, Result};
use rand::Rng;
use serde::Serialize;
use tracing::{error, info, warn};

pub const ENVIRONMENT_ENTITY_NAME: &str = "Environment";
const SCENE_NUMBER_MAX: u32 = 10_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuCommand {
    NewScene,
    OpenScene,
    TakeScreenshot,
    ClearAssetCache,
    Disconnect,
    Quit,
    OpenConfigFolder,
    OpenUrl(String),
    Module(Capability, ModuleCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleCommand {
    Editor(EditorSetting),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Completed,
    /// The user backed out before anything happened (empty file selection).
    Cancelled,
    /// The user answered "No" to the guard.
    Declined,
    /// The capability behind the action is gone; nothing to do.
    Skipped,
    Cache(CacheClearOutcome),
    Failed(String),
}

/// Runs the effect bound to each menu action.
pub struct ActionDispatcher {
    services: HostServices,
    capabilities: ResolvedCapabilities,
    scene_file_filter: String,
}

impl ActionDispatcher {
    pub fn new(services: HostServices, capabilities: ResolvedCapabilities, scene_file_filter: impl Into<String>) -> Self {
        Self { services, capabilities, scene_file_filter: scene_file_filter.into() }
    }

    pub fn trigger(&self, command: &MenuCommand) -> ActionOutcome {
        self.run_trigger(command).unwrap_or_else(|err| {
            error!(target: "menubar::actions", "{command:?} failed: {err:#}");
            ActionOutcome::Failed(format!("{err:#}"))
        })
    }

    pub fn toggle(&self, command: ToggleCommand, value: bool) -> ActionOutcome {
        self.run_toggle(command, value).unwrap_or_else(|err| {
            error!(target: "menubar::actions", "{command:?} -> {value} failed: {err:#}");
            ActionOutcome::Failed(format!("{err:#}"))
        })
    }

    fn run_trigger(&self, command: &MenuCommand) -> Result<ActionOutcome> {
        let services = &self.services;
        match command {
            MenuCommand::NewScene => self.new_scene(),
            MenuCommand::OpenScene => self.open_scene(),
            MenuCommand::TakeScreenshot => {
                let image = services.session.save_screenshot().context("Failed to save screenshot")?;
                services.dialogs.open_url(&image.display().to_string())?;
                Ok(ActionOutcome::Completed)
            }
            MenuCommand::ClearAssetCache => {
                Ok(ActionOutcome::Cache(clear_cache(services.cache.as_ref(), services.dialogs.as_ref())))
            }
            MenuCommand::Disconnect => {
                services.session.logout().context("Logout failed")?;
                Ok(ActionOutcome::Completed)
            }
            MenuCommand::Quit => {
                services.session.exit();
                Ok(ActionOutcome::Completed)
            }
            MenuCommand::OpenConfigFolder => {
                let folder = services.session.config_folder();
                services.dialogs.open_url(&folder.display().to_string())?;
                Ok(ActionOutcome::Completed)
            }
            MenuCommand::OpenUrl(url) => {
                services.dialogs.open_url(url)?;
                Ok(ActionOutcome::Completed)
            }
            MenuCommand::Module(capability, module_command) => {
                let Some(handle) = self.capabilities.handle(*capability) else {
                    warn!(target: "menubar::actions", "{capability} is not available; ignoring {module_command:?}");
                    return Ok(ActionOutcome::Skipped);
                };
                handle.invoke(*module_command).with_context(|| format!("{capability} rejected {module_command:?}"))?;
                Ok(ActionOutcome::Completed)
            }
        }
    }

    fn run_toggle(&self, command: ToggleCommand, value: bool) -> Result<ActionOutcome> {
        match command {
            ToggleCommand::Editor(setting) => {
                let handle = self
                    .capabilities
                    .handle(Capability::EcEditor)
                    .ok_or_else(|| anyhow!("{} is not available", Capability::EcEditor))?;
                handle.set_setting(setting, value)?;
                Ok(ActionOutcome::Completed)
            }
        }
    }

    fn new_scene(&self) -> Result<ActionOutcome> {
        let HostServices { dialogs, scenes, .. } = &self.services;
        if !confirm_if_scene_exists(scenes.as_ref(), dialogs.as_ref(), GuardPrompt::NewScene) {
            return Ok(ActionOutcome::Declined);
        }
        let name = random_scene_name();
        scenes.create_scene(&name).with_context(|| format!("Failed to create scene '{name}'"))?;
        scenes
            .spawn_environment(&name, ENVIRONMENT_ENTITY_NAME, true)
            .with_context(|| format!("Failed to add environment to scene '{name}'"))?;
        info!(target: "menubar::actions", "Created scene '{name}'");
        Ok(ActionOutcome::Completed)
    }

    fn open_scene(&self) -> Result<ActionOutcome> {
        let HostServices { dialogs, scenes, session, .. } = &self.services;
        let directory = session.working_directory();
        let selection = dialogs
            .open_file(GuardPrompt::OpenScene.title(), &directory, &self.scene_file_filter)
            .filter(|path| !path.as_os_str().is_empty());
        let Some(path) = selection else {
            return Ok(ActionOutcome::Cancelled);
        };
        if !confirm_if_scene_exists(scenes.as_ref(), dialogs.as_ref(), GuardPrompt::OpenScene) {
            return Ok(ActionOutcome::Declined);
        }

        let name = random_scene_name();
        scenes.create_scene(&name).with_context(|| format!("Failed to create scene '{name}'"))?;
        if let Err(err) = scenes.adopt_asset_storage(&path) {
            warn!(target: "menubar::actions", "No asset storage for {}: {err:#}", path.display());
        }
        scenes.load_scene(&name, &path).with_context(|| format!("Failed to load scene {}", path.display()))?;
        info!(target: "menubar::actions", "Loaded {} into scene '{name}'", path.display());
        Ok(ActionOutcome::Completed)
    }
}

pub fn random_scene_name() -> String {
    let number = rand::thread_rng().gen_range(1..=SCENE_NUMBER_MAX);
    format!("Scene{number}")
}
