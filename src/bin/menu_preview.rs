use anyhow::{Context, Result};
use kestrel_menubar::capabilities::{
    CapabilityModule, CapabilityRegistry, EditorSetting, ModuleCommand, ModuleRegistry,
};
use kestrel_menubar::cli::{PreviewFormat, PreviewOptions};
use kestrel_menubar::config::MenuBarConfig;
use kestrel_menubar::{MenuAssembler, MenuBar};
use std::process;
use std::rc::Rc;

/// Stand-in module: the preview never triggers actions, it only reports presence.
struct PreviewModule;

impl CapabilityModule for PreviewModule {
    fn invoke(&self, command: ModuleCommand) -> Result<()> {
        tracing::info!("preview module received {command:?}");
        Ok(())
    }

    fn setting(&self, setting: EditorSetting) -> Option<bool> {
        Some(matches!(setting, EditorSetting::GizmoEnabled))
    }
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).with_target(false).init();
    if let Err(err) = run() {
        eprintln!("error: {err:?}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = PreviewOptions::parse_from_env()?;
    let mut config = match &options.config {
        Some(path) => MenuBarConfig::load(path)?,
        None => MenuBarConfig::default(),
    };
    config.apply_overrides(&options.config_overrides());

    let mut registry = ModuleRegistry::new();
    for capability in options.capabilities.capabilities() {
        registry.register_capability(capability, Rc::new(PreviewModule));
    }
    let registry_ref: Option<&dyn CapabilityRegistry> = if options.headless { None } else { Some(&registry) };

    let mut menu = MenuBar::new();
    if MenuAssembler::new(&config).build(&mut menu, registry_ref, options.role).is_none() {
        eprintln!("headless: no menu bar built");
        return Ok(());
    }

    match options.format {
        PreviewFormat::Text => print!("{menu}"),
        PreviewFormat::Json => {
            let json = serde_json::to_string_pretty(&menu).context("Failed to serialize menu bar")?;
            println!("{json}");
        }
    }
    Ok(())
}
