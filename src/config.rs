use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HelpLink {
    pub label: String,
    pub url: String,
}

impl HelpLink {
    fn new(label: &str, url: &str) -> Self {
        Self { label: label.to_string(), url: url.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MenuBarConfig {
    #[serde(default = "MenuBarConfig::default_help_links")]
    pub help_links: Vec<HelpLink>,
    #[serde(default = "MenuBarConfig::default_icon_dir")]
    pub icon_dir: PathBuf,
    #[serde(default = "MenuBarConfig::default_scene_file_filter")]
    pub scene_file_filter: String,
}

#[derive(Debug, Clone, Default)]
pub struct MenuBarConfigOverrides {
    pub icon_dir: Option<PathBuf>,
}

impl MenuBarConfig {
    fn default_help_links() -> Vec<HelpLink> {
        vec![
            HelpLink::new("Wiki", "http://wiki.realxtend.org/"),
            HelpLink::new("Doxygen", "http://www.realxtend.org/doxygen/"),
            HelpLink::new("Mailing list", "http://groups.google.com/group/realxtend/"),
        ]
    }

    fn default_icon_dir() -> PathBuf {
        PathBuf::from("data/ui/images/icon")
    }

    fn default_scene_file_filter() -> String {
        "Tundra TXML file (*.txml)".to_string()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let cfg = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(target: "menubar::config", "Config load error: {err:?}. Falling back to defaults.");
                Self::default()
            }
        }
    }

    pub fn apply_overrides(&mut self, overrides: &MenuBarConfigOverrides) {
        if let Some(icon_dir) = &overrides.icon_dir {
            self.icon_dir = icon_dir.clone();
        }
    }

    pub fn icon(&self, file_name: &str) -> PathBuf {
        self.icon_dir.join(file_name)
    }
}

impl Default for MenuBarConfig {
    fn default() -> Self {
        Self {
            help_links: Self::default_help_links(),
            icon_dir: Self::default_icon_dir(),
            scene_file_filter: Self::default_scene_file_filter(),
        }
    }
}

impl MenuBarConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.icon_dir.is_none()
    }
}
