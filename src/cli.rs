use crate::assembler::ConnectionRole;
use crate::capabilities::CapabilityFlags;
use crate::config::MenuBarConfigOverrides;
use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewOptions {
    pub capabilities: CapabilityFlags,
    pub role: ConnectionRole,
    pub format: PreviewFormat,
    pub config: Option<PathBuf>,
    pub headless: bool,
    icon_dir: Option<PathBuf>,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            capabilities: CapabilityFlags::all(),
            role: ConnectionRole::Client,
            format: PreviewFormat::Text,
            config: None,
            headless: false,
            icon_dir: None,
        }
    }
}

impl PreviewOptions {
    pub fn parse_from_env() -> Result<Self> {
        Self::parse(env::args())
    }

    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = PreviewOptions::default();
        let mut iter = args.into_iter();
        let _ = iter.next(); // skip program name if present
        while let Some(raw_flag) = iter.next() {
            let flag = raw_flag.as_ref();
            if flag == "--headless" {
                options.headless = true;
                continue;
            }
            let Some(key) = flag.strip_prefix("--") else {
                bail!("Unexpected argument '{flag}'. Use --capabilities/--role/--format/--config with values.");
            };
            let value =
                iter.next().ok_or_else(|| anyhow!("Expected a value after '{flag}'"))?.as_ref().to_string();
            match key {
                "capabilities" => {
                    options.capabilities = CapabilityFlags::parse_list(&value)
                        .with_context(|| format!("Invalid capabilities '{value}'"))?;
                }
                "role" => options.role = ConnectionRole::parse(&value)?,
                "format" => options.format = parse_format(&value)?,
                "config" => options.config = Some(PathBuf::from(value)),
                "icon-dir" => options.icon_dir = Some(PathBuf::from(value)),
                _ => bail!(
                    "Unknown flag '{flag}'. Supported flags: --capabilities, --role, --format, --config, --icon-dir, --headless."
                ),
            }
        }
        Ok(options)
    }

    pub fn config_overrides(&self) -> MenuBarConfigOverrides {
        MenuBarConfigOverrides { icon_dir: self.icon_dir.clone() }
    }
}

fn parse_format(value: &str) -> Result<PreviewFormat> {
    match value.to_ascii_lowercase().as_str() {
        "text" => Ok(PreviewFormat::Text),
        "json" => Ok(PreviewFormat::Json),
        other => bail!("Invalid format '{other}'. Use text or json."),
    }
}
