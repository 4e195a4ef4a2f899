use crate::canvas::options::DrawingOptions;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "easel_settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Headerless RGB file loaded as the backdrop on the open command.
    #[serde(default = "default_backdrop_file")]
    pub backdrop_file: String,
    #[serde(default)]
    pub debug_logging: bool,
    /// Drawing options restored on the next start.
    #[serde(default)]
    pub last_options: DrawingOptions,
}

fn default_window_width() -> u32 {
    960
}

fn default_window_height() -> u32 {
    640
}

fn default_backdrop_file() -> String {
    "backdrop.raw".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            backdrop_file: default_backdrop_file(),
            debug_logging: false,
            last_options: DrawingOptions::default(),
        }
    }
}

pub fn settings_path_from_exe_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(SETTINGS_FILE_NAME))
}

pub fn resolve_settings_path() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    settings_path_from_exe_path(&exe_path)
}

/// Loads the settings file next to the executable. A missing file yields
/// the defaults; a malformed one is an error the caller decides about.
pub fn load() -> Result<AppSettings> {
    load_from_path(&resolve_settings_path()?)
}

fn load_from_path(path: &Path) -> Result<AppSettings> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read settings file {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(AppSettings::default());
    }
    serde_json::from_str(&content)
        .with_context(|| format!("deserialize settings file {}", path.display()))
}

pub fn save(settings: &AppSettings) -> Result<PathBuf> {
    let path = resolve_settings_path()?;
    save_to_path(&path, settings)?;
    Ok(path)
}

fn save_to_path(path: &Path, settings: &AppSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create settings parent folder {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(settings).context("serialize settings")?;
    std::fs::write(path, json).with_context(|| format!("write settings file {}", path.display()))
}
