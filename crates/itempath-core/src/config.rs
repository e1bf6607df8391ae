use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::MapError;

/// Platform path-length ceiling the folder budget is carved out of.
pub const PATH_LENGTH_CEILING: usize = 240;

/// Default maximum length reserved for folder names below a mapped path.
pub const DEFAULT_MAX_FOLDER_NAME_LENGTH: usize = 90;

/// Characters escaped on every platform on top of the host's reserved set.
/// Separators in this list are ignored when the symbol table is built.
pub const DEFAULT_INVALID_FILE_NAME_CHARS: &str = "\\/:?\"<>|[]";

/// Mapper configuration loaded from `~/.config/itempath/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Maximum folder-name length callers may append below a mapped path.
    /// The escaped logical path is split every `240 - max_folder_name_length` chars.
    #[serde(default = "default_max_folder_name_length")]
    pub max_folder_name_length: usize,
    /// Extra characters to escape beyond the host's reserved filename characters.
    #[serde(default = "default_invalid_file_name_chars")]
    pub invalid_file_name_chars: String,
}

fn default_max_folder_name_length() -> usize {
    DEFAULT_MAX_FOLDER_NAME_LENGTH
}

fn default_invalid_file_name_chars() -> String {
    DEFAULT_INVALID_FILE_NAME_CHARS.to_string()
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            max_folder_name_length: DEFAULT_MAX_FOLDER_NAME_LENGTH,
            invalid_file_name_chars: default_invalid_file_name_chars(),
        }
    }
}

impl MapperConfig {
    /// Split threshold for escaped logical paths.
    pub fn threshold(&self) -> Result<usize, MapError> {
        match PATH_LENGTH_CEILING.checked_sub(self.max_folder_name_length) {
            Some(t) if t > 0 => Ok(t),
            _ => Err(MapError::InvalidConfig {
                message: format!(
                    "max_folder_name_length must be below {}, got {}",
                    PATH_LENGTH_CEILING, self.max_folder_name_length
                ),
            }),
        }
    }

    pub fn extra_invalid_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.invalid_file_name_chars.chars()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("itempath")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MapperConfig> {
    let cfg = read_or_init()?;
    cfg.threshold()?;
    Ok(cfg)
}

/// Like [`load_or_init`] but without validation, for callers that apply
/// overrides before checking the result.
pub fn read_or_init() -> Result<MapperConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MapperConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    read_from(&path)
}

/// Load and validate configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<MapperConfig> {
    let cfg = read_from(path)?;
    cfg.threshold()?;
    Ok(cfg)
}

/// Parse configuration from an explicit file without validating it.
pub fn read_from(path: &Path) -> Result<MapperConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: MapperConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
