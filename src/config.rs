//! Layered configuration loading using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`HTML_SHELF_*` prefix, e.g. `HTML_SHELF_DATA_DIR`)
//! 2. An explicit file passed with `--config`
//! 3. User-level `~/.config/html-shelf/config.toml`
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Palette;

const ENV_PREFIX: &str = "HTML_SHELF_";
const APP_DIR_NAME: &str = "html-shelf";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".html-shelf"))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShelfConfig {
    /// Private root holding the catalog file and the content directory.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Accent colors as `#RRGGBB` / `#AARRGGBB`. Empty means the built-in palette.
    #[serde(default)]
    pub palette: Vec<String>,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            palette: Vec::new(),
        }
    }
}

impl ShelfConfig {
    /// Load configuration from the user config file, `explicit` (if any) and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(explicit).extract().map_err(ConfigError::from)
    }

    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut files = Vec::new();
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                files.push(global_path);
            }
        }
        if let Some(path) = explicit {
            files.push(path.to_path_buf());
        }
        Self::figment_from(&files)
    }

    /// Build the provider chain from an explicit list of TOML files.
    ///
    /// Later files override earlier ones; the environment overrides all of them.
    pub fn figment_from(files: &[PathBuf]) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        for file in files {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Path to the user-global config file.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILENAME))
    }

    /// The accent palette this config asks for.
    pub fn palette(&self) -> Result<Palette, ConfigError> {
        if self.palette.is_empty() {
            return Ok(Palette::default());
        }
        Palette::parse(&self.palette).map_err(|err| ConfigError::InvalidValue {
            field: "palette".to_string(),
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_correct() {
        let config = ShelfConfig::default();
        assert!(config.palette.is_empty());
        assert!(config.data_dir.ends_with(APP_DIR_NAME) || config.data_dir.ends_with(".html-shelf"));
        assert_eq!(config.palette().unwrap(), Palette::default());
    }

    #[test]
    fn file_then_env_precedence() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "shelf.toml",
                r##"
                    data_dir = "/from/file"
                    palette = ["#112233", "#80445566"]
                "##,
            )?;

            let files = vec![PathBuf::from("shelf.toml")];
            let config: ShelfConfig = ShelfConfig::figment_from(&files).extract()?;
            assert_eq!(config.data_dir, PathBuf::from("/from/file"));

            jail.set_env("HTML_SHELF_DATA_DIR", "/from/env");
            let config: ShelfConfig = ShelfConfig::figment_from(&files).extract()?;
            assert_eq!(config.data_dir, PathBuf::from("/from/env"));
            assert_eq!(
                config.palette().unwrap().colors(),
                &[0xFF112233, 0x80445566][..]
            );
            Ok(())
        });
    }

    #[test]
    fn later_files_override_earlier_ones() {
        Jail::expect_with(|jail| {
            jail.create_file("global.toml", r#"data_dir = "/global""#)?;
            jail.create_file("local.toml", r#"data_dir = "/local""#)?;

            let files = vec![PathBuf::from("global.toml"), PathBuf::from("local.toml")];
            let config: ShelfConfig = ShelfConfig::figment_from(&files).extract()?;
            assert_eq!(config.data_dir, PathBuf::from("/local"));
            Ok(())
        });
    }

    #[test]
    fn invalid_palette_is_reported() {
        let config = ShelfConfig {
            data_dir: PathBuf::from("/tmp/shelf"),
            palette: vec!["not-a-color".to_string()],
        };
        let err = config.palette().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "palette"));
    }
}
