use anyhow::{Context, Result};
use colored::Color;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::DiffError;
use crate::presentation::colorize::Palette;

/// Built-in defaults, lowest-priority layer of every configuration.
const DEFAULTS: &str = r#"
[output]
format = "text"
color = true

[theme]
created = "green"
updated = "yellow"
deleted = "red"
arrow = "cyan"

[git]
schema_path = "schema.json"
"#;

/// Prefix of environment overrides, e.g. `BASEDIFF_OUTPUT__COLOR=false`.
const ENV_PREFIX: &str = "BASEDIFF";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub output: OutputConfig,
    pub theme: ThemeConfig,
    pub git: GitConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Line-oriented report
    #[default]
    Text,
    /// Pretty-printed diff record
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Colorize text output. Ignored for JSON.
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
        }
    }
}

/// Colour names as written in the config file ("green", "bright red"…).
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    pub created: String,
    pub updated: String,
    pub deleted: String,
    pub arrow: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitConfig {
    /// Path of the schema document inside the repository, used by `--git`.
    pub schema_path: String,
}

impl ThemeConfig {
    pub fn palette(&self) -> crate::error::Result<Palette> {
        Ok(Palette {
            created: parse_color("created", &self.created)?,
            updated: parse_color("updated", &self.updated)?,
            deleted: parse_color("deleted", &self.deleted)?,
            arrow: parse_color("arrow", &self.arrow)?,
        })
    }
}

fn parse_color(slot: &str, name: &str) -> crate::error::Result<Color> {
    name.parse::<Color>()
        .map_err(|_| DiffError::config(format!("unknown colour '{name}' for theme.{slot}")))
}

impl AppConfig {
    /// Layered load: defaults, then the config file(s), then `BASEDIFF_*`
    /// environment variables.
    ///
    /// With `path`, that file must exist and replaces the default locations.
    /// Without it, [`default_locations`] are read when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULTS, FileFormat::Toml));

        match path {
            Some(path) => {
                builder = builder.add_source(
                    File::from(path.to_path_buf())
                        .format(FileFormat::Toml)
                        .required(true),
                );
            }
            None => {
                for candidate in default_locations() {
                    builder = builder.add_source(
                        File::from(candidate)
                            .format(FileFormat::Toml)
                            .required(false),
                    );
                }
            }
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| match path {
                Some(p) => format!("Failed to read config file: {}", p.display()),
                None => "Failed to read configuration".to_string(),
            })?;

        settings
            .try_deserialize()
            .with_context(|| "Failed to parse configuration")
    }
}

/// User-level then project-level config files, lowest priority first.
pub fn default_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("basediff").join("config.toml"));
    }
    locations.push(PathBuf::from("basediff.toml"));
    locations
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.conf");
        fs::write(
            &path,
            "[output]\nformat = \"json\"\n\n[theme]\narrow = \"magenta\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.output.format, OutputFormat::Json);
        assert!(cfg.output.color);
        assert_eq!(cfg.theme.arrow, "magenta");
        assert_eq!(cfg.theme.created, "green");
        assert_eq!(cfg.git.schema_path, "schema.json");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }

    #[test]
    fn default_theme_builds_default_palette() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.toml");
        fs::write(&path, "").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        let palette = cfg.theme.palette().unwrap();
        assert_eq!(palette, Palette::default());
    }

    #[test]
    fn unknown_colour_is_rejected() {
        let theme = ThemeConfig {
            created: "green".into(),
            updated: "yellow".into(),
            deleted: "infrared".into(),
            arrow: "cyan".into(),
        };
        let err = theme.palette().unwrap_err();
        assert!(err.to_string().contains("theme.deleted"));
    }

    #[test]
    fn default_locations_end_with_project_file() {
        let locations = default_locations();
        assert_eq!(locations.last(), Some(&PathBuf::from("basediff.toml")));
    }
}
