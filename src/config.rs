//! Optional YAML configuration
//!
//! Settings are layered: built-in defaults, then `~/.tf-visual/config.yaml`,
//! then `.tf-visual.yaml` in the working directory. Command-line flags are
//! applied last by the commands themselves.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::traits::FileSystem;

const CONFIG_DIR: &str = ".tf-visual";
const GLOBAL_CONFIG_FILE: &str = "config.yaml";
const PROJECT_CONFIG_FILE: &str = ".tf-visual.yaml";

/// Width used when neither flags, config nor the terminal provide one
pub const DEFAULT_WIDTH: usize = 120;
pub const DEFAULT_TITLE: &str = "Terraform Visual Report";

/// Contents of a config file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReportConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_sensitive: Option<bool>,
}

impl ReportConfig {
    /// Layer `other` on top of `self`; keys set in `other` win
    pub fn merge(self, other: ReportConfig) -> ReportConfig {
        ReportConfig {
            title: other.title.or(self.title),
            out: other.out.or(self.out),
            width: other.width.or(self.width),
            color: other.color.or(self.color),
            changed_only: other.changed_only.or(self.changed_only),
            show_sensitive: other.show_sensitive.or(self.show_sensitive),
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn color(&self) -> bool {
        self.color.unwrap_or(true)
    }

    pub fn changed_only(&self) -> bool {
        self.changed_only.unwrap_or(false)
    }

    pub fn show_sensitive(&self) -> bool {
        self.show_sensitive.unwrap_or(false)
    }
}

/// Reads and layers config files through the filesystem seam
pub struct ConfigLoader<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Path of the per-user config file, if a home directory is known
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(GLOBAL_CONFIG_FILE))
    }

    /// Load the global file and then the project file found in `project_dir`
    pub fn load(&self, project_dir: &Path) -> Result<ReportConfig> {
        self.load_layers(Self::global_config_path().as_deref(), project_dir)
    }

    pub fn load_layers(&self, global: Option<&Path>, project_dir: &Path) -> Result<ReportConfig> {
        let mut config = ReportConfig::default();

        if let Some(path) = global {
            config = config.merge(self.load_file(path)?);
        }

        let project = project_dir.join(PROJECT_CONFIG_FILE);
        Ok(config.merge(self.load_file(&project)?))
    }

    /// Load a single file; a missing file is an empty config
    pub fn load_file(&self, path: &Path) -> Result<ReportConfig> {
        if !self.fs.is_file(path) {
            return Ok(ReportConfig::default());
        }

        let content = self.fs.read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(ReportConfig::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

/// Pick the render width: explicit value, then the terminal, then the default
pub fn resolve_width(explicit: Option<usize>) -> usize {
    explicit
        .or_else(|| terminal_size::terminal_size().map(|(terminal_size::Width(w), _)| w as usize))
        .unwrap_or(DEFAULT_WIDTH)
}
