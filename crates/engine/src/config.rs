//! Configuration for the tilesync engine.
//!
//! Configuration is loaded from TOML files in the following locations (in order):
//! 1. The platform config directory (`%APPDATA%/tilesync/config.toml` on
//!    Windows, `~/.config/tilesync/config.toml` on Linux)
//! 2. `~/.config/tilesync/config.toml` (Unix-style fallback)
//! 3. `./config.toml` (current directory, for development)

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("tolerance `{0}` must be non-negative, got {1}")]
    NegativeTolerance(&'static str, i32),
}

/// Main configuration structure for the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pixel tolerances for classification, grouping and finalization.
    pub tolerances: ToleranceConfig,
}

/// Pixel tolerances consumed by the geometry engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Distance at which a window edge counts as touching a work-area edge.
    #[serde(default = "default_screen_edge")]
    pub screen_edge: i32,

    /// Drop distance under which a finished move is reverted as accidental.
    #[serde(default = "default_move_accident")]
    pub move_accident: i32,

    /// Inner-corner proximity for two windows to belong to one tile group.
    #[serde(default = "default_client_snap")]
    pub client_snap: i32,

    /// Slack when matching a window size against a quick-tile footprint.
    #[serde(default = "default_quick_tile")]
    pub quick_tile: i32,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            screen_edge: default_screen_edge(),
            move_accident: default_move_accident(),
            client_snap: default_client_snap(),
            quick_tile: default_quick_tile(),
        }
    }
}

// Default value functions for serde
fn default_screen_edge() -> i32 {
    15
}

fn default_move_accident() -> i32 {
    100
}

fn default_client_snap() -> i32 {
    0
}

fn default_quick_tile() -> i32 {
    5
}

impl ToleranceConfig {
    /// Reject negative tolerances; all values are pixel distances.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("screen_edge", self.screen_edge),
            ("move_accident", self.move_accident),
            ("client_snap", self.client_snap),
            ("quick_tile", self.quick_tile),
        ];
        for (name, value) in fields {
            if value < 0 {
                return Err(ConfigError::NegativeTolerance(name, value));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from standard locations.
    ///
    /// Returns default config if no file is found.
    pub fn load() -> Result<Self> {
        let paths = config_paths();

        for path in &paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .tolerances
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }
}

/// Get all possible config file paths in priority order.
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. Platform standard config directory
    if let Some(proj_dirs) = ProjectDirs::from("org", "tilesync", "tilesync") {
        paths.push(proj_dirs.config_dir().join("config.toml"));
    }

    // 2. Unix-style: ~/.config/tilesync/config.toml
    if let Some(home) = dirs_home() {
        paths.push(home.join(".config").join("tilesync").join("config.toml"));
    }

    // 3. Current directory: ./config.toml
    paths.push(PathBuf::from("config.toml"));

    paths
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}
