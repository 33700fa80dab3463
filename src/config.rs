// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management

use crate::types::NodeId;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where node/edge rows come from
    pub data: DataConfig,
    /// Lookup tables for semantic navigation
    pub navigation: NavigationConfig,
}

/// External node/edge source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Map data file (JSON or TOML)
    pub path: PathBuf,
    /// Upper bound on fetching the rows, in milliseconds
    pub timeout_ms: u64,
}

impl DataConfig {
    /// Fetch timeout as a duration
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: project_dirs()
                .map(|d| d.data_dir().join("map.json"))
                .unwrap_or_else(|| PathBuf::from("map.json")),
            timeout_ms: 5_000,
        }
    }
}

/// Person attribute and building lookup tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Attribute assumed when a person has none on record
    pub default_attribute: String,
    /// Attribute value -> origin node
    pub origins: BTreeMap<String, NodeId>,
    /// Building name -> destination node
    pub destinations: BTreeMap<String, NodeId>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        let origins = [("male", "A2"), ("男", "A2"), ("female", "A6"), ("女", "A6")];
        let destinations = [("实验楼", "G5"), ("教一楼", "E3"), ("教二楼", "F4")];
        Self {
            default_attribute: "female".to_string(),
            origins: origins
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            destinations: destinations
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("edu", "campusnav", "campusnav")
}

/// Default configuration file location
#[must_use]
pub fn default_path() -> PathBuf {
    project_dirs()
        .map(|d| d.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("campusnav.toml"))
}

/// Load configuration from disk or use defaults
///
/// An explicitly given path must exist; the default location may be absent.
pub fn load(path: Option<&Path>) -> Result<Config> {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (default_path(), false),
    };

    if !explicit && !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    debug!("Loaded config from {}", path.display());
    Ok(config)
}

impl Config {
    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
