// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Fetching node/edge rows from the external store
//!
//! The fetch is the only blocking step and is bounded by a timeout. Building
//! the graph from the fetched rows stays synchronous.

use crate::graph::GraphStore;
use crate::types::MapData;
use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Row file formats understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// `{"nodes": [...], "edges": [...]}`
    Json,
    /// `[[nodes]]` / `[[edges]]` tables
    Toml,
}

impl DataFormat {
    /// Guess the format from a file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Parse rows in this format
    pub fn parse(self, content: &str) -> Result<MapData> {
        match self {
            Self::Json => serde_json::from_str(content).context("Invalid JSON map data"),
            Self::Toml => toml::from_str(content).context("Invalid TOML map data"),
        }
    }
}

/// Read and parse a map data file
pub fn read_rows(path: &Path) -> Result<MapData> {
    let format = DataFormat::from_path(path).ok_or_else(|| {
        anyhow!(
            "Unknown map data format: {}. Supported: .json, .toml",
            path.display()
        )
    })?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    format
        .parse(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Fetch rows on a blocking worker, giving up after `timeout`
pub async fn fetch_rows(path: PathBuf, timeout: Duration) -> Result<MapData> {
    let display = path.display().to_string();
    let task = tokio::task::spawn_blocking(move || read_rows(&path));

    match tokio::time::timeout(timeout, task).await {
        Ok(joined) => joined.context("Map data fetch panicked")?,
        Err(_) => bail!(
            "Timed out after {} ms fetching map data from {}",
            timeout.as_millis(),
            display
        ),
    }
}

/// Fetch rows from a data file and build the map
///
/// Drives the bounded fetch on a private current-thread runtime so callers
/// stay synchronous. On timeout the stalled read is abandoned, not awaited.
pub fn load_graph(path: &Path, timeout: Duration) -> Result<GraphStore> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start I/O runtime")?;
    let fetched = runtime.block_on(fetch_rows(path.to_path_buf(), timeout));
    // a timed-out read may still be blocked; dropping the runtime would join it
    runtime.shutdown_background();
    let data = fetched?;

    info!(
        "Fetched {} node row(s) and {} edge row(s) from {}",
        data.nodes.len(),
        data.edges.len(),
        path.display()
    );

    GraphStore::build(data.nodes, data.edges)
        .with_context(|| format!("Cannot build campus map from {}", path.display()))
}
