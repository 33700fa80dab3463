// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Command implementations

pub mod completions;
pub mod config;
pub mod export;
pub mod info;
pub mod navigate;
pub mod neighbors;
pub mod pick;
pub mod route;

use crate::config::Config;
use crate::graph::GraphStore;
use crate::loader;
use crate::resolver::NavigationResolver;
use crate::types::Route;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Effective configuration
    pub config: Config,
    /// Print machine-readable JSON instead of text
    pub json: bool,
    /// Use ANSI colors in text output
    pub color: bool,
}

impl CommandContext {
    /// Fetch the configured rows and build the map
    pub fn load_graph(&self) -> Result<GraphStore> {
        let data = &self.config.data;
        loader::load_graph(&data.path, data.timeout())
            .with_context(|| format!("Failed to load campus map from {}", data.path.display()))
    }

    /// Resolver over the configured lookup tables
    pub fn resolver(&self) -> Result<NavigationResolver> {
        NavigationResolver::from_config(&self.config.navigation)
            .context("Invalid [navigation] configuration")
    }

    /// Print a value as pretty JSON
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{json}");
        Ok(())
    }

    /// Emphasize a string when colors are enabled
    #[must_use]
    pub fn accent(&self, text: &str) -> String {
        if self.color {
            text.bold().green().to_string()
        } else {
            text.to_string()
        }
    }

    /// Mark a string as a problem when colors are enabled
    #[must_use]
    pub fn alert(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    /// Human-readable multi-line rendering of a route, with node labels
    #[must_use]
    pub fn describe_route(&self, graph: &GraphStore, route: &Route) -> String {
        if !route.is_reachable() {
            return self.alert("No path exists between these locations");
        }
        let stops: Vec<String> = route
            .nodes
            .iter()
            .zip(route.labels(graph))
            .map(|(id, label)| {
                if label == id {
                    id.clone()
                } else {
                    format!("{label} ({id})")
                }
            })
            .collect();
        format!(
            "{}\n  distance: {}",
            stops.join(" → "),
            self.accent(&format!("{:.2}", route.cost))
        )
    }
}
