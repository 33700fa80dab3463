// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Semantic navigation: from a person's default point to a named building

use crate::config::NavigationConfig;
use crate::error::{NavError, NavResult};
use crate::graph::GraphStore;
use crate::pathfinder::shortest_path;
use crate::types::{NodeId, Route};
use anyhow::{bail, Result};
use std::collections::{BTreeMap, HashMap};
use tracing::{info, warn};

/// Maps person attributes and building names onto map nodes
#[derive(Debug, Clone)]
pub struct NavigationResolver {
    /// Normalized attribute value -> origin node
    origins: HashMap<String, NodeId>,
    /// Building name -> destination node
    destinations: BTreeMap<String, NodeId>,
    /// Normalized attribute used when none is given or it is unrecognized
    default_attribute: String,
}

impl NavigationResolver {
    /// Build a resolver from lookup tables
    ///
    /// # Errors
    ///
    /// Fails when `default_attribute` has no entry in `origins`.
    pub fn new<O, D>(origins: O, destinations: D, default_attribute: &str) -> Result<Self>
    where
        O: IntoIterator<Item = (String, NodeId)>,
        D: IntoIterator<Item = (String, NodeId)>,
    {
        let origins: HashMap<String, NodeId> = origins
            .into_iter()
            .map(|(attribute, node)| (normalize(&attribute), node))
            .collect();
        let destinations: BTreeMap<String, NodeId> = destinations
            .into_iter()
            .map(|(building, node)| (building.trim().to_string(), node))
            .collect();
        let default_attribute = normalize(default_attribute);

        if !origins.contains_key(&default_attribute) {
            bail!(
                "Default attribute '{}' has no origin; configured: {}",
                default_attribute,
                origins.keys().cloned().collect::<Vec<_>>().join(", ")
            );
        }

        Ok(Self {
            origins,
            destinations,
            default_attribute,
        })
    }

    /// Build a resolver from the `[navigation]` configuration section
    ///
    /// # Errors
    ///
    /// See [`NavigationResolver::new`].
    pub fn from_config(config: &NavigationConfig) -> Result<Self> {
        Self::new(
            config.origins.clone(),
            config.destinations.clone(),
            &config.default_attribute,
        )
    }

    /// Origin node for a person attribute
    ///
    /// Missing or unrecognized attributes use the configured default.
    #[must_use]
    pub fn origin_for(&self, attribute: Option<&str>) -> &str {
        let key = attribute.map(normalize);
        if let Some(node) = key.as_ref().and_then(|k| self.origins.get(k)) {
            return node;
        }
        if let Some(key) = key {
            warn!(
                "Unrecognized attribute '{}', using default '{}'",
                key, self.default_attribute
            );
        }
        // present: checked in the constructor
        self.origins
            .get(&self.default_attribute)
            .map_or("", String::as_str)
    }

    /// Destination node for a building name
    ///
    /// # Errors
    ///
    /// [`NavError::UnknownDestination`] when the building is not configured.
    pub fn destination_for(&self, target: &str) -> NavResult<&str> {
        self.destinations
            .get(target.trim())
            .map(String::as_str)
            .ok_or_else(|| NavError::UnknownDestination {
                target: target.to_string(),
                supported: self.buildings().map(String::from).collect(),
            })
    }

    /// Configured building names, sorted
    pub fn buildings(&self) -> impl Iterator<Item = &str> {
        self.destinations.keys().map(String::as_str)
    }

    /// Resolve a request into concrete (origin, destination) nodes on `graph`
    ///
    /// # Errors
    ///
    /// [`NavError::UnknownDestination`] for an unconfigured building and
    /// [`NavError::MissingGraphNode`] when a configured node is not on the map.
    pub fn endpoints(
        &self,
        graph: &GraphStore,
        attribute: Option<&str>,
        target: &str,
    ) -> NavResult<(NodeId, NodeId)> {
        let destination = self.destination_for(target)?;
        let origin = self.origin_for(attribute);

        for node in [origin, destination] {
            if !graph.contains(node) {
                warn!("Navigation table references {} which is not on the loaded map", node);
                return Err(NavError::MissingGraphNode {
                    node: node.to_string(),
                });
            }
        }

        Ok((origin.to_string(), destination.to_string()))
    }

    /// Resolve a request and compute its route
    ///
    /// An unreachable destination is returned as an unreachable route, not
    /// as an error.
    ///
    /// # Errors
    ///
    /// See [`NavigationResolver::endpoints`].
    pub fn resolve(
        &self,
        graph: &GraphStore,
        attribute: Option<&str>,
        target: &str,
    ) -> NavResult<Route> {
        let (origin, destination) = self.endpoints(graph, attribute, target)?;
        let route = shortest_path(graph, &origin, &destination);
        info!("Navigate {} -> {} ({}): {}", origin, target.trim(), destination, route);
        Ok(route)
    }
}

fn normalize(attribute: &str) -> String {
    attribute.trim().to_lowercase()
}
