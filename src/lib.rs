// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Campusnav library - campus map navigation
//!
//! This crate provides the navigation core of the campus records system:
//! a weighted graph of locations built from flat node/edge rows, shortest
//! routes between two locations, the two-click origin/destination picking
//! protocol, and resolution of "from my dormitory to that building" requests.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
pub mod pathfinder;
pub mod resolver;
pub mod selection;
pub mod view;

/// Core data types shared by every layer
pub mod types {
    use crate::graph::GraphStore;
    use serde::{Deserialize, Serialize};
    use std::fmt;

    /// Externally assigned, stable node identifier (e.g. `"A6"`)
    pub type NodeId = String;

    // =========================================================================
    // Input Records
    // =========================================================================

    /// A node row as supplied by the external store
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct NodeRecord {
        /// Node identifier
        pub id: NodeId,
        /// X coordinate
        pub x: f64,
        /// Y coordinate (grows upward)
        pub y: f64,
        /// Display label; the identifier is shown when absent
        #[serde(default, alias = "name")]
        pub label: Option<String>,
    }

    impl NodeRecord {
        /// Create a node record without a label
        #[must_use]
        pub fn new(id: impl Into<NodeId>, x: f64, y: f64) -> Self {
            Self {
                id: id.into(),
                x,
                y,
                label: None,
            }
        }

        /// Attach a display label
        #[must_use]
        pub fn with_label(mut self, label: impl Into<String>) -> Self {
            self.label = Some(label.into());
            self
        }
    }

    /// Raw edge length as it arrives from the store
    ///
    /// Tabular sources hand back either a number or text; text that does not
    /// parse as a number makes the whole edge row unusable.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum RawLength {
        /// Numeric column value
        Number(f64),
        /// Textual column value
        Text(String),
    }

    impl RawLength {
        /// Parse the raw value, `None` when it is not a finite number
        #[must_use]
        pub fn parse(&self) -> Option<f64> {
            let value = match self {
                Self::Number(n) => *n,
                Self::Text(s) => s.trim().parse::<f64>().ok()?,
            };
            value.is_finite().then_some(value)
        }
    }

    /// An edge row as supplied by the external store
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct EdgeRecord {
        /// One endpoint
        #[serde(alias = "from_node")]
        pub from: NodeId,
        /// The other endpoint
        #[serde(alias = "to_node")]
        pub to: NodeId,
        /// Physical length; derived from coordinates when missing or non-positive
        #[serde(default)]
        pub length: Option<RawLength>,
    }

    impl EdgeRecord {
        /// Edge whose length is derived from coordinates
        #[must_use]
        pub fn new(from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
            Self {
                from: from.into(),
                to: to.into(),
                length: None,
            }
        }

        /// Edge with an explicit length
        #[must_use]
        pub fn with_length(from: impl Into<NodeId>, to: impl Into<NodeId>, length: f64) -> Self {
            Self {
                from: from.into(),
                to: to.into(),
                length: Some(RawLength::Number(length)),
            }
        }
    }

    /// A complete fetch of node and edge rows
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct MapData {
        /// Node rows
        #[serde(default)]
        pub nodes: Vec<NodeRecord>,
        /// Edge rows
        #[serde(default)]
        pub edges: Vec<EdgeRecord>,
    }

    // =========================================================================
    // Graph Elements
    // =========================================================================

    /// A navigable point on the map, immutable once built
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Node {
        /// Node identifier
        pub id: NodeId,
        /// X coordinate
        pub x: f64,
        /// Y coordinate
        pub y: f64,
        /// Display label
        pub label: String,
    }

    impl Node {
        /// Straight-line distance to another node
        #[must_use]
        pub fn distance_to(&self, other: &Node) -> f64 {
            (self.x - other.x).hypot(self.y - other.y)
        }
    }

    impl From<NodeRecord> for Node {
        fn from(record: NodeRecord) -> Self {
            let label = record
                .label
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| record.id.clone());
            Self {
                id: record.id,
                x: record.x,
                y: record.y,
                label,
            }
        }
    }

    // =========================================================================
    // Route
    // =========================================================================

    /// Ordered node sequence from origin to destination plus its total cost
    ///
    /// An unreachable destination is a normal outcome: empty `nodes` and an
    /// infinite `cost`.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct Route {
        /// Node identifiers, origin first, destination last
        pub nodes: Vec<NodeId>,
        /// Sum of traversed edge weights
        #[serde(with = "cost_serde")]
        pub cost: f64,
    }

    impl Route {
        /// The "no path" outcome
        #[must_use]
        pub fn unreachable() -> Self {
            Self {
                nodes: Vec::new(),
                cost: f64::INFINITY,
            }
        }

        /// Zero-length route from a node to itself
        #[must_use]
        pub fn trivial(node: impl Into<NodeId>) -> Self {
            Self {
                nodes: vec![node.into()],
                cost: 0.0,
            }
        }

        /// Whether a path exists
        #[must_use]
        pub fn is_reachable(&self) -> bool {
            !self.nodes.is_empty() && self.cost.is_finite()
        }

        /// First node of the route
        #[must_use]
        pub fn origin(&self) -> Option<&str> {
            self.nodes.first().map(String::as_str)
        }

        /// Last node of the route
        #[must_use]
        pub fn destination(&self) -> Option<&str> {
            self.nodes.last().map(String::as_str)
        }

        /// Number of traversed edges
        #[must_use]
        pub fn hops(&self) -> usize {
            self.nodes.len().saturating_sub(1)
        }

        /// Node labels along the route, for display
        ///
        /// Nodes the map does not know are shown by their identifier.
        #[must_use]
        pub fn labels<'a>(&'a self, graph: &'a GraphStore) -> Vec<&'a str> {
            self.nodes.iter().map(|id| graph.label(id)).collect()
        }

        /// Consecutive node pairs along the route
        pub fn segments(&self) -> impl Iterator<Item = (&str, &str)> {
            self.nodes
                .windows(2)
                .map(|pair| (pair[0].as_str(), pair[1].as_str()))
        }
    }

    impl fmt::Display for Route {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            if !self.is_reachable() {
                return f.write_str("no path");
            }
            write!(f, "{} ({:.2})", self.nodes.join(" → "), self.cost)
        }
    }

    /// JSON has no infinity, so unreachable costs travel as `null`
    mod cost_serde {
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(cost: &f64, serializer: S) -> Result<S::Ok, S::Error> {
            if cost.is_finite() {
                serializer.serialize_f64(*cost)
            } else {
                serializer.serialize_none()
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
            Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
        }
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::error::{NavError, NavResult};
    pub use crate::graph::{GraphStore, SharedGraph};
    pub use crate::pathfinder::shortest_path;
    pub use crate::resolver::NavigationResolver;
    pub use crate::selection::{SelectionEvent, SelectionSession, SelectionState};
    pub use crate::types::*;
    pub use crate::view::MapView;
    pub use anyhow::{Context, Result};
}
