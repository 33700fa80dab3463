// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for graph construction and navigation requests
//!
//! Messages are written for the person at the map, not for a log file.
//! "No path" is not an error; see [`crate::types::Route::is_reachable`].

use crate::types::NodeId;
use thiserror::Error;

/// Result type for navigation operations
pub type NavResult<T> = std::result::Result<T, NavError>;

/// Errors raised while building a graph or resolving a navigation request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavError {
    /// The node set is empty, so nothing can be navigated
    #[error("The campus map has no locations; navigation is unavailable")]
    EmptyGraph,

    /// A node row cannot be placed on the map
    #[error("Map location '{id}' is invalid: {reason}")]
    InvalidNode {
        /// Offending identifier (may be blank)
        id: NodeId,
        /// What is wrong with it
        reason: String,
    },

    /// The requested building has no configured map location
    #[error("Cannot locate building '{target}' on the map. Supported: {}", .supported.join(", "))]
    UnknownDestination {
        /// Requested building name
        target: String,
        /// Buildings that are configured
        supported: Vec<String>,
    },

    /// A configured location is not part of the loaded map
    #[error("Map location '{node}' is missing; check the node table")]
    MissingGraphNode {
        /// Identifier that was looked up
        node: NodeId,
    },
}

impl NavError {
    /// Errors that invalidate the graph being built
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(self, Self::EmptyGraph | Self::InvalidNode { .. })
    }

    /// Errors the caller should show and carry on from
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnknownDestination { .. } | Self::MissingGraphNode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_destination_lists_supported() {
        let err = NavError::UnknownDestination {
            target: "未知楼".into(),
            supported: vec!["实验楼".into(), "教一楼".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("未知楼"));
        assert!(msg.contains("实验楼, 教一楼"));
        assert!(err.is_recoverable());
        assert!(!err.is_data_error());
    }

    #[test]
    fn test_classification() {
        assert!(NavError::EmptyGraph.is_data_error());
        assert!(!NavError::EmptyGraph.is_recoverable());
        assert!(NavError::MissingGraphNode { node: "A6".into() }.is_recoverable());
    }
}
