// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Reactive map view: turns picks into routes and status lines

use crate::error::NavResult;
use crate::graph::GraphStore;
use crate::pathfinder::shortest_path;
use crate::resolver::NavigationResolver;
use crate::selection::{SelectionEvent, SelectionSession, SelectionState};
use crate::types::Route;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Everything the presentation layer needs to redraw after an input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewUpdate {
    /// Selection change, `None` when the input was ignored
    pub event: Option<SelectionEvent>,
    /// Route to draw; `None` clears any drawn route
    pub route: Option<Route>,
    /// Guidance line for the user
    pub status: String,
}

/// One map view: a graph snapshot plus the picking session over it
#[derive(Debug)]
pub struct MapView {
    graph: Arc<GraphStore>,
    session: SelectionSession,
    route: Option<Route>,
}

impl MapView {
    /// Open a view over a map snapshot
    #[must_use]
    pub fn new(graph: Arc<GraphStore>) -> Self {
        Self {
            graph,
            session: SelectionSession::new(),
            route: None,
        }
    }

    /// Map this view draws
    #[must_use]
    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    /// Selection state
    #[must_use]
    pub fn state(&self) -> &SelectionState {
        self.session.state()
    }

    /// Route currently drawn
    #[must_use]
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Guidance line for the current state
    #[must_use]
    pub fn status(&self) -> String {
        match self.session.state() {
            SelectionState::Idle => "Click an origin".to_string(),
            SelectionState::OriginChosen { origin } => {
                format!("Origin {} selected, click a destination", self.graph.label(origin))
            }
            SelectionState::RouteShown {
                origin,
                destination,
            } => self.route_status(origin, destination),
        }
    }

    /// Handle a click on a map location
    ///
    /// Clicks on anything that is not a node leave the view untouched.
    pub fn click(&mut self, node: &str) -> ViewUpdate {
        if !self.graph.contains(node) {
            debug!("Ignoring click on unknown node {}", node);
            return ViewUpdate {
                event: None,
                route: self.route.clone(),
                status: self.status(),
            };
        }

        let event = self.session.pick(node);
        let status = match &event {
            SelectionEvent::OriginSet { .. } => {
                self.route = None;
                self.status()
            }
            SelectionEvent::RouteRequested {
                origin,
                destination,
            } => {
                self.route = Some(shortest_path(&self.graph, origin, destination));
                self.status()
            }
            SelectionEvent::Reset { origin } => {
                self.route = None;
                format!("Reset, new origin {}", self.graph.label(origin))
            }
        };

        ViewUpdate {
            event: Some(event),
            route: self.route.clone(),
            status,
        }
    }

    /// Show a resolved navigation request ("from my dormitory to ...")
    ///
    /// The picking session is cleared so the next click starts afresh.
    ///
    /// # Errors
    ///
    /// Unknown buildings and configured nodes missing from the map.
    pub fn navigate(
        &mut self,
        resolver: &NavigationResolver,
        attribute: Option<&str>,
        building: &str,
    ) -> NavResult<ViewUpdate> {
        let route = resolver.resolve(&self.graph, attribute, building)?;
        self.session.reset();

        let status = match (route.origin(), route.destination()) {
            (Some(origin), Some(destination)) => format!(
                "Navigation: {} -> {} ({}), distance {:.2}",
                self.graph.label(origin),
                building.trim(),
                destination,
                route.cost
            ),
            _ => format!("No path to {}", building.trim()),
        };
        self.route = Some(route);

        Ok(ViewUpdate {
            event: None,
            route: self.route.clone(),
            status,
        })
    }

    /// Clear selection and route
    pub fn clear(&mut self) {
        self.session.reset();
        self.route = None;
    }

    fn route_status(&self, origin: &str, destination: &str) -> String {
        match &self.route {
            Some(route) if route.is_reachable() => {
                format!("Arrived! Shortest route length {:.2}", route.cost)
            }
            _ => format!(
                "No path between {} and {}",
                self.graph.label(origin),
                self.graph.label(destination)
            ),
        }
    }
}
