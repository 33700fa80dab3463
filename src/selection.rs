// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Two-click origin/destination picking
//!
//! The session only tracks picks. Whoever receives
//! [`SelectionEvent::RouteRequested`] is expected to compute that route
//! exactly once.

use crate::types::NodeId;
use serde::Serialize;
use tracing::debug;

/// Where the picking protocol currently stands
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
    /// Nothing picked yet
    #[default]
    Idle,
    /// Origin picked, waiting for a destination
    OriginChosen {
        /// Picked origin
        origin: NodeId,
    },
    /// Both ends picked and the route is on display
    RouteShown {
        /// Picked origin
        origin: NodeId,
        /// Picked destination
        destination: NodeId,
    },
}

/// What a pick changed, for updating selection markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// First pick of a fresh selection
    OriginSet {
        /// New origin
        origin: NodeId,
    },
    /// Second pick; the caller should compute this route
    RouteRequested {
        /// Picked origin
        origin: NodeId,
        /// Picked destination
        destination: NodeId,
    },
    /// Previous selection cleared and a new origin picked
    Reset {
        /// New origin
        origin: NodeId,
    },
}

/// Tracks picks across repeated navigation requests
#[derive(Debug, Clone, Default)]
pub struct SelectionSession {
    state: SelectionState,
}

impl SelectionSession {
    /// Start in [`SelectionState::Idle`]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Currently picked origin, if any
    #[must_use]
    pub fn origin(&self) -> Option<&str> {
        match &self.state {
            SelectionState::Idle => None,
            SelectionState::OriginChosen { origin } | SelectionState::RouteShown { origin, .. } => {
                Some(origin)
            }
        }
    }

    /// Register a pick
    ///
    /// Picking the current origin again while waiting for a destination
    /// clears the selection and re-picks that node as origin.
    pub fn pick(&mut self, node: impl Into<NodeId>) -> SelectionEvent {
        let node = node.into();
        let (next, event) = match std::mem::take(&mut self.state) {
            SelectionState::Idle => (
                SelectionState::OriginChosen {
                    origin: node.clone(),
                },
                SelectionEvent::OriginSet { origin: node },
            ),
            SelectionState::OriginChosen { origin } if origin != node => (
                SelectionState::RouteShown {
                    origin: origin.clone(),
                    destination: node.clone(),
                },
                SelectionEvent::RouteRequested {
                    origin,
                    destination: node,
                },
            ),
            SelectionState::OriginChosen { .. } | SelectionState::RouteShown { .. } => (
                SelectionState::OriginChosen {
                    origin: node.clone(),
                },
                SelectionEvent::Reset { origin: node },
            ),
        };

        debug!("Selection {:?} after {:?}", next, event);
        self.state = next;
        event
    }

    /// Drop any selection, e.g. when the map view is cleared
    pub fn reset(&mut self) {
        self.state = SelectionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_clicks_request_route() {
        let mut session = SelectionSession::new();
        assert_eq!(session.state(), &SelectionState::Idle);

        assert_eq!(
            session.pick("X"),
            SelectionEvent::OriginSet { origin: "X".into() }
        );
        assert_eq!(session.origin(), Some("X"));

        assert_eq!(
            session.pick("Y"),
            SelectionEvent::RouteRequested {
                origin: "X".into(),
                destination: "Y".into()
            }
        );
        assert_eq!(
            session.state(),
            &SelectionState::RouteShown {
                origin: "X".into(),
                destination: "Y".into()
            }
        );
    }

    #[test]
    fn test_third_click_resets() {
        let mut session = SelectionSession::new();
        session.pick("X");
        session.pick("Y");

        assert_eq!(session.pick("Z"), SelectionEvent::Reset { origin: "Z".into() });
        assert_eq!(
            session.state(),
            &SelectionState::OriginChosen { origin: "Z".into() }
        );

        // and the cycle continues from Z
        assert!(matches!(
            session.pick("X"),
            SelectionEvent::RouteRequested { ref origin, .. } if origin == "Z"
        ));
    }

    #[test]
    fn test_repick_origin_resets_to_same_origin() {
        let mut session = SelectionSession::new();
        session.pick("X");

        assert_eq!(session.pick("X"), SelectionEvent::Reset { origin: "X".into() });
        assert_eq!(
            session.state(),
            &SelectionState::OriginChosen { origin: "X".into() }
        );
    }

    #[test]
    fn test_repick_after_route_may_reuse_destination() {
        let mut session = SelectionSession::new();
        session.pick("X");
        session.pick("Y");

        assert_eq!(session.pick("Y"), SelectionEvent::Reset { origin: "Y".into() });
    }

    #[test]
    fn test_reset_forces_idle() {
        let mut session = SelectionSession::new();
        session.pick("X");
        session.pick("Y");
        session.reset();

        assert_eq!(session.state(), &SelectionState::Idle);
        assert_eq!(session.origin(), None);
        assert_eq!(
            session.pick("Y"),
            SelectionEvent::OriginSet { origin: "Y".into() }
        );
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&SelectionEvent::Reset { origin: "A".into() }).unwrap();
        assert_eq!(json, r#"{"event":"reset","origin":"A"}"#);
    }
}
