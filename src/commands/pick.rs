// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Pick command - replay a sequence of map clicks

use super::CommandContext;
use crate::selection::SelectionEvent;
use crate::view::MapView;
use anyhow::Result;
use std::sync::Arc;

/// Run the pick command
pub fn run(ctx: &CommandContext, clicks: &[String]) -> Result<()> {
    let graph = Arc::new(ctx.load_graph()?);
    let mut view = MapView::new(graph);

    let updates: Vec<_> = clicks.iter().map(|node| view.click(node)).collect();

    if ctx.json {
        return ctx.print_json(&updates);
    }

    println!("{} locations loaded", view.graph().node_count());
    for (node, update) in clicks.iter().zip(&updates) {
        let event = match &update.event {
            Some(SelectionEvent::OriginSet { origin }) => format!("origin set: {origin}"),
            Some(SelectionEvent::RouteRequested {
                origin,
                destination,
            }) => format!("route requested: {origin} -> {destination}"),
            Some(SelectionEvent::Reset { origin }) => format!("reset, origin: {origin}"),
            None => ctx.alert("ignored (not a map location)"),
        };
        println!("click {node}: {event}");
        println!("  {}", update.status);
        if let Some(route) = update.route.as_ref().filter(|r| r.is_reachable()) {
            println!("  {}", ctx.accent(&route.to_string()));
        }
    }
    Ok(())
}
