// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Route command - shortest path between two map locations

use super::CommandContext;
use crate::pathfinder::shortest_path;
use anyhow::Result;
use tracing::info;

/// Run the route command
pub fn run(ctx: &CommandContext, from: &str, to: &str) -> Result<()> {
    info!("Routing {} -> {}", from, to);

    let graph = ctx.load_graph()?;
    for node in [from, to] {
        if !graph.contains(node) {
            eprintln!("{}", ctx.alert(&format!("Warning: {node} is not on the map")));
        }
    }

    let route = shortest_path(&graph, from, to);

    if ctx.json {
        return ctx.print_json(&route);
    }

    println!("{}", ctx.describe_route(&graph, &route));
    Ok(())
}
