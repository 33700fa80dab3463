// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Info command - summary of the loaded map

use super::CommandContext;
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct MapSummary<'a> {
    source: String,
    nodes: usize,
    edges: usize,
    dropped_edges: usize,
    components: usize,
    buildings: Vec<&'a str>,
}

/// Run the info command
pub fn run(ctx: &CommandContext) -> Result<()> {
    let graph = ctx.load_graph()?;
    let resolver = ctx.resolver()?;

    let summary = MapSummary {
        source: ctx.config.data.path.display().to_string(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        dropped_edges: graph.dropped_edges(),
        components: graph.component_count(),
        buildings: resolver.buildings().collect(),
    };

    if ctx.json {
        return ctx.print_json(&summary);
    }

    println!("Campus map: {}", summary.source);
    println!("  locations:  {}", summary.nodes);
    println!("  paths:      {}", summary.edges);
    if summary.dropped_edges > 0 {
        println!(
            "  {}",
            ctx.alert(&format!("dropped:    {} malformed path row(s)", summary.dropped_edges))
        );
    }
    if summary.components > 1 {
        println!(
            "  {}",
            ctx.alert(&format!(
                "regions:    {} (some locations are unreachable from others)",
                summary.components
            ))
        );
    }
    println!("  buildings:  {}", summary.buildings.join(", "));

    let missing: Vec<_> = ctx
        .config
        .navigation
        .origins
        .values()
        .chain(ctx.config.navigation.destinations.values())
        .filter(|node| !graph.contains(node))
        .collect();
    if !missing.is_empty() {
        let mut ids: Vec<&str> = missing.iter().map(|s| s.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        println!(
            "  {}",
            ctx.alert(&format!("configured but missing from map: {}", ids.join(", ")))
        );
    }

    Ok(())
}
