// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

use super::CommandContext;
use anyhow::Result;

/// Run the neighbors command
pub fn run(ctx: &CommandContext, node: &str) -> Result<()> {
    let graph = ctx.load_graph()?;
    let neighbors = graph.neighbors(node);

    if ctx.json {
        return ctx.print_json(&neighbors);
    }

    if !graph.contains(node) {
        println!("{}", ctx.alert(&format!("{node} is not on the map")));
        return Ok(());
    }
    if neighbors.is_empty() {
        println!("{} has no connections", graph.label(node));
        return Ok(());
    }

    println!("{} ({}):", graph.label(node), neighbors.len());
    for (id, weight) in &neighbors {
        println!("  {:<12} {:>10.2}", id, weight);
    }
    Ok(())
}
