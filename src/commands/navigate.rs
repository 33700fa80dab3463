// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Navigate command - from a person's default point to a named building

use super::CommandContext;
use crate::types::Route;
use crate::view::MapView;
use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct NavigateOutput<'a> {
    building: &'a str,
    origin: &'a str,
    destination: &'a str,
    route: &'a Route,
    status: &'a str,
}

/// Run the navigate command
pub fn run(ctx: &CommandContext, building: &str, attribute: Option<&str>) -> Result<()> {
    let graph = Arc::new(ctx.load_graph()?);
    let resolver = ctx.resolver()?;
    let mut view = MapView::new(Arc::clone(&graph));

    let update = view.navigate(&resolver, attribute, building)?;
    let route = update.route.unwrap_or_else(Route::unreachable);

    if ctx.json {
        return ctx.print_json(&NavigateOutput {
            building: building.trim(),
            origin: resolver.origin_for(attribute),
            destination: resolver.destination_for(building)?,
            route: &route,
            status: &update.status,
        });
    }

    println!("{}", update.status);
    println!("{}", ctx.describe_route(&graph, &route));
    Ok(())
}
