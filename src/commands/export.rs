// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Export command - exports the campus map, optionally with a route drawn on it

use super::CommandContext;
use crate::pathfinder::shortest_path;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Graphviz DOT format
    Dot,
    /// JSON format
    Json,
}

impl ExportFormat {
    /// Parse format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Some(Self::Dot),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Get file extension for format
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Json => "json",
        }
    }
}

/// Run the export command
pub fn run(
    ctx: &CommandContext,
    format: &str,
    output: Option<PathBuf>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    info!("Exporting to {}", format);

    let export_format = ExportFormat::parse(format)
        .ok_or_else(|| anyhow::anyhow!("Unknown export format: {}. Supported: dot, json", format))?;

    let graph = ctx.load_graph()?;

    let route = match (from, to) {
        (Some(from), Some(to)) => {
            let route = shortest_path(&graph, from, to);
            if !route.is_reachable() {
                eprintln!("{}", ctx.alert(&format!("Warning: no path from {from} to {to}")));
            }
            Some(route)
        }
        (None, None) => None,
        _ => anyhow::bail!("--from and --to must be given together"),
    };

    let content = match export_format {
        ExportFormat::Dot => graph.to_dot(route.as_ref()),
        ExportFormat::Json => graph.to_json(route.as_ref())?,
    };

    match output {
        Some(mut path) => {
            if path.extension().is_none() {
                path.set_extension(export_format.extension());
            }
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
