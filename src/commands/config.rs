// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

use super::CommandContext;
use anyhow::Result;

/// Print the effective configuration
pub fn run(ctx: &CommandContext) -> Result<()> {
    if ctx.json {
        return ctx.print_json(&ctx.config);
    }
    print!("{}", ctx.config.to_toml()?);
    Ok(())
}
