// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

use anyhow::Result;

/// Write shell completions for `command` to stdout
pub fn run(shell: clap_complete::Shell, command: &mut clap::Command) -> Result<()> {
    let name = command.get_name().to_string();
    clap_complete::generate(shell, command, name, &mut std::io::stdout());
    Ok(())
}
