// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! telegraph-mcp - MCP server for the Telegraph publishing API
//!
//! Entry point for the telegraph-mcp CLI application.

use clap::Parser;

use telegraph_mcp::cli::{Cli, Commands};
use telegraph_mcp::commands;
use telegraph_mcp::config::Settings;
use telegraph_mcp::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing. Stdout carries the protocol stream, so logs go to stderr.
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    if cli.verbose > 0 {
        let directive = if cli.verbose > 1 {
            "telegraph_mcp=trace"
        } else {
            "telegraph_mcp=debug"
        };
        if let Ok(parsed) = directive.parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Load settings
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    settings.validate()?;

    // Dispatch to appropriate command
    match cli.command {
        None | Some(Commands::Serve) => {
            commands::serve::execute(settings).await?;
        }
        Some(Commands::Convert(args)) => {
            commands::convert::execute(&args)?;
        }
        Some(Commands::Templates) => {
            commands::templates::execute()?;
        }
    }

    Ok(())
}
