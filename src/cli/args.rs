// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for telegraph-mcp.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// telegraph-mcp - Telegraph publishing tools for MCP clients
#[derive(Parser, Debug)]
#[command(name = "telegraph-mcp")]
#[command(version, about = "MCP server for the Telegraph publishing API")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the MCP server on stdio (default when no command given)
    Serve,

    /// Convert content between Markdown, HTML and Telegraph nodes
    Convert(ConvertArgs),

    /// List the built-in page templates
    Templates,
}

/// Arguments for the convert subcommand
#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Input representation
    #[arg(long, default_value = "markdown")]
    pub from: ConvertFormat,

    /// Output representation
    #[arg(long, default_value = "nodes")]
    pub to: ConvertFormat,

    /// Input file (reads stdin when omitted)
    pub input: Option<PathBuf>,
}

/// Content representations the converter reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConvertFormat {
    Markdown,
    Html,
    /// Telegraph node array as JSON
    Nodes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_no_command() {
        let cli = Cli::parse_from(["telegraph-mcp"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_verbose_multiple() {
        let cli = Cli::parse_from(["telegraph-mcp", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_config_path() {
        let cli = Cli::parse_from(["telegraph-mcp", "--config", "/tmp/settings.json", "serve"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/settings.json")));
        assert!(matches!(cli.command, Some(Commands::Serve)));
    }

    #[test]
    fn test_convert_defaults() {
        let cli = Cli::parse_from(["telegraph-mcp", "convert"]);
        match cli.command {
            Some(Commands::Convert(args)) => {
                assert_eq!(args.from, ConvertFormat::Markdown);
                assert_eq!(args.to, ConvertFormat::Nodes);
                assert!(args.input.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_convert_with_formats_and_file() {
        let cli = Cli::parse_from([
            "telegraph-mcp",
            "convert",
            "--from",
            "html",
            "--to",
            "markdown",
            "page.html",
        ]);
        match cli.command {
            Some(Commands::Convert(args)) => {
                assert_eq!(args.from, ConvertFormat::Html);
                assert_eq!(args.to, ConvertFormat::Markdown);
                assert_eq!(args.input, Some(PathBuf::from("page.html")));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_convert_rejects_unknown_format() {
        let result = Cli::try_parse_from(["telegraph-mcp", "convert", "--from", "rst"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_templates_command() {
        let cli = Cli::parse_from(["telegraph-mcp", "templates"]);
        assert!(matches!(cli.command, Some(Commands::Templates)));
    }
}
