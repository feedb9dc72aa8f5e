// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! telegraph-mcp - Telegraph publishing tools over the Model Context Protocol.
//!
//! This crate exposes the runtime used by the `telegraph-mcp` CLI (`src/main.rs`).
//!
//! Architecture highlights:
//! - `content`: transcoding between HTML, Markdown and Telegraph node trees
//! - `telegraph`: typed HTTP client for the Telegraph API and upload endpoint
//! - `tools`: MCP tools wrapping each Telegraph operation
//! - `mcp`: JSON-RPC protocol types, stdio transport and the server loop
//! - `templates`: built-in Markdown page templates
//! - `config`, `cli`, `commands`: settings file, argument parsing and subcommands

pub mod cli;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod mcp;
pub mod telegraph;
pub mod templates;
pub mod tools;

pub use error::{ApiError, Result, TelegraphError};
