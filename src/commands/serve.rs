// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! MCP server command

use std::sync::Arc;

use crate::config::Settings;
use crate::error::Result;
use crate::mcp::McpServer;
use crate::telegraph::TelegraphClient;
use crate::tools::{ToolContext, ToolRegistry};

/// Build the server for a validated configuration
pub fn build_server(settings: Settings) -> Result<McpServer> {
    let client = TelegraphClient::from_settings(&settings.telegraph)?;
    tracing::info!(api = client.api_base_url(), "[MCP] Using Telegraph API");

    if settings.access_token().is_none() {
        tracing::info!(
            "[MCP] No access token configured (${}); tools will require an explicit access_token",
            settings.telegraph.access_token_env
        );
    }

    let registry = ToolRegistry::with_builtins();
    for name in registry.names() {
        tracing::debug!("[MCP] Registering tool: {}", name);
    }

    let context = ToolContext::new(Arc::new(client), Arc::new(settings));
    Ok(McpServer::new(registry, context))
}

/// Execute the serve command
pub async fn execute(settings: Settings) -> Result<()> {
    tracing::info!(
        "[MCP] Protocol version: {}",
        crate::mcp::PROTOCOL_VERSION
    );
    let server = build_server(settings)?;
    tracing::info!("[MCP] Server ready - listening on stdio");
    server.run().await
}
