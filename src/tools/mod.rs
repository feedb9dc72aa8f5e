// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Tool system for telegraph-mcp
//!
//! Every MCP tool is a [`Tool`] registered in a [`ToolRegistry`]. Tools share
//! one Telegraph client and the loaded settings through [`ToolContext`].

pub mod builtin;
pub mod definition;

pub use definition::*;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Settings;
use crate::content::ContentFormat;
use crate::error::{ApiError, Result, TelegraphError};
use crate::telegraph::TelegraphClient;

/// Context provided to tools during execution
#[derive(Debug, Clone)]
pub struct ToolContext {
    client: Arc<TelegraphClient>,
    settings: Arc<Settings>,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(client: Arc<TelegraphClient>, settings: Arc<Settings>) -> Self {
        Self { client, settings }
    }

    pub fn client(&self) -> &TelegraphClient {
        &self.client
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The explicit token, else the configured default.
    pub fn access_token(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .filter(|token| !token.trim().is_empty())
            .or_else(|| self.settings.access_token())
            .ok_or_else(|| {
                TelegraphError::InvalidInput(format!(
                    "access_token is required (pass it or set {})",
                    self.settings.telegraph.access_token_env
                ))
            })
    }

    pub fn author_name(&self, explicit: Option<String>) -> Option<String> {
        explicit.or_else(|| self.settings.defaults.author_name.clone())
    }

    pub fn author_url(&self, explicit: Option<String>) -> Option<String> {
        explicit.or_else(|| self.settings.defaults.author_url.clone())
    }

    /// Format for inbound string content
    pub fn content_format(&self, explicit: Option<ContentFormat>) -> ContentFormat {
        explicit.unwrap_or(self.settings.defaults.content_format)
    }

    /// Format for exported pages
    pub fn export_format(&self, explicit: Option<ContentFormat>) -> ContentFormat {
        explicit.unwrap_or(self.settings.defaults.export_format)
    }
}

/// Result of tool execution
#[derive(Debug, Clone)]
pub struct ToolResult {
    /// The output of the tool
    pub output: ToolOutput,
}

/// Output from a tool
#[derive(Debug, Clone)]
pub enum ToolOutput {
    /// Successful output
    Success(String),
    /// Error output
    Error(String),
}

impl ToolResult {
    /// Create a successful result
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: ToolOutput::Success(output.into()),
        }
    }

    /// Create an error result
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            output: ToolOutput::Error(error.into()),
        }
    }

    /// Successful result holding pretty-printed JSON
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::success(serde_json::to_string_pretty(value)?))
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self.output, ToolOutput::Error(_))
    }

    /// Get the output text
    pub fn output_text(&self) -> &str {
        match &self.output {
            ToolOutput::Success(s) => s,
            ToolOutput::Error(s) => s,
        }
    }
}

/// Turn a client call into a tool result.
///
/// A request Telegraph rejected (`ok: false`) becomes an error result the
/// caller can read; every other failure propagates.
pub fn api_result<T: Serialize>(result: Result<T>) -> Result<ToolResult> {
    match result {
        Ok(value) => ToolResult::json(&value),
        Err(TelegraphError::Api(ApiError::Telegraph(message))) => {
            Ok(ToolResult::error(format!("Telegraph error: {}", message)))
        }
        Err(e) => Err(e),
    }
}

/// Decode tool arguments, reporting shape errors as invalid input
pub fn parse_args<T: DeserializeOwned>(input: Value) -> Result<T> {
    let input = if input.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        input
    };
    serde_json::from_value(input)
        .map_err(|e| TelegraphError::InvalidInput(format!("invalid arguments: {}", e)))
}

/// Trait for implementing tools
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool definition for MCP clients
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool with given input
    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult>;

    /// Get the tool name
    fn name(&self) -> &str;
}

/// Registry of available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry with all built-in tools
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        // Account
        registry.register(Arc::new(builtin::CreateAccountTool));
        registry.register(Arc::new(builtin::EditAccountInfoTool));
        registry.register(Arc::new(builtin::GetAccountInfoTool));
        registry.register(Arc::new(builtin::RevokeAccessTokenTool));

        // Pages
        registry.register(Arc::new(builtin::CreatePageTool));
        registry.register(Arc::new(builtin::EditPageTool));
        registry.register(Arc::new(builtin::GetPageTool));
        registry.register(Arc::new(builtin::GetPageListTool));
        registry.register(Arc::new(builtin::GetViewsTool));

        // Media, templates and export
        registry.register(Arc::new(builtin::UploadImageTool));
        registry.register(Arc::new(builtin::ListTemplatesTool));
        registry.register(Arc::new(builtin::CreateFromTemplateTool));
        registry.register(Arc::new(builtin::ExportPageTool));
        registry.register(Arc::new(builtin::BackupAccountTool));

        registry
    }

    /// Register a tool
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Get all tool definitions, sorted by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> =
            self.tools.values().map(|t| t.definition()).collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Get all tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
