// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! MCP server implementation

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::prompts;
use super::protocol::*;
use super::resources;
use super::transport::{Incoming, StdioTransport};
use crate::error::{Result, TelegraphError};
use crate::tools::{ToolContext, ToolRegistry};

type Handled = std::result::Result<Value, JsonRpcError>;

const INSTRUCTIONS: &str = "Publish and manage Telegraph (telegra.ph) pages. \
Page content may be HTML, Markdown (format: \"markdown\") or a Telegraph node array. \
Calls that need an account use the configured access token unless one is passed.";

/// MCP server state
pub struct McpServer {
    /// Available tools
    registry: Arc<ToolRegistry>,
    /// Shared client and settings handed to every tool call
    context: ToolContext,
    /// Server initialized
    initialized: Arc<RwLock<bool>>,
    /// Transport layer
    transport: Arc<StdioTransport>,
}

impl McpServer {
    /// Create a server on stdin/stdout
    pub fn new(registry: ToolRegistry, context: ToolContext) -> Self {
        Self::with_transport(registry, context, StdioTransport::new())
    }

    /// Create a server on a specific transport
    pub fn with_transport(
        registry: ToolRegistry,
        context: ToolContext,
        transport: StdioTransport,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            context,
            initialized: Arc::new(RwLock::new(false)),
            transport: Arc::new(transport),
        }
    }

    /// Whether the client has sent `notifications/initialized`
    pub async fn is_initialized(&self) -> bool {
        *self.initialized.read().await
    }

    /// Run the MCP server until the client closes the stream
    pub async fn run(&self) -> Result<()> {
        tracing::info!(tools = self.registry.len(), "[MCP] Starting Model Context Protocol server");

        loop {
            let incoming = match self.transport.read_message().await {
                Ok(Some(incoming)) => incoming,
                Ok(None) => {
                    tracing::info!("[MCP] Client closed the stream, shutting down");
                    break;
                }
                Err(e) => {
                    tracing::error!("[MCP] Failed to read request: {}", e);
                    return Err(TelegraphError::Transport(e.to_string()));
                }
            };

            let response = match incoming {
                Incoming::Request(request) => self.handle_request(request).await,
                Incoming::ParseError(detail) => Some(Self::error_response(
                    None,
                    JsonRpcError {
                        data: Some(Value::String(detail)),
                        ..JsonRpcError::parse_error()
                    },
                )),
                Incoming::InvalidRequest(id) => {
                    Some(Self::error_response(id, JsonRpcError::invalid_request()))
                }
            };

            if let Some(response) = response {
                if let Err(e) = self.transport.write_response(&response).await {
                    tracing::error!("[MCP] Failed to write response: {}", e);
                    return Err(TelegraphError::Transport(e.to_string()));
                }
            }
        }

        Ok(())
    }

    /// Handle one JSON-RPC message. Notifications return `None`.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::debug!(method = %request.method, "[MCP] Received request");

        if request.is_notification() {
            self.handle_notification(&request).await;
            return None;
        }

        let id = request.id.clone();
        let params = request.params;
        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(params),
            "initialized" | "notifications/initialized" => {
                self.mark_initialized().await;
                Ok(serde_json::json!({}))
            }
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(params).await,
            "resources/list" => to_result(ResourcesListResult {
                resources: resources::list_resources(),
            }),
            "resources/templates/list" => to_result(ResourceTemplatesListResult {
                resource_templates: resources::resource_templates(),
            }),
            "resources/read" => self.handle_resources_read(params).await,
            "prompts/list" => to_result(PromptsListResult {
                prompts: prompts::list_prompts(),
            }),
            "prompts/get" => Self::handle_prompts_get(params),
            other => {
                tracing::debug!(method = other, "[MCP] Unknown method");
                Err(JsonRpcError::method_not_found())
            }
        };

        Some(match result {
            Ok(value) => Self::success_response(id, value),
            Err(error) => Self::error_response(id, error),
        })
    }

    async fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "initialized" | "notifications/initialized" => self.mark_initialized().await,
            other => tracing::debug!(method = other, "[MCP] Ignoring notification"),
        }
    }

    async fn mark_initialized(&self) {
        let mut initialized = self.initialized.write().await;
        *initialized = true;
        tracing::info!("[MCP] Server initialized");
    }

    /// Handle initialize request
    fn handle_initialize(&self, params: Option<Value>) -> Handled {
        let params: InitializeParams = match params {
            Some(_) => parse_params(params)?,
            None => InitializeParams::default(),
        };

        tracing::info!(
            "[MCP] Initialize from client: {} v{} (protocol {})",
            params.client_info.name,
            params.client_info.version,
            params.protocol_version
        );

        to_result(InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                prompts: Some(PromptsCapability {
                    list_changed: Some(false),
                }),
                resources: Some(ResourcesCapability {
                    subscribe: Some(false),
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: "telegraph-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        })
    }

    /// Handle tools/list request
    fn handle_tools_list(&self) -> Handled {
        let mut tools = Vec::with_capacity(self.registry.len());
        for def in self.registry.definitions() {
            tools.push(Tool {
                name: def.name,
                description: def.description,
                input_schema: serde_json::to_value(&def.input_schema).map_err(internal)?,
            });
        }
        to_result(ToolsListResult { tools })
    }

    /// Handle tools/call request
    async fn handle_tools_call(&self, params: Option<Value>) -> Handled {
        let params: CallToolParams = parse_params(params)?;
        tracing::info!("[MCP] Calling tool: {}", params.name);

        let tool = self.registry.get(&params.name).ok_or_else(|| {
            JsonRpcError::invalid_params().with_message(format!("Unknown tool: {}", params.name))
        })?;
        let args = params
            .arguments
            .unwrap_or(Value::Object(serde_json::Map::new()));

        let (text, is_error) = match tool.execute(args, &self.context).await {
            Ok(result) => (result.output_text().to_string(), result.is_error()),
            Err(e) if e.is_invalid_input() => {
                return Err(JsonRpcError::invalid_params().with_message(e.to_string()));
            }
            Err(e) => {
                tracing::warn!(tool = %params.name, "[MCP] Tool execution failed: {}", e);
                (format!("Tool execution failed: {}", e), true)
            }
        };

        to_result(CallToolResult {
            content: vec![ToolContent::Text { text }],
            is_error: is_error.then_some(true),
        })
    }

    /// Handle resources/read request
    async fn handle_resources_read(&self, params: Option<Value>) -> Handled {
        let params: ReadResourceParams = parse_params(params)?;
        match resources::read_resource(&self.context, &params.uri).await {
            Ok(result) => to_result(result),
            Err(e) if e.is_invalid_input() => {
                Err(JsonRpcError::invalid_params().with_message(e.to_string()))
            }
            Err(e) => Err(JsonRpcError::internal_error().with_message(e.to_string())),
        }
    }

    /// Handle prompts/get request
    fn handle_prompts_get(params: Option<Value>) -> Handled {
        let params: GetPromptParams = parse_params(params)?;
        let result = prompts::get_prompt(&params.name, &params.arguments)
            .map_err(|e| JsonRpcError::invalid_params().with_message(e.to_string()))?;
        to_result(result)
    }

    /// Create a success response
    fn success_response(id: Option<Value>, result: Value) -> JsonRpcResponse {
        JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response
    fn error_response(id: Option<Value>, error: JsonRpcError) -> JsonRpcResponse {
        JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> std::result::Result<T, JsonRpcError> {
    let params = params.ok_or_else(JsonRpcError::invalid_params)?;
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params().with_message(format!("Invalid params: {}", e)))
}

fn to_result<T: Serialize>(value: T) -> Handled {
    serde_json::to_value(value).map_err(internal)
}

fn internal(error: serde_json::Error) -> JsonRpcError {
    JsonRpcError::internal_error().with_message(error.to_string())
}
