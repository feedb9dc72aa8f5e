// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for telegraph-mcp
//!
//! The content pipeline never fails; everything in here belongs to the
//! layers around it (HTTP, configuration, the MCP transport).

use thiserror::Error;

/// Main error type for telegraph-mcp operations
#[derive(Error, Debug)]
pub enum TelegraphError {
    /// Telegraph API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Invalid tool arguments or out-of-range field values
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Template lookup or filling errors
    #[error("Template error: {0}")]
    Template(String),

    /// MCP transport errors (closed stdin, broken pipe)
    #[error("Transport error: {0}")]
    Transport(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Telegraph API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Telegraph answered `ok: false`
    #[error("Telegraph rejected the request: {0}")]
    Telegraph(String),

    /// Non-success HTTP status
    #[error("API error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Response body did not match the documented shape
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Timeout waiting for response
    #[error("Request timed out")]
    Timeout,

    /// Network connectivity error
    #[error("Network error: {0}")]
    Network(String),
}

/// Result type alias for telegraph-mcp operations
pub type Result<T> = std::result::Result<T, TelegraphError>;

impl TelegraphError {
    /// Whether the error was caused by the caller's arguments
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, TelegraphError::InvalidInput(_))
    }
}
