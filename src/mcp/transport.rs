// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! MCP transport layer - stdio-based communication
//!
//! MCP servers communicate via stdio (standard input/output) using JSON-RPC 2.0,
//! one message per line.

use serde_json::Value;
use std::io::{self, BufRead, BufReader, Write};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::protocol::{JsonRpcRequest, JsonRpcResponse};
use crate::error::Result;

/// One line read from the client
#[derive(Debug)]
pub enum Incoming {
    /// A well-formed request or notification
    Request(JsonRpcRequest),
    /// Not JSON at all
    ParseError(String),
    /// JSON, but not a JSON-RPC request; carries the id when one was present
    InvalidRequest(Option<Value>),
}

pub type Reader = Box<dyn BufRead + Send>;
pub type Writer = Box<dyn Write + Send>;

/// Line-delimited JSON-RPC transport over a reader/writer pair
pub struct StdioTransport {
    reader: Arc<Mutex<Reader>>,
    writer: Arc<Mutex<Writer>>,
}

impl StdioTransport {
    /// Create a transport on the process stdin/stdout
    pub fn new() -> Self {
        Self::from_io(Box::new(BufReader::new(io::stdin())), Box::new(io::stdout()))
    }

    /// Create a transport on arbitrary streams
    pub fn from_io(reader: Reader, writer: Writer) -> Self {
        Self {
            reader: Arc::new(Mutex::new(reader)),
            writer: Arc::new(Mutex::new(writer)),
        }
    }

    /// Read the next message. `Ok(None)` means the client closed the stream.
    pub async fn read_message(&self) -> Result<Option<Incoming>> {
        let mut reader = self.reader.lock().await;

        loop {
            let mut line = String::new();
            if reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            return Ok(Some(classify(line)));
        }
    }

    /// Write a JSON-RPC response as one line
    pub async fn write_response(&self, response: &JsonRpcResponse) -> Result<()> {
        let json = serde_json::to_string(response)?;

        let mut writer = self.writer.lock().await;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        Ok(())
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn classify(line: &str) -> Incoming {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Failed to parse JSON-RPC message: {}", e);
            return Incoming::ParseError(e.to_string());
        }
    };

    let id = value.get("id").cloned().filter(|id| !id.is_null());
    match serde_json::from_value::<JsonRpcRequest>(value) {
        Ok(request) => Incoming::Request(request),
        Err(e) => {
            tracing::warn!("Message is not a JSON-RPC request: {}", e);
            Incoming::InvalidRequest(id)
        }
    }
}
