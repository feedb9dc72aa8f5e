// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Model Context Protocol (MCP) server
//!
//! Exposes the Telegraph tools, account/page resources and authoring prompts
//! to MCP clients over stdio.

pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod server;
pub mod transport;

pub use protocol::*;
pub use server::McpServer;
pub use transport::{Incoming, StdioTransport};
