// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Page tools
//!
//! Content arrives as a string (HTML or Markdown) or as a node array and is
//! normalized into Telegraph nodes before it is sent.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::content::{self, unsupported_tags, ContentFormat, Node, RawContent};
use crate::error::Result;
use crate::telegraph::{
    CreatePageRequest, EditPageRequest, GetPageListRequest, GetPageRequest,
    DEFAULT_PAGE_LIST_LIMIT,
};
use crate::tools::{
    api_result, parse_args, SchemaBuilder, Tool, ToolContext, ToolDefinition, ToolResult,
};

const TOKEN_HELP: &str = "Account access token (defaults to the configured token)";
const CONTENT_HELP: &str = "Page body: an HTML or Markdown string (see format), or an array of Telegraph nodes";
const FORMAT_HELP: &str = "How to read string content: html (default) or markdown";

/// Normalize tool content into nodes, warning about tags Telegraph will reject
pub fn prepare_content(raw: RawContent, format: ContentFormat) -> Vec<Node> {
    let nodes = content::to_nodes(raw, format);
    let unsupported = unsupported_tags(&nodes);
    if !unsupported.is_empty() {
        tracing::warn!(
            tags = %unsupported.join(", "),
            "content contains tags Telegraph does not support"
        );
    }
    nodes
}

/// Tool for publishing a new page
pub struct CreatePageTool;

#[derive(Debug, Deserialize)]
struct CreatePageArgs {
    access_token: Option<String>,
    title: String,
    content: RawContent,
    format: Option<ContentFormat>,
    author_name: Option<String>,
    author_url: Option<String>,
    #[serde(default)]
    return_content: bool,
}

#[async_trait]
impl Tool for CreatePageTool {
    fn name(&self) -> &str {
        "create_page"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "create_page".to_string(),
            description: "Publish a new Telegraph page. Content may be HTML, Markdown or a node array. Returns the page with its path and URL.".to_string(),
            input_schema: SchemaBuilder::new()
                .string("access_token", TOKEN_HELP, false)
                .string("title", "Page title (1-256 characters)", true)
                .content("content", CONTENT_HELP, true)
                .enumeration("format", FORMAT_HELP, &["html", "markdown"], false)
                .string("author_name", "Author name shown below the title (0-128 characters)", false)
                .string("author_url", "Link opened when the author name is clicked (0-512 characters)", false)
                .boolean("return_content", "Include the stored content in the response", false)
                .build(),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult> {
        let args: CreatePageArgs = parse_args(input)?;
        let format = context.content_format(args.format);
        let request = CreatePageRequest {
            access_token: context.access_token(args.access_token)?,
            title: args.title,
            author_name: context.author_name(args.author_name),
            author_url: context.author_url(args.author_url),
            content: prepare_content(args.content, format),
            return_content: args.return_content,
        };

        tracing::info!(title = %request.title, nodes = request.content.len(), "creating page");
        api_result(context.client().create_page(&request).await)
    }
}

/// Tool for replacing an existing page
pub struct EditPageTool;

#[derive(Debug, Deserialize)]
struct EditPageArgs {
    access_token: Option<String>,
    path: String,
    title: String,
    content: RawContent,
    format: Option<ContentFormat>,
    author_name: Option<String>,
    author_url: Option<String>,
    #[serde(default)]
    return_content: bool,
}

#[async_trait]
impl Tool for EditPageTool {
    fn name(&self) -> &str {
        "edit_page"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "edit_page".to_string(),
            description: "Replace the title and content of an existing Telegraph page owned by the account.".to_string(),
            input_schema: SchemaBuilder::new()
                .string("access_token", TOKEN_HELP, false)
                .string("path", "Page path, e.g. Sample-Page-12-15", true)
                .string("title", "Page title (1-256 characters)", true)
                .content("content", CONTENT_HELP, true)
                .enumeration("format", FORMAT_HELP, &["html", "markdown"], false)
                .string("author_name", "Author name shown below the title", false)
                .string("author_url", "Link opened when the author name is clicked", false)
                .boolean("return_content", "Include the stored content in the response", false)
                .build(),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult> {
        let args: EditPageArgs = parse_args(input)?;
        let format = context.content_format(args.format);
        let request = EditPageRequest {
            path: args.path,
            access_token: context.access_token(args.access_token)?,
            title: args.title,
            author_name: context.author_name(args.author_name),
            author_url: context.author_url(args.author_url),
            content: prepare_content(args.content, format),
            return_content: args.return_content,
        };

        tracing::info!(path = %request.path, "editing page");
        api_result(context.client().edit_page(&request).await)
    }
}

/// Tool for fetching a page
pub struct GetPageTool;

#[derive(Debug, Deserialize)]
struct GetPageArgs {
    path: String,
    #[serde(default)]
    return_content: bool,
}

#[async_trait]
impl Tool for GetPageTool {
    fn name(&self) -> &str {
        "get_page"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_page".to_string(),
            description: "Get a Telegraph page by path. No access token is needed.".to_string(),
            input_schema: SchemaBuilder::new()
                .string("path", "Page path, e.g. Sample-Page-12-15", true)
                .boolean("return_content", "Include the page content as a node array", false)
                .build(),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult> {
        let args: GetPageArgs = parse_args(input)?;
        let request = GetPageRequest {
            path: args.path,
            return_content: args.return_content,
        };
        api_result(context.client().get_page(&request).await)
    }
}

/// Tool for listing the account's pages
pub struct GetPageListTool;

#[derive(Debug, Deserialize)]
struct GetPageListArgs {
    access_token: Option<String>,
    #[serde(default)]
    offset: u32,
    limit: Option<u32>,
}

#[async_trait]
impl Tool for GetPageListTool {
    fn name(&self) -> &str {
        "get_page_list"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_page_list".to_string(),
            description: "List pages belonging to a Telegraph account, newest first.".to_string(),
            input_schema: SchemaBuilder::new()
                .string("access_token", TOKEN_HELP, false)
                .integer("offset", "Number of pages to skip (default: 0)", false)
                .integer("limit", "Number of pages to return, 0-200 (default: 50)", false)
                .build(),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult> {
        let args: GetPageListArgs = parse_args(input)?;
        let request = GetPageListRequest {
            access_token: context.access_token(args.access_token)?,
            offset: args.offset,
            limit: args.limit.unwrap_or(DEFAULT_PAGE_LIST_LIMIT),
        };
        api_result(context.client().get_page_list(&request).await)
    }
}
