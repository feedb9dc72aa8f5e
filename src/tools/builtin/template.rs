// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Template tools

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use super::page::prepare_content;
use crate::content::{ContentFormat, RawContent};
use crate::error::Result;
use crate::telegraph::CreatePageRequest;
use crate::templates::{builtin_templates, render_template};
use crate::tools::{
    api_result, parse_args, SchemaBuilder, Tool, ToolContext, ToolDefinition, ToolResult,
};

/// Tool for listing built-in templates
pub struct ListTemplatesTool;

#[async_trait]
impl Tool for ListTemplatesTool {
    fn name(&self) -> &str {
        "list_templates"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "list_templates".to_string(),
            description: "List the built-in page templates and the fields each one takes.".to_string(),
            input_schema: SchemaBuilder::new().build(),
        }
    }

    async fn execute(&self, _input: Value, _context: &ToolContext) -> Result<ToolResult> {
        ToolResult::json(&builtin_templates())
    }
}

/// Tool for publishing a page from a template
pub struct CreateFromTemplateTool;

#[derive(Debug, Deserialize)]
struct CreateFromTemplateArgs {
    access_token: Option<String>,
    template: String,
    title: String,
    #[serde(default)]
    fields: HashMap<String, String>,
    author_name: Option<String>,
    author_url: Option<String>,
}

#[async_trait]
impl Tool for CreateFromTemplateTool {
    fn name(&self) -> &str {
        "create_from_template"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "create_from_template".to_string(),
            description: "Fill a built-in template with field values and publish it as a new page. Field values may use Markdown. Use list_templates to see available templates.".to_string(),
            input_schema: SchemaBuilder::new()
                .string("access_token", "Account access token (defaults to the configured token)", false)
                .string("template", "Template name", true)
                .string("title", "Page title (1-256 characters)", true)
                .object("fields", "Template field values by name", false)
                .string("author_name", "Author name shown below the title", false)
                .string("author_url", "Link opened when the author name is clicked", false)
                .build(),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult> {
        let args: CreateFromTemplateArgs = parse_args(input)?;
        let access_token = context.access_token(args.access_token)?;
        let markdown = render_template(&args.template, &args.fields)?;

        let request = CreatePageRequest {
            access_token,
            title: args.title,
            author_name: context.author_name(args.author_name),
            author_url: context.author_url(args.author_url),
            content: prepare_content(RawContent::Text(markdown), ContentFormat::Markdown),
            return_content: false,
        };

        tracing::info!(template = %args.template, title = %request.title, "creating page from template");
        api_result(context.client().create_page(&request).await)
    }
}
