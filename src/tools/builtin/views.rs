// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Page view statistics tool

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::telegraph::GetViewsRequest;
use crate::tools::{
    api_result, parse_args, SchemaBuilder, Tool, ToolContext, ToolDefinition, ToolResult,
};

/// Tool for reading a page's view count
pub struct GetViewsTool;

#[derive(Debug, Deserialize)]
struct GetViewsArgs {
    path: String,
    year: Option<u32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
}

#[async_trait]
impl Tool for GetViewsTool {
    fn name(&self) -> &str {
        "get_views"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_views".to_string(),
            description: "Get the number of views of a Telegraph page, in total or for a given year, month, day or hour. Each finer unit requires the coarser ones.".to_string(),
            input_schema: SchemaBuilder::new()
                .string("path", "Page path, e.g. Sample-Page-12-15", true)
                .integer("year", "Year, 2000-2100", false)
                .integer("month", "Month, 1-12 (requires year)", false)
                .integer("day", "Day, 1-31 (requires month)", false)
                .integer("hour", "Hour, 0-24 (requires day)", false)
                .build(),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult> {
        let args: GetViewsArgs = parse_args(input)?;
        let request = GetViewsRequest {
            path: args.path,
            year: args.year,
            month: args.month,
            day: args.day,
            hour: args.hour,
        };
        api_result(context.client().get_views(&request).await)
    }
}
