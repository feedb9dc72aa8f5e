// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Image upload tool

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

use crate::error::{ApiError, Result, TelegraphError};
use crate::tools::{parse_args, SchemaBuilder, Tool, ToolContext, ToolDefinition, ToolResult};

/// Tool for uploading a local image or video to Telegraph
pub struct UploadImageTool;

#[derive(Debug, Deserialize)]
struct UploadImageArgs {
    file_path: PathBuf,
}

#[async_trait]
impl Tool for UploadImageTool {
    fn name(&self) -> &str {
        "upload_image"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "upload_image".to_string(),
            description: "Upload a local jpg, jpeg, png, gif or mp4 file (up to 5 MB) to Telegraph and return its URL for use in page content.".to_string(),
            input_schema: SchemaBuilder::new()
                .string("file_path", "Path to the file to upload", true)
                .build(),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult> {
        let args: UploadImageArgs = parse_args(input)?;

        if !args.file_path.exists() {
            return Err(TelegraphError::InvalidInput(format!(
                "File not found: {}",
                args.file_path.display()
            )));
        }

        match context.client().upload_file(&args.file_path).await {
            Ok(url) => {
                tracing::info!(path = %args.file_path.display(), %url, "uploaded file");
                ToolResult::json(&serde_json::json!({ "url": url }))
            }
            Err(TelegraphError::Api(ApiError::Telegraph(message))) => {
                Ok(ToolResult::error(format!("Upload failed: {}", message)))
            }
            Err(e) => Err(e),
        }
    }
}
