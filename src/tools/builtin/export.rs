// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Export tools
//!
//! Pages are fetched with their content and serialized to Markdown or HTML,
//! optionally written to disk.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::content::{self, ContentFormat};
use crate::error::Result;
use crate::telegraph::{GetPageRequest, Page, TelegraphClient};
use crate::tools::{
    api_result, parse_args, SchemaBuilder, Tool, ToolContext, ToolDefinition, ToolResult,
};

/// Fetch a page with its content and render it
pub async fn export_page(
    client: &TelegraphClient,
    path: &str,
    format: ContentFormat,
) -> Result<(Page, String)> {
    let request = GetPageRequest {
        path: path.to_string(),
        return_content: true,
    };
    let page = client.get_page(&request).await?;
    let text = content::render(page.content.as_deref().unwrap_or(&[]), format);
    Ok((page, text))
}

async fn write_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, text).await?;
    Ok(())
}

/// Tool for exporting one page
pub struct ExportPageTool;

#[derive(Debug, Deserialize)]
struct ExportPageArgs {
    path: String,
    format: Option<ContentFormat>,
    output_path: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ExportSummary {
    path: String,
    title: String,
    format: ContentFormat,
    output_path: String,
    bytes: usize,
}

#[async_trait]
impl Tool for ExportPageTool {
    fn name(&self) -> &str {
        "export_page"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "export_page".to_string(),
            description: "Export a Telegraph page as Markdown (default) or HTML. Returns the text, or writes it to output_path when given.".to_string(),
            input_schema: SchemaBuilder::new()
                .string("path", "Page path, e.g. Sample-Page-12-15", true)
                .enumeration("format", "Export format: markdown (default) or html", &["markdown", "html"], false)
                .string("output_path", "File to write the export to", false)
                .build(),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult> {
        let args: ExportPageArgs = parse_args(input)?;
        let format = context.export_format(args.format);

        let (page, text) = match export_page(context.client(), &args.path, format).await {
            Ok(exported) => exported,
            Err(e) => return api_result::<()>(Err(e)),
        };

        let Some(output_path) = args.output_path else {
            return Ok(ToolResult::success(text));
        };

        write_file(&output_path, &text).await?;
        tracing::info!(path = %page.path, output = %output_path.display(), "exported page");
        ToolResult::json(&ExportSummary {
            path: page.path,
            title: page.title,
            format,
            output_path: output_path.display().to_string(),
            bytes: text.len(),
        })
    }
}

/// Tool for exporting every page of an account
pub struct BackupAccountTool;

#[derive(Debug, Deserialize)]
struct BackupAccountArgs {
    access_token: Option<String>,
    format: Option<ContentFormat>,
    output_dir: Option<PathBuf>,
}

/// Written as `manifest.json` next to the exported pages
#[derive(Debug, Serialize)]
struct BackupManifest {
    exported_at: String,
    format: ContentFormat,
    page_count: usize,
    pages: Vec<BackupEntry>,
}

#[derive(Debug, Serialize)]
struct BackupEntry {
    path: String,
    title: String,
    url: String,
    views: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

async fn backup(
    client: &TelegraphClient,
    access_token: &str,
    format: ContentFormat,
    output_dir: Option<&Path>,
) -> Result<BackupManifest> {
    let listed = client.get_all_pages(access_token).await?;
    tracing::info!(pages = listed.len(), %format, "backing up account");

    let mut pages = Vec::with_capacity(listed.len());
    for summary in listed {
        let (page, text) = export_page(client, &summary.path, format).await?;

        let (file, content) = match output_dir {
            Some(dir) => {
                let file_name = format!("{}.{}", page.path, format.extension());
                write_file(&dir.join(&file_name), &text).await?;
                (Some(file_name), None)
            }
            None => (None, Some(text)),
        };

        pages.push(BackupEntry {
            path: page.path,
            title: page.title,
            url: page.url,
            views: page.views,
            file,
            content,
        });
    }

    let manifest = BackupManifest {
        exported_at: chrono::Utc::now().to_rfc3339(),
        format,
        page_count: pages.len(),
        pages,
    };

    if let Some(dir) = output_dir {
        let json = serde_json::to_string_pretty(&manifest)?;
        write_file(&dir.join("manifest.json"), &json).await?;
    }
    Ok(manifest)
}

#[async_trait]
impl Tool for BackupAccountTool {
    fn name(&self) -> &str {
        "backup_account"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "backup_account".to_string(),
            description: "Export every page of a Telegraph account. With output_dir, each page is written as <path>.md or <path>.html alongside a manifest.json; otherwise the exports are returned inline.".to_string(),
            input_schema: SchemaBuilder::new()
                .string("access_token", "Account access token (defaults to the configured token)", false)
                .enumeration("format", "Export format: markdown (default) or html", &["markdown", "html"], false)
                .string("output_dir", "Directory to write the backup to", false)
                .build(),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult> {
        let args: BackupAccountArgs = parse_args(input)?;
        let access_token = context.access_token(args.access_token)?;
        let format = context.export_format(args.format);

        api_result(
            backup(
                context.client(),
                &access_token,
                format,
                args.output_dir.as_deref(),
            )
            .await,
        )
    }
}
