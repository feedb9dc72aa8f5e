// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Telegraph resources exposed over MCP
//!
//! `telegraph://account` is the configured account, `telegraph://page/{path}`
//! is any page exported as Markdown.

use super::protocol::{ReadResourceResult, Resource, ResourceContent, ResourceTemplate};
use crate::content::ContentFormat;
use crate::error::{Result, TelegraphError};
use crate::telegraph::GetAccountInfoRequest;
use crate::tools::builtin::export_page;
use crate::tools::ToolContext;

pub const ACCOUNT_URI: &str = "telegraph://account";
pub const PAGE_URI_PREFIX: &str = "telegraph://page/";
pub const PAGE_URI_TEMPLATE: &str = "telegraph://page/{path}";

/// A resource URI the server understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceUri {
    Account,
    Page(String),
}

impl ResourceUri {
    pub fn parse(uri: &str) -> Option<Self> {
        if uri == ACCOUNT_URI {
            return Some(Self::Account);
        }
        uri.strip_prefix(PAGE_URI_PREFIX)
            .filter(|path| !path.is_empty() && !path.contains('/'))
            .map(|path| Self::Page(path.to_string()))
    }
}

pub fn list_resources() -> Vec<Resource> {
    vec![Resource {
        uri: ACCOUNT_URI.to_string(),
        name: "account".to_string(),
        description: Some(
            "The configured Telegraph account with its page count".to_string(),
        ),
        mime_type: Some("application/json".to_string()),
    }]
}

pub fn resource_templates() -> Vec<ResourceTemplate> {
    vec![ResourceTemplate {
        uri_template: PAGE_URI_TEMPLATE.to_string(),
        name: "page".to_string(),
        description: Some("A Telegraph page exported as Markdown".to_string()),
        mime_type: Some("text/markdown".to_string()),
    }]
}

/// Read a resource. Unknown URIs are invalid input.
pub async fn read_resource(context: &ToolContext, uri: &str) -> Result<ReadResourceResult> {
    let parsed = ResourceUri::parse(uri)
        .ok_or_else(|| TelegraphError::InvalidInput(format!("Unknown resource: {}", uri)))?;

    let content = match parsed {
        ResourceUri::Account => {
            let request = GetAccountInfoRequest {
                access_token: context.access_token(None)?,
                fields: Some(vec![
                    "short_name".to_string(),
                    "author_name".to_string(),
                    "author_url".to_string(),
                    "auth_url".to_string(),
                    "page_count".to_string(),
                ]),
            };
            let account = context.client().get_account_info(&request).await?;
            ResourceContent {
                uri: uri.to_string(),
                mime_type: Some("application/json".to_string()),
                text: Some(serde_json::to_string_pretty(&account)?),
            }
        }
        ResourceUri::Page(path) => {
            let (_, text) = export_page(context.client(), &path, ContentFormat::Markdown).await?;
            ResourceContent {
                uri: uri.to_string(),
                mime_type: Some("text/markdown".to_string()),
                text: Some(text),
            }
        }
    };

    Ok(ReadResourceResult {
        contents: vec![content],
    })
}
