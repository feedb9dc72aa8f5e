// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Account tools
//!
//! Create accounts, edit their profile, read their info and rotate tokens.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::telegraph::{
    CreateAccountRequest, EditAccountInfoRequest, GetAccountInfoRequest,
    RevokeAccessTokenRequest, ACCOUNT_FIELDS,
};
use crate::tools::{
    api_result, parse_args, SchemaBuilder, Tool, ToolContext, ToolDefinition, ToolResult,
};

const TOKEN_HELP: &str = "Account access token (defaults to the configured token)";

/// Tool for creating a Telegraph account
pub struct CreateAccountTool;

#[derive(Debug, Deserialize)]
struct CreateAccountArgs {
    short_name: String,
    author_name: Option<String>,
    author_url: Option<String>,
}

#[async_trait]
impl Tool for CreateAccountTool {
    fn name(&self) -> &str {
        "create_account"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "create_account".to_string(),
            description: "Create a new Telegraph account. Returns the account including its access_token, which is needed for every later call on this account.".to_string(),
            input_schema: SchemaBuilder::new()
                .string("short_name", "Account name shown to the user above the 'Edit/Publish' button (1-32 characters)", true)
                .string("author_name", "Default author name for new pages (0-128 characters)", false)
                .string("author_url", "Default profile link opened when the author name is clicked (0-512 characters)", false)
                .build(),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult> {
        let args: CreateAccountArgs = parse_args(input)?;
        let request = CreateAccountRequest {
            short_name: args.short_name,
            author_name: args.author_name,
            author_url: args.author_url,
        };

        tracing::info!(short_name = %request.short_name, "creating Telegraph account");
        api_result(context.client().create_account(&request).await)
    }
}

/// Tool for editing account profile fields
pub struct EditAccountInfoTool;

#[derive(Debug, Deserialize)]
struct EditAccountInfoArgs {
    access_token: Option<String>,
    short_name: Option<String>,
    author_name: Option<String>,
    author_url: Option<String>,
}

#[async_trait]
impl Tool for EditAccountInfoTool {
    fn name(&self) -> &str {
        "edit_account_info"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "edit_account_info".to_string(),
            description: "Update the short name, author name or author URL of a Telegraph account. Only the given fields change.".to_string(),
            input_schema: SchemaBuilder::new()
                .string("access_token", TOKEN_HELP, false)
                .string("short_name", "New account name (1-32 characters)", false)
                .string("author_name", "New default author name (0-128 characters)", false)
                .string("author_url", "New default author URL (0-512 characters)", false)
                .build(),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult> {
        let args: EditAccountInfoArgs = parse_args(input)?;
        let request = EditAccountInfoRequest {
            access_token: context.access_token(args.access_token)?,
            short_name: args.short_name,
            author_name: args.author_name,
            author_url: args.author_url,
        };
        api_result(context.client().edit_account_info(&request).await)
    }
}

/// Tool for reading account info
pub struct GetAccountInfoTool;

#[derive(Debug, Deserialize)]
struct GetAccountInfoArgs {
    access_token: Option<String>,
    fields: Option<Vec<String>>,
}

#[async_trait]
impl Tool for GetAccountInfoTool {
    fn name(&self) -> &str {
        "get_account_info"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_account_info".to_string(),
            description: format!(
                "Get information about a Telegraph account. Available fields: {}.",
                ACCOUNT_FIELDS.join(", ")
            ),
            input_schema: SchemaBuilder::new()
                .string("access_token", TOKEN_HELP, false)
                .array(
                    "fields",
                    "Fields to return (default: short_name, author_name, author_url)",
                    "string",
                    false,
                )
                .build(),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult> {
        let args: GetAccountInfoArgs = parse_args(input)?;
        let request = GetAccountInfoRequest {
            access_token: context.access_token(args.access_token)?,
            fields: args.fields,
        };
        api_result(context.client().get_account_info(&request).await)
    }
}

/// Tool for revoking an access token
pub struct RevokeAccessTokenTool;

#[derive(Debug, Deserialize)]
struct RevokeAccessTokenArgs {
    access_token: Option<String>,
}

#[async_trait]
impl Tool for RevokeAccessTokenTool {
    fn name(&self) -> &str {
        "revoke_access_token"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "revoke_access_token".to_string(),
            description: "Revoke the access token of a Telegraph account and issue a new one. The old token stops working immediately. Returns the new access_token and an auth_url for logging in from a browser.".to_string(),
            input_schema: SchemaBuilder::new()
                .string("access_token", TOKEN_HELP, false)
                .build(),
        }
    }

    async fn execute(&self, input: Value, context: &ToolContext) -> Result<ToolResult> {
        let args: RevokeAccessTokenArgs = parse_args(input)?;
        let request = RevokeAccessTokenRequest {
            access_token: context.access_token(args.access_token)?,
        };

        tracing::warn!("revoking Telegraph access token");
        api_result(context.client().revoke_access_token(&request).await)
    }
}
