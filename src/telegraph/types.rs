// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Telegraph API request and response types
//!
//! Requests validate Telegraph's documented field limits locally so that a
//! bad argument is reported before any network round-trip.

use serde::{Deserialize, Serialize};

use crate::content::Node;
use crate::error::{Result, TelegraphError};

/// Maximum serialized size of page content
pub const MAX_CONTENT_BYTES: usize = 64 * 1024;

/// Default and maximum number of pages returned by `getPageList`
pub const DEFAULT_PAGE_LIST_LIMIT: u32 = 50;
pub const MAX_PAGE_LIST_LIMIT: u32 = 200;

/// Account fields that `getAccountInfo` may be asked for
pub const ACCOUNT_FIELDS: &[&str] = &[
    "short_name",
    "author_name",
    "author_url",
    "auth_url",
    "page_count",
];

/// Telegraph account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    /// Only returned by `createAccount` and `revokeAccessToken`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u64>,
}

/// Telegraph page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub path: String,
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Node>>,
    #[serde(default)]
    pub views: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_edit: Option<bool>,
}

/// One page of an account's page list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageList {
    pub total_count: u64,
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// View counter for a page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageViews {
    pub views: u64,
}

/// The `{ok, result, error}` wrapper around every API response
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

fn invalid(message: impl Into<String>) -> TelegraphError {
    TelegraphError::InvalidInput(message.into())
}

fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(invalid(format!(
            "{} must be {}-{} characters (got {})",
            field, min, max, len
        )));
    }
    Ok(())
}

fn check_optional(field: &str, value: Option<&str>, max: usize) -> Result<()> {
    match value {
        Some(value) => check_length(field, value, 0, max),
        None => Ok(()),
    }
}

fn check_author(author_name: Option<&str>, author_url: Option<&str>) -> Result<()> {
    check_optional("author_name", author_name, 128)?;
    check_optional("author_url", author_url, 512)
}

fn check_token(access_token: &str) -> Result<()> {
    if access_token.trim().is_empty() {
        return Err(invalid("access_token must not be empty"));
    }
    Ok(())
}

fn check_path(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid("path must not be empty"));
    }
    if path.contains('/') || path.contains('?') {
        return Err(invalid(format!("'{}' is not a page path", path)));
    }
    Ok(())
}

fn check_content(content: &[Node]) -> Result<()> {
    if content.is_empty() {
        return Err(invalid("content must not be empty"));
    }
    let size = serde_json::to_vec(content)?.len();
    if size > MAX_CONTENT_BYTES {
        return Err(invalid(format!(
            "content is {} bytes, Telegraph accepts at most {}",
            size, MAX_CONTENT_BYTES
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateAccountRequest {
    pub short_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
}

impl CreateAccountRequest {
    pub fn validate(&self) -> Result<()> {
        check_length("short_name", &self.short_name, 1, 32)?;
        check_author(self.author_name.as_deref(), self.author_url.as_deref())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EditAccountInfoRequest {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
}

impl EditAccountInfoRequest {
    pub fn validate(&self) -> Result<()> {
        check_token(&self.access_token)?;
        if self.short_name.is_none() && self.author_name.is_none() && self.author_url.is_none() {
            return Err(invalid(
                "at least one of short_name, author_name or author_url is required",
            ));
        }
        if let Some(short_name) = &self.short_name {
            check_length("short_name", short_name, 1, 32)?;
        }
        check_author(self.author_name.as_deref(), self.author_url.as_deref())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetAccountInfoRequest {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl GetAccountInfoRequest {
    pub fn validate(&self) -> Result<()> {
        check_token(&self.access_token)?;
        for field in self.fields.iter().flatten() {
            if !ACCOUNT_FIELDS.contains(&field.as_str()) {
                return Err(invalid(format!(
                    "unknown account field '{}' (expected one of {})",
                    field,
                    ACCOUNT_FIELDS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RevokeAccessTokenRequest {
    pub access_token: String,
}

impl RevokeAccessTokenRequest {
    pub fn validate(&self) -> Result<()> {
        check_token(&self.access_token)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePageRequest {
    pub access_token: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    pub content: Vec<Node>,
    pub return_content: bool,
}

impl CreatePageRequest {
    pub fn validate(&self) -> Result<()> {
        check_token(&self.access_token)?;
        check_length("title", &self.title, 1, 256)?;
        check_author(self.author_name.as_deref(), self.author_url.as_deref())?;
        check_content(&self.content)
    }
}

/// `editPage` request; `path` is sent in the URL
#[derive(Debug, Clone, Serialize)]
pub struct EditPageRequest {
    #[serde(skip)]
    pub path: String,
    pub access_token: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    pub content: Vec<Node>,
    pub return_content: bool,
}

impl EditPageRequest {
    pub fn validate(&self) -> Result<()> {
        check_path(&self.path)?;
        check_token(&self.access_token)?;
        check_length("title", &self.title, 1, 256)?;
        check_author(self.author_name.as_deref(), self.author_url.as_deref())?;
        check_content(&self.content)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetPageRequest {
    #[serde(skip)]
    pub path: String,
    pub return_content: bool,
}

impl GetPageRequest {
    pub fn validate(&self) -> Result<()> {
        check_path(&self.path)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GetPageListRequest {
    pub access_token: String,
    pub offset: u32,
    pub limit: u32,
}

impl GetPageListRequest {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            offset: 0,
            limit: DEFAULT_PAGE_LIST_LIMIT,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_token(&self.access_token)?;
        if self.limit > MAX_PAGE_LIST_LIMIT {
            return Err(invalid(format!(
                "limit must be 0-{} (got {})",
                MAX_PAGE_LIST_LIMIT, self.limit
            )));
        }
        Ok(())
    }
}

/// `getViews` request; `path` is sent in the URL
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetViewsRequest {
    #[serde(skip)]
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<u32>,
}

impl GetViewsRequest {
    pub fn validate(&self) -> Result<()> {
        check_path(&self.path)?;

        let range = |field: &str, value: Option<u32>, min: u32, max: u32| -> Result<()> {
            match value {
                Some(v) if v < min || v > max => Err(invalid(format!(
                    "{} must be {}-{} (got {})",
                    field, min, max, v
                ))),
                _ => Ok(()),
            }
        };
        range("year", self.year, 2000, 2100)?;
        range("month", self.month, 1, 12)?;
        range("day", self.day, 1, 31)?;
        range("hour", self.hour, 0, 24)?;

        if self.month.is_some() && self.year.is_none() {
            return Err(invalid("month requires year"));
        }
        if self.day.is_some() && self.month.is_none() {
            return Err(invalid("day requires month"));
        }
        if self.hour.is_some() && self.day.is_none() {
            return Err(invalid("hour requires day"));
        }
        Ok(())
    }
}
