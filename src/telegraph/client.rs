// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! HTTP client for the Telegraph API

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::types::*;
use crate::config::TelegraphSettings;
use crate::error::{ApiError, Result, TelegraphError};

pub const DEFAULT_API_URL: &str = "https://api.telegra.ph";
pub const DEFAULT_UPLOAD_URL: &str = "https://telegra.ph/upload";
pub const DEFAULT_FILE_BASE_URL: &str = "https://telegra.ph";

/// Largest file the upload endpoint accepts
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Response body of the upload endpoint
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UploadResponse {
    Files(Vec<UploadedFile>),
    Failed { error: String },
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    src: String,
}

/// Telegraph API client
#[derive(Debug, Clone)]
pub struct TelegraphClient {
    client: Client,
    api_base_url: String,
    upload_url: String,
    file_base_url: String,
}

impl TelegraphClient {
    /// Create a client against the public Telegraph endpoints
    pub fn new() -> Result<Self> {
        Self::from_settings(&TelegraphSettings::default())
    }

    /// Create a client from the `telegraph` settings section
    pub fn from_settings(settings: &TelegraphSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("telegraph-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            upload_url: settings.upload_url.clone(),
            file_base_url: settings.file_base_url.clone(),
        })
    }

    /// Point every endpoint at one host (`{base}/{method}`, `{base}/upload`, files under `{base}`)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let base = base_url.trim_end_matches('/');
        let settings = TelegraphSettings {
            api_base_url: base.to_string(),
            upload_url: format!("{}/upload", base),
            file_base_url: base.to_string(),
            ..TelegraphSettings::default()
        };
        Self::from_settings(&settings)
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// POST `{base}/{method}` and unwrap the `{ok, result, error}` envelope
    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.api_base_url, method);
        tracing::debug!(method, "calling Telegraph API");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(method, status = status.as_u16(), "Telegraph API returned an HTTP error");
            return Err(ApiError::ServerError {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let text = response.text().await.map_err(map_send_error)?;
        let envelope: Envelope<T> = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("{}: {}", method, e)))?;
        unwrap_envelope(method, envelope)
    }

    pub async fn create_account(&self, request: &CreateAccountRequest) -> Result<Account> {
        request.validate()?;
        self.call("createAccount", request).await
    }

    pub async fn edit_account_info(&self, request: &EditAccountInfoRequest) -> Result<Account> {
        request.validate()?;
        self.call("editAccountInfo", request).await
    }

    pub async fn get_account_info(&self, request: &GetAccountInfoRequest) -> Result<Account> {
        request.validate()?;
        self.call("getAccountInfo", request).await
    }

    pub async fn revoke_access_token(&self, request: &RevokeAccessTokenRequest) -> Result<Account> {
        request.validate()?;
        self.call("revokeAccessToken", request).await
    }

    pub async fn create_page(&self, request: &CreatePageRequest) -> Result<Page> {
        request.validate()?;
        self.call("createPage", request).await
    }

    pub async fn edit_page(&self, request: &EditPageRequest) -> Result<Page> {
        request.validate()?;
        self.call(&format!("editPage/{}", request.path), request).await
    }

    pub async fn get_page(&self, request: &GetPageRequest) -> Result<Page> {
        request.validate()?;
        self.call(&format!("getPage/{}", request.path), request).await
    }

    pub async fn get_page_list(&self, request: &GetPageListRequest) -> Result<PageList> {
        request.validate()?;
        self.call("getPageList", request).await
    }

    pub async fn get_views(&self, request: &GetViewsRequest) -> Result<PageViews> {
        request.validate()?;
        self.call(&format!("getViews/{}", request.path), request).await
    }

    /// Fetch every page of an account, following `offset` until `total_count` is reached
    pub async fn get_all_pages(&self, access_token: &str) -> Result<Vec<Page>> {
        let mut pages = Vec::new();
        let mut request = GetPageListRequest::new(access_token);
        request.limit = MAX_PAGE_LIST_LIMIT;

        loop {
            let list = self.get_page_list(&request).await?;
            let fetched = list.pages.len() as u32;
            pages.extend(list.pages);
            if fetched == 0 || pages.len() as u64 >= list.total_count {
                break;
            }
            request.offset += fetched;
        }
        Ok(pages)
    }

    /// Upload a local image or video and return its absolute URL
    pub async fn upload_file(&self, path: &Path) -> Result<String> {
        let mime = upload_mime_type(path)?;

        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(TelegraphError::InvalidInput(format!(
                "{} is not a file",
                path.display()
            )));
        }
        if metadata.len() > MAX_UPLOAD_BYTES {
            return Err(TelegraphError::InvalidInput(format!(
                "{} is {} bytes, uploads are limited to {}",
                path.display(),
                metadata.len(),
                MAX_UPLOAD_BYTES
            )));
        }

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let part = Part::bytes(bytes).file_name(file_name).mime_str(mime)?;
        let form = Form::new().part("file", part);

        tracing::debug!(path = %path.display(), mime, "uploading file to Telegraph");
        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::ServerError {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let text = response.text().await.map_err(map_send_error)?;
        let parsed: UploadResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("upload: {}", e)))?;

        match parsed {
            UploadResponse::Failed { error } => Err(ApiError::Telegraph(error).into()),
            UploadResponse::Files(files) => match files.into_iter().next() {
                Some(file) => Ok(join_file_url(&self.file_base_url, &file.src)),
                None => Err(ApiError::InvalidResponse("upload returned no files".to_string()).into()),
            },
        }
    }
}

fn unwrap_envelope<T>(method: &str, envelope: Envelope<T>) -> Result<T> {
    if !envelope.ok {
        let error = envelope
            .error
            .unwrap_or_else(|| "unknown error".to_string());
        tracing::info!(method, %error, "Telegraph rejected the request");
        return Err(ApiError::Telegraph(error).into());
    }
    envelope.result.ok_or_else(|| {
        ApiError::InvalidResponse(format!("{}: ok response without result", method)).into()
    })
}

fn map_send_error(error: reqwest::Error) -> TelegraphError {
    if error.is_timeout() {
        ApiError::Timeout.into()
    } else if error.is_connect() {
        ApiError::Network(error.to_string()).into()
    } else {
        TelegraphError::Http(error)
    }
}

/// MIME type for an uploadable file, by extension
pub fn upload_mime_type(path: &Path) -> Result<&'static str> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        "gif" => Ok("image/gif"),
        "mp4" => Ok("video/mp4"),
        _ => Err(TelegraphError::InvalidInput(format!(
            "unsupported file type '{}' (expected jpg, jpeg, png, gif or mp4)",
            path.display()
        ))),
    }
}

/// Join an upload `src` such as `/file/abc.png` onto the file host
pub fn join_file_url(base: &str, src: &str) -> String {
    if src.starts_with("http://") || src.starts_with("https://") {
        return src.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        src.trim_start_matches('/')
    )
}
