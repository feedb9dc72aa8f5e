// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for telegraph-mcp
//!
//! Handles loading settings from ~/.telegraph-mcp/settings.json

use serde::{Deserialize, Serialize};

use crate::content::ContentFormat;
use crate::telegraph::{DEFAULT_API_URL, DEFAULT_FILE_BASE_URL, DEFAULT_UPLOAD_URL};

mod io;
mod validation;

/// Main settings structure, stored in ~/.telegraph-mcp/settings.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Telegraph endpoints and credentials
    #[serde(default)]
    pub telegraph: TelegraphSettings,

    /// Defaults applied to tool calls
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Telegraph API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegraphSettings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default = "default_upload_url")]
    pub upload_url: String,

    /// Host that relative upload paths are joined onto
    #[serde(default = "default_file_base_url")]
    pub file_base_url: String,

    /// Default access token (if stored directly, not recommended)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Environment variable name for the access token
    #[serde(default = "default_access_token_env")]
    pub access_token_env: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Defaults for page authoring and export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,

    /// Format assumed for string content when a tool call does not say
    #[serde(default = "default_content_format")]
    pub content_format: ContentFormat,

    /// Format used by export tools when a tool call does not say
    #[serde(default = "default_export_format")]
    pub export_format: ContentFormat,
}

fn default_api_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_upload_url() -> String {
    DEFAULT_UPLOAD_URL.to_string()
}

fn default_file_base_url() -> String {
    DEFAULT_FILE_BASE_URL.to_string()
}

fn default_access_token_env() -> String {
    "TELEGRAPH_ACCESS_TOKEN".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_content_format() -> ContentFormat {
    ContentFormat::Html
}

fn default_export_format() -> ContentFormat {
    ContentFormat::Markdown
}

impl Default for TelegraphSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            upload_url: default_upload_url(),
            file_base_url: default_file_base_url(),
            access_token: None,
            access_token_env: default_access_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            author_name: None,
            author_url: None,
            content_format: default_content_format(),
            export_format: default_export_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_telegraph_settings_default() {
        let config = TelegraphSettings::default();
        assert_eq!(config.api_base_url, "https://api.telegra.ph");
        assert_eq!(config.upload_url, "https://telegra.ph/upload");
        assert_eq!(config.file_base_url, "https://telegra.ph");
        assert!(config.access_token.is_none());
        assert_eq!(config.access_token_env, "TELEGRAPH_ACCESS_TOKEN");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_defaults_config_default() {
        let config = DefaultsConfig::default();
        assert_eq!(config.content_format, ContentFormat::Html);
        assert_eq!(config.export_format, ContentFormat::Markdown);
        assert!(config.author_name.is_none());
    }

    #[test]
    fn test_settings_load_from_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.telegraph.timeout_secs, 30);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"telegraph": {"access_token": "abc"}, "defaults": {"content_format": "markdown"}}"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.telegraph.access_token.as_deref(), Some("abc"));
        assert_eq!(settings.telegraph.api_base_url, "https://api.telegra.ph");
        assert_eq!(settings.defaults.content_format, ContentFormat::Markdown);
        assert_eq!(settings.defaults.export_format, ContentFormat::Markdown);
    }

    #[test]
    fn test_settings_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");

        let mut settings = Settings::default();
        settings.defaults.author_name = Some("Anonymous".to_string());
        settings.telegraph.timeout_secs = 5;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.defaults.author_name.as_deref(), Some("Anonymous"));
        assert_eq!(loaded.telegraph.timeout_secs, 5);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(Settings::load_from(&path).is_err());
    }

    #[test]
    fn test_access_token_env_beats_file() {
        let mut settings = Settings::default();
        settings.telegraph.access_token_env = "TELEGRAPH_MCP_SETTINGS_TEST_TOKEN".to_string();
        settings.telegraph.access_token = Some("from-file".to_string());
        assert_eq!(settings.access_token().as_deref(), Some("from-file"));

        std::env::set_var("TELEGRAPH_MCP_SETTINGS_TEST_TOKEN", "from-env");
        assert_eq!(settings.access_token().as_deref(), Some("from-env"));
        std::env::remove_var("TELEGRAPH_MCP_SETTINGS_TEST_TOKEN");
    }

    #[test]
    fn test_empty_env_token_is_ignored() {
        let mut settings = Settings::default();
        settings.telegraph.access_token_env = "TELEGRAPH_MCP_SETTINGS_EMPTY_TOKEN".to_string();
        std::env::set_var("TELEGRAPH_MCP_SETTINGS_EMPTY_TOKEN", "");
        assert!(settings.access_token().is_none());
        std::env::remove_var("TELEGRAPH_MCP_SETTINGS_EMPTY_TOKEN");
    }

    #[test]
    fn test_validate() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());

        settings.telegraph.timeout_secs = 0;
        assert!(settings.validate().is_err());

        settings.telegraph.timeout_secs = 30;
        settings.telegraph.api_base_url = "  ".to_string();
        assert!(settings.validate().is_err());
    }
}
