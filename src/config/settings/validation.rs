// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use crate::error::{Result, TelegraphError};

use super::Settings;

impl Settings {
    /// Get the default access token, checking env var first.
    pub fn access_token(&self) -> Option<String> {
        // Priority: env var > config file.
        std::env::var(&self.telegraph.access_token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| self.telegraph.access_token.clone())
            .filter(|token| !token.trim().is_empty())
    }

    /// Reject settings the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        let urls = [
            ("telegraph.api_base_url", &self.telegraph.api_base_url),
            ("telegraph.upload_url", &self.telegraph.upload_url),
            ("telegraph.file_base_url", &self.telegraph.file_base_url),
        ];
        for (name, value) in urls {
            if value.trim().is_empty() {
                return Err(TelegraphError::Config(format!("{} must not be empty", name)));
            }
        }

        if self.telegraph.timeout_secs == 0 {
            return Err(TelegraphError::Config(
                "telegraph.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
