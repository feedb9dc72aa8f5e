// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Telegraph API client and types

pub mod client;
pub mod types;

pub use client::{
    join_file_url, upload_mime_type, TelegraphClient, DEFAULT_API_URL, DEFAULT_FILE_BASE_URL,
    DEFAULT_UPLOAD_URL, MAX_UPLOAD_BYTES,
};
pub use types::*;
