// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Built-in Telegraph tools

mod account;
mod export;
mod page;
mod template;
mod upload;
mod views;

pub use account::{CreateAccountTool, EditAccountInfoTool, GetAccountInfoTool, RevokeAccessTokenTool};
pub use export::{export_page, BackupAccountTool, ExportPageTool};
pub use page::{prepare_content, CreatePageTool, EditPageTool, GetPageListTool, GetPageTool};
pub use template::{CreateFromTemplateTool, ListTemplatesTool};
pub use upload::UploadImageTool;
pub use views::GetViewsTool;
