// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Template catalogue command

use crate::error::Result;
use crate::templates::builtin_templates;

/// Human-readable listing of the built-in templates
pub fn catalogue() -> String {
    let mut out = String::new();
    for template in builtin_templates() {
        out.push_str(&format!("{} - {}\n", template.name, template.description));
        for field in &template.fields {
            let marker = if field.required { "required" } else { "optional" };
            out.push_str(&format!(
                "    {:<12} {} ({})\n",
                field.name, field.description, marker
            ));
        }
    }
    out
}

/// Execute the templates command
pub fn execute() -> Result<()> {
    print!("{}", catalogue());
    Ok(())
}
