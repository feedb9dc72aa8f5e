// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Built-in page templates
//!
//! Templates are Markdown bodies with `{{field}}` placeholders. Filling a
//! template yields Markdown that then goes through the normal content
//! pipeline.

use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{Result, TelegraphError};

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").unwrap());

/// A value a template needs
#[derive(Debug, Clone, Serialize)]
pub struct TemplateField {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// A named Markdown page skeleton
#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: Vec<TemplateField>,
    #[serde(skip)]
    pub body: &'static str,
}

const fn required(name: &'static str, description: &'static str) -> TemplateField {
    TemplateField {
        name,
        description,
        required: true,
    }
}

const fn optional(name: &'static str, description: &'static str) -> TemplateField {
    TemplateField {
        name,
        description,
        required: false,
    }
}

const BLOG_POST: &str = "\
{{intro}}

## {{heading}}

{{body}}

---

{{signature}}";

const TUTORIAL: &str = "\
{{summary}}

## Prerequisites

{{prerequisites}}

## Steps

{{steps}}

## Result

{{result}}";

const CHANGELOG: &str = "\
# Version {{version}}

*Released {{date}}*

## Added

{{added}}

## Changed

{{changed}}

## Fixed

{{fixed}}";

const ANNOUNCEMENT: &str = "\
**{{headline}}**

{{details}}

> {{quote}}

[{{link_text}}]({{link_url}})";

/// All built-in templates, in catalogue order
pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template {
            name: "blog_post",
            description: "Article with an introduction, one section and a signature line",
            fields: vec![
                required("intro", "Opening paragraph"),
                required("heading", "Section heading"),
                required("body", "Section text (Markdown)"),
                optional("signature", "Closing line, e.g. the author's name"),
            ],
            body: BLOG_POST,
        },
        Template {
            name: "tutorial",
            description: "Step-by-step guide with prerequisites and an expected result",
            fields: vec![
                required("summary", "What the reader will build or learn"),
                optional("prerequisites", "Bullet list of what is needed first"),
                required("steps", "Numbered list of steps (Markdown)"),
                optional("result", "What the reader should see at the end"),
            ],
            body: TUTORIAL,
        },
        Template {
            name: "changelog",
            description: "Release notes grouped into added, changed and fixed",
            fields: vec![
                required("version", "Release version"),
                required("date", "Release date"),
                optional("added", "Bullet list of new features"),
                optional("changed", "Bullet list of changes"),
                optional("fixed", "Bullet list of fixes"),
            ],
            body: CHANGELOG,
        },
        Template {
            name: "announcement",
            description: "Short announcement with a quote and a call-to-action link",
            fields: vec![
                required("headline", "One-line headline"),
                required("details", "Announcement text"),
                optional("quote", "Quoted statement"),
                required("link_text", "Call-to-action text"),
                required("link_url", "Call-to-action URL"),
            ],
            body: ANNOUNCEMENT,
        },
    ]
}

/// Look up a built-in template by name
pub fn find_template(name: &str) -> Option<Template> {
    builtin_templates().into_iter().find(|t| t.name == name)
}

impl Template {
    /// Substitute `{{field}}` placeholders.
    ///
    /// Missing required fields are an error; missing optional fields become
    /// empty. Supplied values that the template does not use are ignored.
    pub fn fill(&self, values: &HashMap<String, String>) -> Result<String> {
        let missing: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .filter(|f| values.get(f.name).map_or(true, |v| v.trim().is_empty()))
            .map(|f| f.name)
            .collect();
        if !missing.is_empty() {
            return Err(TelegraphError::Template(format!(
                "template '{}' is missing required field(s): {}",
                self.name,
                missing.join(", ")
            )));
        }

        for key in values.keys() {
            if !self.fields.iter().any(|f| f.name == key) {
                tracing::debug!(template = self.name, field = %key, "ignoring unknown template field");
            }
        }

        let filled = PLACEHOLDER.replace_all(self.body, |caps: &Captures| {
            values.get(&caps[1]).cloned().unwrap_or_default()
        });
        Ok(filled.into_owned())
    }
}

/// Fill the named template
pub fn render_template(name: &str, values: &HashMap<String, String>) -> Result<String> {
    let template = find_template(name).ok_or_else(|| {
        let known: Vec<&str> = builtin_templates().iter().map(|t| t.name).collect();
        TelegraphError::Template(format!(
            "unknown template '{}' (available: {})",
            name,
            known.join(", ")
        ))
    })?;
    template.fill(values)
}
