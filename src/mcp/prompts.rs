// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Prompt templates offered to MCP clients

use std::collections::HashMap;

use super::protocol::{GetPromptResult, Prompt, PromptArgument, PromptMessage, ToolContent};
use crate::error::{Result, TelegraphError};

/// The Markdown dialect `create_page` understands with `format: "markdown"`
pub const MARKDOWN_GUIDE: &str = "\
Telegraph pages accept a small Markdown dialect. It is converted to the HTML subset Telegraph supports:

- `# Heading` becomes a large heading (h3). `##`, `###` and `####` all become the smaller heading (h4).
- `**bold**` or `__bold__` becomes bold.
- `*italic*` or `_italic_` becomes italic. Underscores inside words (snake_case) are left alone.
- `[text](https://example.com)` becomes a link.
- `![caption](https://example.com/image.png)` becomes a figure with the caption below the image.
- Lines starting with `- ` or `* ` become a bulleted list; lines starting with `1. ` a numbered list.
- Lines starting with `> ` become block quotes.
- A line of three or more hyphens (`---`) becomes a horizontal rule.
- `` `code` `` becomes inline code; a block fenced with ``` becomes preformatted code. Nothing inside code is rewritten.
- Blank lines separate paragraphs.

Tables, nested lists, task lists and footnotes are not supported. Upload local images with upload_image first and use the returned URL.";

fn argument(name: &str, description: &str, required: bool) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        description: Some(description.to_string()),
        required,
    }
}

/// All prompts, in listing order
pub fn list_prompts() -> Vec<Prompt> {
    vec![
        Prompt {
            name: "write_article".to_string(),
            description: Some("Draft an article and publish it to Telegraph".to_string()),
            arguments: vec![
                argument("topic", "What the article is about", true),
                argument("tone", "Writing tone, e.g. casual or formal", false),
            ],
        },
        Prompt {
            name: "summarize_page".to_string(),
            description: Some("Summarize an existing Telegraph page".to_string()),
            arguments: vec![argument("path", "Page path, e.g. Sample-Page-12-15", true)],
        },
        Prompt {
            name: "markdown_guide".to_string(),
            description: Some("Explain the Markdown supported for Telegraph pages".to_string()),
            arguments: Vec::new(),
        },
    ]
}

fn user_message(text: String) -> PromptMessage {
    PromptMessage {
        role: "user".to_string(),
        content: ToolContent::Text { text },
    }
}

fn required_arg<'a>(args: &'a HashMap<String, String>, prompt: &str, name: &str) -> Result<&'a str> {
    args.get(name)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            TelegraphError::InvalidInput(format!(
                "prompt '{}' requires argument '{}'",
                prompt, name
            ))
        })
}

/// Render a prompt with its arguments
pub fn get_prompt(name: &str, args: &HashMap<String, String>) -> Result<GetPromptResult> {
    match name {
        "write_article" => {
            let topic = required_arg(args, name, "topic")?;
            let tone = args
                .get("tone")
                .map(String::as_str)
                .filter(|t| !t.trim().is_empty())
                .unwrap_or("clear and friendly");
            Ok(GetPromptResult {
                description: Some(format!("Article about {}", topic)),
                messages: vec![user_message(format!(
                    "Write an article about {topic} in a {tone} tone. \
                     Format it as Markdown using only the constructs below, \
                     then publish it with the create_page tool using format \"markdown\" \
                     and a concise title.\n\n{MARKDOWN_GUIDE}"
                ))],
            })
        }
        "summarize_page" => {
            let path = required_arg(args, name, "path")?;
            Ok(GetPromptResult {
                description: Some(format!("Summary of {}", path)),
                messages: vec![user_message(format!(
                    "Read the Telegraph page at resource telegraph://page/{path} \
                     (or call export_page with path \"{path}\") and summarize it in \
                     a few sentences, followed by a bulleted list of its key points."
                ))],
            })
        }
        "markdown_guide" => Ok(GetPromptResult {
            description: Some("Supported Markdown".to_string()),
            messages: vec![user_message(MARKDOWN_GUIDE.to_string())],
        }),
        other => Err(TelegraphError::InvalidInput(format!(
            "Unknown prompt: {}",
            other
        ))),
    }
}
