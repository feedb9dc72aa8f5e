// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Local content conversion command

use std::io::Read;

use crate::cli::args::{ConvertArgs, ConvertFormat};
use crate::content::{self, ContentFormat, Node, RawContent};
use crate::error::{Result, TelegraphError};

/// Convert `input` from one representation to another
pub fn convert(input: &str, from: ConvertFormat, to: ConvertFormat) -> Result<String> {
    let nodes: Vec<Node> = match from {
        ConvertFormat::Nodes => serde_json::from_str(input).map_err(|e| {
            TelegraphError::InvalidInput(format!("input is not a node array: {}", e))
        })?,
        ConvertFormat::Html => {
            content::to_nodes(RawContent::Text(input.to_string()), ContentFormat::Html)
        }
        ConvertFormat::Markdown => {
            content::to_nodes(RawContent::Text(input.to_string()), ContentFormat::Markdown)
        }
    };
    tracing::debug!(nodes = nodes.len(), ?from, ?to, "converted input");

    Ok(match to {
        ConvertFormat::Nodes => serde_json::to_string_pretty(&nodes)?,
        ConvertFormat::Html => content::render(&nodes, ContentFormat::Html),
        ConvertFormat::Markdown => content::render(&nodes, ContentFormat::Markdown),
    })
}

/// Execute the convert command
pub fn execute(args: &ConvertArgs) -> Result<()> {
    let input = match &args.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let output = convert(&input, args.from, args.to)?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_nodes() {
        let output = convert("# Title", ConvertFormat::Markdown, ConvertFormat::Nodes).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["tag"], "h3");
        assert_eq!(value[0]["children"][0], "Title");
    }

    #[test]
    fn test_html_to_markdown() {
        let output =
            convert("<p>Hello <b>world</b></p>", ConvertFormat::Html, ConvertFormat::Markdown)
                .unwrap();
        assert!(output.contains("**world**"));
    }

    #[test]
    fn test_nodes_to_html() {
        let output = convert(
            r#"[{"tag":"p","children":["hi"]}]"#,
            ConvertFormat::Nodes,
            ConvertFormat::Html,
        )
        .unwrap();
        assert_eq!(output, "<p>hi</p>");
    }

    #[test]
    fn test_bad_node_json_is_invalid_input() {
        let err = convert("{not json", ConvertFormat::Nodes, ConvertFormat::Html).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
