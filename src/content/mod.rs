// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Content transcoding between HTML, Markdown and Telegraph node trees
//!
//! Inbound: a tool argument (string or node array) plus a format is resolved
//! once into a [`ContentInput`] and normalized into a node list.
//! Outbound: a node list fetched from Telegraph is rendered to Markdown or HTML.
//!
//! Every function here is total. Malformed input produces a best-effort tree
//! or string, never an error.

pub mod html;
pub mod markdown;
pub mod node;
pub mod render;

pub use html::parse_html;
pub use markdown::markdown_to_html;
pub use node::{
    is_allowed_tag, is_self_closing, unsupported_tags, Element, Node, ALLOWED_TAGS,
    SELF_CLOSING_TAGS,
};
pub use render::{nodes_to_html, nodes_to_markdown};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text format of page content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Html,
    Markdown,
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentFormat::Html => write!(f, "html"),
            ContentFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for ContentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(ContentFormat::Html),
            "markdown" | "md" => Ok(ContentFormat::Markdown),
            other => Err(format!("unknown content format: {}", other)),
        }
    }
}

impl ContentFormat {
    /// File extension used for exports
    pub fn extension(self) -> &'static str {
        match self {
            ContentFormat::Html => "html",
            ContentFormat::Markdown => "md",
        }
    }
}

/// Content exactly as a caller supplied it: a node array or a string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawContent {
    Nodes(Vec<Node>),
    Text(String),
}

/// Content with its representation decided
#[derive(Debug, Clone, PartialEq)]
pub enum ContentInput {
    Tree(Vec<Node>),
    Html(String),
    Markdown(String),
}

impl ContentInput {
    /// Decide the representation of caller-supplied content.
    ///
    /// A string that parses as a JSON node array is taken as a tree no matter
    /// which format was declared.
    pub fn resolve(raw: RawContent, format: ContentFormat) -> Self {
        match raw {
            RawContent::Nodes(nodes) => ContentInput::Tree(nodes),
            RawContent::Text(text) => {
                if let Some(nodes) = json_tree(&text) {
                    tracing::debug!("string content is a JSON node array, using it as a tree");
                    return ContentInput::Tree(nodes);
                }
                match format {
                    ContentFormat::Html => ContentInput::Html(text),
                    ContentFormat::Markdown => ContentInput::Markdown(text),
                }
            }
        }
    }
}

fn json_tree(text: &str) -> Option<Vec<Node>> {
    if !text.trim_start().starts_with('[') {
        return None;
    }
    serde_json::from_str::<Vec<Node>>(text).ok()
}

/// Produce the node list for a resolved input
pub fn normalize(input: ContentInput) -> Vec<Node> {
    match input {
        ContentInput::Tree(nodes) => nodes,
        ContentInput::Html(html) => parse_html(&html),
        ContentInput::Markdown(md) => parse_html(&markdown_to_html(&md)),
    }
}

/// Resolve and normalize in one step
pub fn to_nodes(raw: RawContent, format: ContentFormat) -> Vec<Node> {
    normalize(ContentInput::resolve(raw, format))
}

/// Render a node list in the requested format
pub fn render(nodes: &[Node], format: ContentFormat) -> String {
    match format {
        ContentFormat::Html => nodes_to_html(nodes),
        ContentFormat::Markdown => nodes_to_markdown(nodes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_input_is_identity() {
        let nodes = vec![Node::with_children("p", vec!["x".into()])];
        let out = to_nodes(RawContent::Nodes(nodes.clone()), ContentFormat::Markdown);
        assert_eq!(out, nodes);
    }

    #[test]
    fn test_json_string_overrides_format() {
        let raw = RawContent::Text(r#"[{"tag":"p","children":["**not md**"]}]"#.to_string());
        assert_eq!(
            ContentInput::resolve(raw, ContentFormat::Markdown),
            ContentInput::Tree(vec![Node::with_children("p", vec!["**not md**".into()])])
        );
    }

    #[test]
    fn test_bracket_text_that_is_not_json_falls_through() {
        let raw = RawContent::Text("[link](https://x.io)".to_string());
        let nodes = to_nodes(raw, ContentFormat::Markdown);
        assert_eq!(nodes[0].tag(), Some("p"));
        assert_eq!(nodes[0].text_content(), "link");
    }

    #[test]
    fn test_json_array_of_non_nodes_falls_through() {
        let raw = RawContent::Text("[1, 2]".to_string());
        assert_eq!(
            ContentInput::resolve(raw, ContentFormat::Html),
            ContentInput::Html("[1, 2]".to_string())
        );
    }

    #[test]
    fn test_html_string() {
        let nodes = to_nodes(
            RawContent::Text("<p>Hello</p>".to_string()),
            ContentFormat::Html,
        );
        assert_eq!(nodes, vec![Node::with_children("p", vec!["Hello".into()])]);
    }

    #[test]
    fn test_markdown_string() {
        let nodes = to_nodes(RawContent::Text("# Hi".to_string()), ContentFormat::Markdown);
        assert_eq!(nodes, vec![Node::with_children("h3", vec!["Hi".into()])]);
    }

    #[test]
    fn test_raw_content_deserializes_both_shapes() {
        let text: RawContent = serde_json::from_value(serde_json::json!("hi")).unwrap();
        assert_eq!(text, RawContent::Text("hi".to_string()));

        let nodes: RawContent =
            serde_json::from_value(serde_json::json!(["hi", {"tag": "hr"}])).unwrap();
        assert_eq!(
            nodes,
            RawContent::Nodes(vec![Node::text("hi"), Node::element("hr")])
        );
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("Markdown".parse::<ContentFormat>(), Ok(ContentFormat::Markdown));
        assert_eq!("md".parse::<ContentFormat>(), Ok(ContentFormat::Markdown));
        assert_eq!("html".parse::<ContentFormat>(), Ok(ContentFormat::Html));
        assert!("rtf".parse::<ContentFormat>().is_err());
    }

    #[test]
    fn test_render_dispatch() {
        let nodes = vec![Node::with_children("b", vec!["x".into()])];
        assert_eq!(render(&nodes, ContentFormat::Html), "<b>x</b>");
        assert_eq!(render(&nodes, ContentFormat::Markdown), "**x**");
    }
}
