// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Telegraph content node model
//!
//! A page body is always a flat, ordered list of nodes at the top level.
//! Each node is either a text leaf or an element with an optional attribute
//! map and an optional list of children. The serde shape matches the
//! `Node` / `NodeElement` objects of the Telegraph API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tags Telegraph accepts inside page content
pub const ALLOWED_TAGS: &[&str] = &[
    "a",
    "aside",
    "b",
    "blockquote",
    "br",
    "code",
    "em",
    "figcaption",
    "figure",
    "h3",
    "h4",
    "hr",
    "i",
    "iframe",
    "img",
    "li",
    "ol",
    "p",
    "pre",
    "s",
    "strong",
    "u",
    "ul",
    "video",
];

/// Tags that never carry children
pub const SELF_CLOSING_TAGS: &[&str] = &["br", "hr", "img"];

/// Whether `tag` is on the Telegraph allow-list
pub fn is_allowed_tag(tag: &str) -> bool {
    ALLOWED_TAGS.contains(&tag)
}

/// Whether `tag` is rendered without children
pub fn is_self_closing(tag: &str) -> bool {
    SELF_CLOSING_TAGS.contains(&tag)
}

/// Content node: text leaf or tagged element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Element(Element),
}

/// Element node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Create a text leaf
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Create an element with no attributes and no children
    pub fn element(tag: impl Into<String>) -> Self {
        Node::Element(Element::new(tag))
    }

    /// Create an element with children and no attributes
    pub fn with_children(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element(Element::new(tag).children(children))
    }

    /// The tag name, or `None` for text leaves
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Text(_) => None,
            Node::Element(el) => Some(&el.tag),
        }
    }

    /// Concatenated text of this node and all of its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                for child in el.child_nodes() {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: None,
            children: None,
        }
    }

    /// Builder: set one attribute
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Builder: set the child list (an empty list is stored as absent)
    pub fn children(mut self, children: Vec<Node>) -> Self {
        self.children = if children.is_empty() {
            None
        } else {
            Some(children)
        };
        self
    }

    /// Attribute value by name
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .as_ref()
            .and_then(|attrs| attrs.get(key))
            .map(String::as_str)
    }

    /// Children as a slice (empty when absent)
    pub fn child_nodes(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Collect every tag in the tree that is not on the allow-list, in document order,
/// without duplicates
pub fn unsupported_tags(nodes: &[Node]) -> Vec<String> {
    fn walk(nodes: &[Node], found: &mut Vec<String>) {
        for node in nodes {
            if let Node::Element(el) = node {
                if !is_allowed_tag(&el.tag) && !found.contains(&el.tag) {
                    found.push(el.tag.clone());
                }
                walk(el.child_nodes(), found);
            }
        }
    }

    let mut found = Vec::new();
    walk(nodes, &mut found);
    found
}
