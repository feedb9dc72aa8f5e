// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Node tree serializers
//!
//! Used when exporting pages. Text leaves are emitted verbatim by both
//! serializers. The Markdown output is a best-effort inverse of the
//! converter in [`super::markdown`] and does not round-trip byte for byte.

use super::node::{is_self_closing, Element, Node};

/// Render a node list back to HTML
pub fn nodes_to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_html(node, &mut out);
    }
    out
}

fn write_html(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);
            if let Some(attrs) = el.attrs.as_ref().filter(|attrs| !attrs.is_empty()) {
                let rendered: Vec<String> = attrs
                    .iter()
                    .map(|(key, value)| format!(r#"{}="{}""#, key, value))
                    .collect();
                out.push(' ');
                out.push_str(&rendered.join(" "));
            }

            if is_self_closing(&el.tag) {
                out.push_str("/>");
                return;
            }

            out.push('>');
            for child in el.child_nodes() {
                write_html(child, out);
            }
            out.push_str("</");
            out.push_str(&el.tag);
            out.push('>');
        }
    }
}

/// Render a node list to Markdown
pub fn nodes_to_markdown(nodes: &[Node]) -> String {
    let rendered = render_children(nodes);
    collapse_blank_lines(rendered.trim())
}

fn render_children(nodes: &[Node]) -> String {
    nodes.iter().map(render_markdown).collect()
}

fn render_markdown(node: &Node) -> String {
    let el = match node {
        Node::Text(text) => return text.clone(),
        Node::Element(el) => el,
    };
    let inner = || render_children(el.child_nodes());

    match el.tag.as_str() {
        "h3" => format!("# {}\n\n", inner().trim()),
        "h4" => format!("## {}\n\n", inner().trim()),
        "p" => format!("{}\n\n", inner().trim()),
        "b" | "strong" => format!("**{}**", inner()),
        "i" | "em" => format!("*{}*", inner()),
        "s" => format!("~~{}~~", inner()),
        "u" => inner(),
        "code" => format!("`{}`", plain_text(el)),
        "pre" => format!("```\n{}\n```\n\n", plain_text(el).trim_end_matches('\n')),
        "a" => format!("[{}]({})", inner(), el.get_attr("href").unwrap_or("")),
        "img" => format!(
            "![{}]({})",
            el.get_attr("alt").unwrap_or(""),
            el.get_attr("src").unwrap_or("")
        ),
        "figure" => format!("{}\n\n", render_figure(el).trim()),
        "figcaption" => format!("\n*{}*", inner().trim()),
        "iframe" | "video" => format!("[{}]({})\n\n", el.tag, el.get_attr("src").unwrap_or("")),
        "blockquote" | "aside" => format!("{}\n\n", quote(inner().trim())),
        "ul" => format!("{}\n", render_list(el, false)),
        "ol" => format!("{}\n", render_list(el, true)),
        "li" => format!("- {}\n", inner().trim()),
        "hr" => "---\n\n".to_string(),
        "br" => "\n".to_string(),
        _ => inner(),
    }
}

/// `figure(img, figcaption)` becomes `![caption](src)`; other figures render their parts
fn render_figure(el: &Element) -> String {
    let children = el.child_nodes();
    let image = children.iter().find_map(|child| match child {
        Node::Element(img) if img.tag == "img" => Some(img),
        _ => None,
    });
    let caption = children
        .iter()
        .find(|child| child.tag() == Some("figcaption"))
        .map(|child| child.text_content());

    match image {
        Some(img) => {
            let alt = caption
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .or_else(|| img.get_attr("alt").map(str::to_string))
                .unwrap_or_default();
            format!("![{}]({})", alt, img.get_attr("src").unwrap_or(""))
        }
        None => render_children(children),
    }
}

fn render_list(el: &Element, ordered: bool) -> String {
    let mut out = String::new();
    let mut number = 1;
    for child in el.child_nodes() {
        match child {
            Node::Element(item) if item.tag == "li" => {
                let body = render_children(item.child_nodes());
                let body = body.trim();
                if ordered {
                    out.push_str(&format!("{}. {}\n", number, body));
                    number += 1;
                } else {
                    out.push_str(&format!("- {}\n", body));
                }
            }
            // Whitespace between items carries no meaning in a list.
            Node::Text(text) if text.trim().is_empty() => {}
            other => out.push_str(&render_markdown(other)),
        }
    }
    out
}

fn quote(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Inside code only the text survives
fn plain_text(el: &Element) -> String {
    el.child_nodes().iter().map(Node::text_content).collect()
}

fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0;
    for c in text.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines > 2 {
                continue;
            }
        } else {
            newlines = 0;
        }
        out.push(c);
    }
    out
}
