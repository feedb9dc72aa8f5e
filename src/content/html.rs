// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Lenient HTML to node-tree parser
//!
//! A single combined pattern walks the input in document order and yields
//! closing tags, opening tags (with their raw attribute text) and runs of
//! text. Open elements live on an explicit frame stack. There are no parse
//! errors: a closing tag pops whatever is on top regardless of its name, and
//! frames still open at end of input are closed innermost-first.
//!
//! Character references in text and attribute values are decoded, so text
//! leaves always hold the literal characters.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::node::{is_self_closing, Element, Node};

/// Closing tag | opening tag with attribute text | text run | stray `<`
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"</\s*([A-Za-z][A-Za-z0-9]*)\s*>|<([A-Za-z][A-Za-z0-9]*)((?:[^>"']|"[^"]*"|'[^']*')*)>|([^<]+)|<"#,
    )
    .unwrap()
});

/// `key="value"` or `key='value'`
static ATTR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// Named, decimal and hex character references
static ENTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:(amp|lt|gt|quot|apos|nbsp)|#([0-9]{1,7})|#[xX]([0-9A-Fa-f]{1,6}));").unwrap()
});

/// An element whose closing tag has not been seen yet
struct Frame {
    tag: String,
    attrs: BTreeMap<String, String>,
    children: Vec<Node>,
}

impl Frame {
    fn finish(self) -> Node {
        finalize(self.tag, self.attrs, self.children)
    }
}

fn finalize(tag: String, attrs: BTreeMap<String, String>, children: Vec<Node>) -> Node {
    Node::Element(Element {
        tag,
        attrs: (!attrs.is_empty()).then_some(attrs),
        children: (!children.is_empty()).then_some(children),
    })
}

/// Node list that new content is appended to: the innermost open frame, or the top level
fn current<'a>(stack: &'a mut [Frame], root: &'a mut Vec<Node>) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(frame) => &mut frame.children,
        None => root,
    }
}

/// Append text, merging with a directly preceding text leaf
fn push_text(target: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    let text = decode_entities(text);
    if let Some(Node::Text(last)) = target.last_mut() {
        last.push_str(&text);
    } else {
        target.push(Node::text(text));
    }
}

/// Replace character references with the characters they stand for.
/// Unknown names and invalid code points are left as written.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    ENTITY_PATTERN.replace_all(text, |caps: &Captures| {
        let decoded = if let Some(name) = caps.get(1) {
            match name.as_str() {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => None,
            }
        } else {
            let code = match (caps.get(2), caps.get(3)) {
                (Some(dec), _) => dec.as_str().parse().ok(),
                (None, Some(hex)) => u32::from_str_radix(hex.as_str(), 16).ok(),
                (None, None) => None,
            };
            code.and_then(char::from_u32)
        };
        decoded.map_or_else(|| caps[0].to_string(), String::from)
    })
}

/// Extract quoted attributes from the raw text between the tag name and `>`.
/// Anything that is not a quoted pair is ignored.
pub fn parse_attributes(raw: &str) -> BTreeMap<String, String> {
    ATTR_PATTERN
        .captures_iter(raw)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps.get(2).or_else(|| caps.get(3))?.as_str();
            let value = decode_entities(value).into_owned();
            Some((key, value))
        })
        .collect()
}

/// Parse an HTML fragment into a top-level node list
pub fn parse_html(html: &str) -> Vec<Node> {
    let mut root: Vec<Node> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for caps in TOKEN_PATTERN.captures_iter(html) {
        if caps.get(1).is_some() {
            // Closing tag names are not checked against the open frame.
            if let Some(frame) = stack.pop() {
                let node = frame.finish();
                current(&mut stack, &mut root).push(node);
            }
        } else if let Some(name) = caps.get(2) {
            let tag = name.as_str().to_ascii_lowercase();
            let raw_attrs = caps.get(3).map_or("", |m| m.as_str());
            let attrs = parse_attributes(raw_attrs);

            if is_self_closing(&tag) || raw_attrs.trim_end().ends_with('/') {
                current(&mut stack, &mut root).push(finalize(tag, attrs, Vec::new()));
            } else {
                stack.push(Frame {
                    tag,
                    attrs,
                    children: Vec::new(),
                });
            }
        } else if let Some(text) = caps.get(4) {
            push_text(current(&mut stack, &mut root), text.as_str());
        } else {
            // A `<` that does not start a tag is kept as text.
            push_text(current(&mut stack, &mut root), "<");
        }
    }

    if !stack.is_empty() {
        tracing::trace!(open = stack.len(), "closing unbalanced elements at end of input");
    }
    while let Some(frame) = stack.pop() {
        let node = frame.finish();
        current(&mut stack, &mut root).push(node);
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;

    fn el(node: &Node) -> &Element {
        match node {
            Node::Element(el) => el,
            Node::Text(text) => panic!("expected element, got text {:?}", text),
        }
    }

    #[test]
    fn test_plain_text_is_single_leaf() {
        assert_eq!(parse_html("just words"), vec![Node::text("just words")]);
    }

    #[test]
    fn test_empty_input_is_empty_tree() {
        assert!(parse_html("").is_empty());
    }

    #[test]
    fn test_nested_elements() {
        let nodes = parse_html("<p>Hello <b>world</b></p>");
        assert_eq!(nodes.len(), 1);

        let p = el(&nodes[0]);
        assert_eq!(p.tag, "p");
        assert!(p.attrs.is_none());
        assert_eq!(p.child_nodes().len(), 2);
        assert_eq!(p.child_nodes()[0], Node::text("Hello "));
        assert_eq!(
            p.child_nodes()[1],
            Node::with_children("b", vec![Node::text("world")])
        );
    }

    #[test]
    fn test_tag_names_are_lowercased() {
        let nodes = parse_html("<P>x</P>");
        assert_eq!(nodes[0].tag(), Some("p"));
    }

    #[test]
    fn test_unclosed_element_is_closed_at_end() {
        let nodes = parse_html("<p>Hello");
        assert_eq!(nodes, vec![Node::with_children("p", vec!["Hello".into()])]);
    }

    #[test]
    fn test_unclosed_nesting_closes_innermost_first() {
        let nodes = parse_html("<blockquote><p>quote");
        assert_eq!(
            nodes,
            vec![Node::with_children(
                "blockquote",
                vec![Node::with_children("p", vec!["quote".into()])]
            )]
        );
    }

    #[test]
    fn test_img_never_opens_a_frame() {
        let nodes = parse_html(r#"<img src="x.png">caption"#);
        assert_eq!(nodes.len(), 2);

        let img = el(&nodes[0]);
        assert_eq!(img.tag, "img");
        assert_eq!(img.get_attr("src"), Some("x.png"));
        assert!(img.children.is_none());
        assert_eq!(nodes[1], Node::text("caption"));
    }

    #[test]
    fn test_trailing_slash_marks_self_closing() {
        let nodes = parse_html(r#"<iframe src="/embed/x"/>after"#);
        assert_eq!(nodes.len(), 2);
        assert_eq!(el(&nodes[0]).get_attr("src"), Some("/embed/x"));
        assert!(el(&nodes[0]).children.is_none());
    }

    #[test]
    fn test_br_and_hr_are_siblings() {
        let nodes = parse_html("<p>a<br>b</p><hr/>");
        let p = el(&nodes[0]);
        assert_eq!(p.child_nodes().len(), 3);
        assert_eq!(p.child_nodes()[1], Node::element("br"));
        assert_eq!(nodes[1], Node::element("hr"));
    }

    #[test]
    fn test_mismatched_close_pops_top_frame() {
        // </i> closes <b>; the trailing </b> then closes <p>.
        let nodes = parse_html("<p><b>bold</i> after</b>");
        assert_eq!(
            nodes,
            vec![Node::with_children(
                "p",
                vec![
                    Node::with_children("b", vec!["bold".into()]),
                    Node::text(" after"),
                ]
            )]
        );
    }

    #[test]
    fn test_stray_close_tag_is_ignored() {
        assert_eq!(parse_html("</p>text"), vec![Node::text("text")]);
    }

    #[test]
    fn test_attributes_both_quote_styles() {
        let attrs = parse_attributes(r#" href="https://a.b/c" title='T' broken=value"#);
        assert_eq!(attrs.get("href").map(String::as_str), Some("https://a.b/c"));
        assert_eq!(attrs.get("title").map(String::as_str), Some("T"));
        assert!(!attrs.contains_key("broken"));
    }

    #[test]
    fn test_quoted_gt_inside_attribute() {
        let nodes = parse_html(r#"<a href="x>y">link</a>"#);
        assert_eq!(el(&nodes[0]).get_attr("href"), Some("x>y"));
        assert_eq!(nodes[0].text_content(), "link");
    }

    #[test]
    fn test_stray_lt_is_text() {
        assert_eq!(parse_html("a < b"), vec![Node::text("a < b")]);
    }

    #[test]
    fn test_references_are_decoded_in_text() {
        let nodes = parse_html("<code>Vec&lt;T&gt; &amp;&amp; &#65;&#x42;</code>");
        assert_eq!(
            nodes,
            vec![Node::with_children("code", vec!["Vec<T> && AB".into()])]
        );
    }

    #[test]
    fn test_unknown_references_are_kept() {
        let raw = "AT&T &bogus; &#xFFFFFF;";
        assert_eq!(parse_html(raw), vec![Node::text(raw)]);
    }

    #[test]
    fn test_references_are_decoded_in_attributes() {
        let attrs = parse_attributes(r#" href="/q?a=1&amp;b=&quot;2&quot;""#);
        assert_eq!(attrs.get("href").map(String::as_str), Some(r#"/q?a=1&b="2""#));
    }

    #[test]
    fn test_unterminated_tag_is_text() {
        let nodes = parse_html("<p>x <b");
        assert_eq!(nodes, vec![Node::with_children("p", vec!["x <b".into()])]);
    }
}
