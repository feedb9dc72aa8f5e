// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Markdown to Telegraph HTML converter
//!
//! A fixed, ordered list of text rewrites. Order matters: code is pulled out
//! first so no later rule touches it, images run before links, bold before
//! italic, and paragraph wrapping runs last so it can recognise the block
//! elements the earlier rules emitted.
//!
//! Telegraph only has two heading levels: `#` becomes `h3` and `##`
//! through `####` all become `h4`.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static FENCED_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:[A-Za-z0-9_+-]*[ \t]*\n)?(.*?)```").unwrap());

static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`\n]+)`").unwrap());

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,4})[ \t]+(.+?)[ \t]*$").unwrap());

static HORIZONTAL_RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*-{3,}[ \t]*$").unwrap());

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"!\[([^\]]*)\]\(([^)\s]+)(?:\s+"[^"]*")?\)"#).unwrap());

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\[([^\]]+)\]\(([^)\s]+)(?:\s+"[^"]*")?\)"#).unwrap());

static BOLD_ITALIC_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").unwrap());

static BOLD_ITALIC_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"___(.+?)___").unwrap());

static BOLD_STARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

static BOLD_UNDERSCORES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__(.+?)__").unwrap());

static ITALIC_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\s](?:[^*\n]*[^*\s])?)\*").unwrap());

static ITALIC_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_([^_\s](?:[^_\n]*[^_\s])?)_").unwrap());

static BLOCKQUOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^> (.+)$").unwrap());

static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*[-*][ \t]+(.*)$").unwrap());

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*\d+\.[ \t]+(.*)$").unwrap());

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\u{1A}(C|I)(\\d+)\u{1A}").unwrap());

static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t]*\n").unwrap());

static BLOCK_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<(?:aside|blockquote|figure|h3|h4|hr|iframe|ol|p|pre|ul|video)\b").unwrap()
});

/// A rewrite stage that needs no state beyond its input
pub type Rule = fn(&str) -> String;

/// Stateless stages, in the order they run between code extraction and restoration
pub const RULES: &[(&str, Rule)] = &[
    ("headings", headings),
    ("horizontal_rules", horizontal_rules),
    ("images", images),
    ("links", links),
    ("bold", bold),
    ("italic", italic),
    ("blockquotes", blockquotes),
    ("unordered_lists", unordered_lists),
    ("ordered_lists", ordered_lists),
];

/// Verbatim code pulled out of the text while the rules run
#[derive(Debug, Default)]
pub struct PlaceholderTable {
    blocks: Vec<String>,
    spans: Vec<String>,
}

impl PlaceholderTable {
    /// Replace fenced code blocks with markers
    pub fn extract_code_blocks(&mut self, text: &str) -> String {
        FENCED_CODE
            .replace_all(text, |caps: &Captures| {
                let code = caps[1].strip_suffix('\n').unwrap_or(&caps[1]);
                self.blocks.push(code.to_string());
                format!("\u{1A}C{}\u{1A}", self.blocks.len() - 1)
            })
            .into_owned()
    }

    /// Replace inline code spans with markers
    pub fn extract_inline_code(&mut self, text: &str) -> String {
        INLINE_CODE
            .replace_all(text, |caps: &Captures| {
                self.spans.push(caps[1].to_string());
                format!("\u{1A}I{}\u{1A}", self.spans.len() - 1)
            })
            .into_owned()
    }

    /// Put the code back, blocks as `<pre>` and spans as `<code>`, with markup
    /// characters escaped so the HTML parser reads them as text
    pub fn restore(&self, text: &str) -> String {
        PLACEHOLDER
            .replace_all(text, |caps: &Captures| {
                let index: usize = caps[2].parse().unwrap_or(usize::MAX);
                let (store, tag) = match &caps[1] {
                    "C" => (&self.blocks, "pre"),
                    _ => (&self.spans, "code"),
                };
                match store.get(index) {
                    Some(code) => format!("<{tag}>{}</{tag}>", escape_text(code)),
                    None => caps[0].to_string(),
                }
            })
            .into_owned()
    }

    pub fn len(&self) -> usize {
        self.blocks.len() + self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Convert Markdown to the HTML subset Telegraph accepts
pub fn markdown_to_html(markdown: &str) -> String {
    let mut table = PlaceholderTable::default();
    let normalized = markdown.replace("\r\n", "\n");

    let text = table.extract_code_blocks(&normalized);
    let mut text = table.extract_inline_code(&text);
    tracing::trace!(placeholders = table.len(), "extracted code");

    for (name, rule) in RULES {
        text = rule(&text);
        tracing::trace!(stage = *name, "applied markdown rule");
    }

    let text = table.restore(&text);
    wrap_paragraphs(&text)
}

/// `#` → `h3`, `##`..`####` → `h4`
pub fn headings(text: &str) -> String {
    HEADING
        .replace_all(text, |caps: &Captures| {
            let tag = if caps[1].len() == 1 { "h3" } else { "h4" };
            format!("<{tag}>{}</{tag}>", &caps[2])
        })
        .into_owned()
}

/// A line of three or more hyphens
pub fn horizontal_rules(text: &str) -> String {
    HORIZONTAL_RULE.replace_all(text, "<hr/>").into_owned()
}

/// `![alt](src)` → figure with image and caption
pub fn images(text: &str) -> String {
    IMAGE
        .replace_all(text, |caps: &Captures| {
            format!(
                r#"<figure><img src="{}"/><figcaption>{}</figcaption></figure>"#,
                escape_attr(&caps[2]),
                &caps[1]
            )
        })
        .into_owned()
}

/// `[text](href)` → anchor
pub fn links(text: &str) -> String {
    LINK.replace_all(text, |caps: &Captures| {
        format!(r#"<a href="{}">{}</a>"#, escape_attr(&caps[2]), &caps[1])
    })
    .into_owned()
}

/// `**text**` and `__text__`, with tripled delimiters as bold italic
pub fn bold(text: &str) -> String {
    let text = BOLD_ITALIC_STARS.replace_all(text, "<b><i>$1</i></b>");
    let text = BOLD_ITALIC_UNDERSCORES.replace_all(&text, "<b><i>$1</i></b>");
    let text = BOLD_STARS.replace_all(&text, "<b>$1</b>");
    BOLD_UNDERSCORES.replace_all(&text, "<b>$1</b>").into_owned()
}

/// `*text*` and `_text_`, skipped when a delimiter touches a word character
pub fn italic(text: &str) -> String {
    let text = replace_italic(text, &ITALIC_STAR, '*');
    replace_italic(&text, &ITALIC_UNDERSCORE, '_')
}

fn replace_italic(text: &str, pattern: &Regex, delimiter: char) -> String {
    let touches_word = |c: Option<char>| {
        c.is_some_and(|c| c.is_alphanumeric() || c == '_' || c == delimiter)
    };

    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut search_from = 0;

    while let Some(caps) = pattern.captures_at(text, search_from) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let before = text[..whole.start()].chars().next_back();
        let after = text[whole.end()..].chars().next();

        if touches_word(before) || touches_word(after) {
            search_from = whole.start() + delimiter.len_utf8();
            continue;
        }

        out.push_str(&text[copied..whole.start()]);
        out.push_str("<i>");
        out.push_str(inner.as_str());
        out.push_str("</i>");
        copied = whole.end();
        search_from = whole.end();
    }

    out.push_str(&text[copied..]);
    out
}

/// Each `> ` line becomes its own blockquote
pub fn blockquotes(text: &str) -> String {
    BLOCKQUOTE
        .replace_all(text, "<blockquote>$1</blockquote>")
        .into_owned()
}

/// Runs of `-`/`*` lines become one `<ul>`
pub fn unordered_lists(text: &str) -> String {
    group_list_items(text, &UNORDERED_ITEM, "ul")
}

/// Runs of `1.` lines become one `<ol>`
pub fn ordered_lists(text: &str) -> String {
    group_list_items(text, &ORDERED_ITEM, "ol")
}

fn group_list_items(text: &str, item: &Regex, tag: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut items: Vec<String> = Vec::new();

    let flush = |items: &mut Vec<String>, lines: &mut Vec<String>| {
        if items.is_empty() {
            return;
        }
        let body: String = items
            .drain(..)
            .map(|item| format!("<li>{}</li>", item))
            .collect();
        lines.push(format!("<{tag}>{body}</{tag}>"));
    };

    for line in text.split('\n') {
        match item.captures(line) {
            Some(caps) => items.push(caps[1].trim_end().to_string()),
            None => {
                flush(&mut items, &mut lines);
                lines.push(line.to_string());
            }
        }
    }
    flush(&mut items, &mut lines);

    lines.join("\n")
}

/// Wrap each blank-line separated block in `<p>` unless it already starts
/// with a block element. A `<pre>` that spans blank lines stays in one block.
pub fn wrap_paragraphs(text: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut pending: Option<String> = None;

    for chunk in PARAGRAPH_BREAK.split(text) {
        let merged = match pending.take() {
            Some(open) => format!("{open}\n\n{chunk}"),
            None => chunk.to_string(),
        };
        if merged.matches("<pre>").count() > merged.matches("</pre>").count() {
            pending = Some(merged);
        } else {
            blocks.push(merged);
        }
    }
    blocks.extend(pending);

    blocks
        .iter()
        .map(|block| block.trim())
        .filter(|block| !block.is_empty())
        .map(|block| {
            if BLOCK_START.is_match(block) && block.ends_with('>') {
                block.to_string()
            } else {
                format!("<p>{}</p>", block)
            }
        })
        .collect()
}

/// Escape `&`, `<` and `>` for use as element content
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape `&` and `"` for use inside a double-quoted attribute
fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
