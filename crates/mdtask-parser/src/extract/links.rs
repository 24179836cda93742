//! Protected-span handling for link markup.
//!
//! Metadata stripping must never damage `[[wiki links]]` or
//! `[text](url)` spans, so they are swapped for private-use placeholder
//! tokens before any grammar runs and restored afterwards.

/// Start/end sentinels for placeholder tokens. Private-use codepoints that
/// cannot appear in any grammar token.
const SPAN_OPEN: char = '\u{E000}';
const SPAN_CLOSE: char = '\u{E001}';

/// Content with link spans replaced by placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProtectedContent {
    /// The text with each link span replaced by `\u{E000}{index}\u{E001}`.
    pub text: String,
    /// The original spans, indexed by placeholder number.
    pub spans: Vec<String>,
}

/// Replaces every wiki link and markdown link with a placeholder token.
pub(crate) fn protect(content: &str) -> ProtectedContent {
    let mut text = String::with_capacity(content.len());
    let mut spans = Vec::new();
    let bytes = content.as_bytes();
    let mut i = 0;

    while i < content.len() {
        if let Some(len) = match_wiki_link(&content[i..]).or_else(|| match_markdown_link(&content[i..])) {
            text.push(SPAN_OPEN);
            text.push_str(&spans.len().to_string());
            text.push(SPAN_CLOSE);
            spans.push(content[i..i + len].to_string());
            i += len;
        } else {
            // Advance one full character.
            let ch_len = utf8_len(bytes[i]);
            text.push_str(&content[i..i + ch_len]);
            i += ch_len;
        }
    }

    ProtectedContent { text, spans }
}

/// Restores placeholder tokens back to their original link spans.
pub(crate) fn restore(text: &str, spans: &[String]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != SPAN_OPEN {
            out.push(c);
            continue;
        }
        let mut index = String::new();
        for d in chars.by_ref() {
            if d == SPAN_CLOSE {
                break;
            }
            index.push(d);
        }
        match index.parse::<usize>().ok().and_then(|n| spans.get(n)) {
            Some(span) => out.push_str(span),
            // A mangled placeholder has no original to restore; drop it.
            None => {}
        }
    }

    out
}

/// Length of a `[[...]]` span starting at the beginning of `s`, if any.
fn match_wiki_link(s: &str) -> Option<usize> {
    let rest = s.strip_prefix("[[")?;
    let close = rest.find("]]")?;
    Some(2 + close + 2)
}

/// Length of a `[text](url)` span starting at the beginning of `s`, if any.
///
/// The text segment must not itself contain brackets, and the `(` must
/// immediately follow the `]`.
fn match_markdown_link(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('[')?;
    let close = rest.find(|c| c == ']' || c == '[')?;
    if !rest[close..].starts_with(']') {
        return None;
    }
    let after = &rest[close + 1..];
    let paren_rest = after.strip_prefix('(')?;
    let paren_close = paren_rest.find(')')?;
    Some(1 + close + 1 + 1 + paren_close + 1)
}

fn utf8_len(first_byte: u8) -> usize {
    match first_byte {
        b if b < 0x80 => 1,
        b if b >= 0xF0 => 4,
        b if b >= 0xE0 => 3,
        _ => 2,
    }
}
