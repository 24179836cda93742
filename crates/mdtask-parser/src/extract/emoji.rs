//! Emoji-symbol metadata extraction.
//!
//! Each configured symbol marks a field. Date symbols are followed by a date
//! token, priority symbols either stand alone (the symbol is the value) or
//! take a following word, and the recurrence symbol takes a free-text phrase
//! terminated by the next recognized symbol, `@`, `#`, or end of line.

use crate::config::MetadataField;
use crate::priority::resolve_priority;

/// A matched emoji field, with the byte span of its markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EmojiMatch {
    pub field: MetadataField,
    pub value: String,
    pub start: usize,
    pub end: usize,
}

/// Finds the leftmost configured symbol and its value token.
///
/// `symbols` is the configured symbol table; entries with longer symbols win
/// when two symbols start at the same position.
pub(crate) fn find_first(
    content: &str,
    symbols: &[(String, MetadataField)],
) -> Option<EmojiMatch> {
    let (start, symbol, field) = leftmost_symbol(content, symbols)?;
    let symbol_end = start + symbol.len();
    let rest = &content[symbol_end..];

    match field {
        MetadataField::Recurrence => {
            let phrase_len = recurrence_phrase_len(rest, symbols);
            let value = rest[..phrase_len].trim().to_string();
            Some(EmojiMatch {
                field,
                value,
                start,
                end: symbol_end + phrase_len,
            })
        }
        MetadataField::Priority => {
            // A priority symbol usually stands alone, but a following word
            // that itself resolves as a priority is taken as the value.
            if let Some((token, token_end)) = next_token(rest) {
                if resolve_priority(token).is_some() {
                    return Some(EmojiMatch {
                        field,
                        value: token.to_string(),
                        start,
                        end: symbol_end + token_end,
                    });
                }
            }
            Some(EmojiMatch {
                field,
                value: symbol.to_string(),
                start,
                end: symbol_end,
            })
        }
        _ => {
            // Date-valued fields: one following token, plus a time token when
            // one immediately follows.
            let Some((token, token_end)) = next_token(rest) else {
                return Some(EmojiMatch {
                    field,
                    value: String::new(),
                    start,
                    end: symbol_end,
                });
            };
            let mut value = token.to_string();
            let mut end = symbol_end + token_end;
            if let Some((second, second_end)) = next_token(&content[end..]) {
                if looks_like_time(second) {
                    value.push(' ');
                    value.push_str(second);
                    end += second_end;
                }
            }
            Some(EmojiMatch {
                field,
                value,
                start,
                end,
            })
        }
    }
}

/// Finds the earliest symbol occurrence; longer symbols win position ties.
fn leftmost_symbol<'a>(
    content: &str,
    symbols: &'a [(String, MetadataField)],
) -> Option<(usize, &'a str, MetadataField)> {
    let mut best: Option<(usize, &'a str, MetadataField)> = None;
    for (symbol, field) in symbols {
        if symbol.is_empty() {
            continue;
        }
        if let Some(pos) = content.find(symbol.as_str()) {
            let better = match best {
                None => true,
                Some((best_pos, best_symbol, _)) => {
                    pos < best_pos || (pos == best_pos && symbol.len() > best_symbol.len())
                }
            };
            if better {
                best = Some((pos, symbol.as_str(), *field));
            }
        }
    }
    best
}

/// Length of the recurrence phrase: up to the next recognized symbol, `@`,
/// `#`, a protected link span, or end of line.
fn recurrence_phrase_len(rest: &str, symbols: &[(String, MetadataField)]) -> usize {
    let mut stop = rest.len();
    for (symbol, _) in symbols {
        if let Some(pos) = rest.find(symbol.as_str()) {
            stop = stop.min(pos);
        }
    }
    // '\u{E000}' opens a protected link placeholder; links are never part of
    // the phrase.
    for terminator in ['@', '#', '\u{E000}'] {
        if let Some(pos) = rest.find(terminator) {
            stop = stop.min(pos);
        }
    }
    stop
}

/// The next whitespace-delimited token of `rest`, returning the token and
/// the byte offset just past it.
fn next_token(rest: &str) -> Option<(&str, usize)> {
    let trimmed_start = rest.len() - rest.trim_start().len();
    let token_area = &rest[trimmed_start..];
    if token_area.is_empty() {
        return None;
    }
    let token_len = token_area
        .find(char::is_whitespace)
        .unwrap_or(token_area.len());
    if token_len == 0 {
        return None;
    }
    let token = &token_area[..token_len];
    // Tokens beginning a different grammar are not values.
    if token.starts_with('#') || token.starts_with('@') || token.starts_with('\u{E000}') {
        return None;
    }
    Some((token, trimmed_start + token_len))
}

/// True for `HH:MM` / `HH:MM:SS` shapes.
fn looks_like_time(token: &str) -> bool {
    let parts: Vec<&str> = token.split(':').collect();
    if parts.len() != 2 && parts.len() != 3 {
        return false;
    }
    parts
        .iter()
        .all(|p| !p.is_empty() && p.len() <= 2 && p.chars().all(|c| c.is_ascii_digit()))
}
