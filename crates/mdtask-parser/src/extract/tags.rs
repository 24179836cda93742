//! Tag and context token extraction.
//!
//! Handles `#prefix/value` metadata tags (configurable project/context/area
//! prefixes), plain `#tag` tokens, and bare `@context` tokens.

use std::collections::BTreeMap;

use crate::config::MetadataField;

/// A matched tag-grammar token, with the byte span of its markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TagMatch {
    /// `#prefix/value` with a recognized prefix.
    Prefixed {
        field: MetadataField,
        value: String,
        start: usize,
        end: usize,
    },
    /// A plain `#tag`.
    Plain {
        tag: String,
        start: usize,
        end: usize,
    },
    /// A bare `@context` token.
    Context {
        value: String,
        start: usize,
        end: usize,
    },
}

impl TagMatch {
    pub(crate) fn span(&self) -> (usize, usize) {
        match self {
            TagMatch::Prefixed { start, end, .. }
            | TagMatch::Plain { start, end, .. }
            | TagMatch::Context { start, end, .. } => (*start, *end),
        }
    }
}

/// Finds the leftmost tag or context token.
///
/// Tokens must start at the beginning of the content or after whitespace,
/// and must carry at least one name character.
pub(crate) fn find_first(
    content: &str,
    prefixes: &BTreeMap<String, MetadataField>,
) -> Option<TagMatch> {
    let bytes = content.as_bytes();

    for (i, &b) in bytes.iter().enumerate() {
        if b != b'#' && b != b'@' {
            continue;
        }
        if !at_token_boundary(bytes, i) {
            continue;
        }

        let name_start = i + 1;
        let name_end = name_start
            + content[name_start..]
                .find(|c: char| !is_tag_char(c))
                .unwrap_or(content.len() - name_start);
        if name_end == name_start {
            continue;
        }
        let name = &content[name_start..name_end];

        if b == b'@' {
            return Some(TagMatch::Context {
                value: name.to_string(),
                start: i,
                end: name_end,
            });
        }

        if let Some((prefix, value)) = name.split_once('/') {
            if let Some(&field) = prefixes.get(prefix) {
                if !value.is_empty() {
                    return Some(TagMatch::Prefixed {
                        field,
                        value: value.to_string(),
                        start: i,
                        end: name_end,
                    });
                }
            }
        }

        return Some(TagMatch::Plain {
            tag: name.to_string(),
            start: i,
            end: name_end,
        });
    }

    None
}

fn at_token_boundary(bytes: &[u8], i: usize) -> bool {
    i == 0 || bytes[i - 1] == b' ' || bytes[i - 1] == b'\t'
}

fn is_tag_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '/'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_tag_prefixes;

    #[test]
    fn test_plain_tag() {
        let prefixes = default_tag_prefixes();
        let m = find_first("Buy milk #errands", &prefixes).unwrap();
        match m {
            TagMatch::Plain { tag, start, end } => {
                assert_eq!(tag, "errands");
                assert_eq!(&"Buy milk #errands"[start..end], "#errands");
            }
            other => panic!("expected plain tag, got {other:?}"),
        }
    }

    #[test]
    fn test_project_prefix_tag() {
        let prefixes = default_tag_prefixes();
        let m = find_first("Fix bug #project/Backend", &prefixes).unwrap();
        match m {
            TagMatch::Prefixed { field, value, .. } => {
                assert_eq!(field, MetadataField::Project);
                assert_eq!(value, "Backend");
            }
            other => panic!("expected prefixed tag, got {other:?}"),
        }
    }

    #[test]
    fn test_area_prefix_tag() {
        let prefixes = default_tag_prefixes();
        let m = find_first("#area/home chores", &prefixes).unwrap();
        assert!(matches!(
            m,
            TagMatch::Prefixed {
                field: MetadataField::Area,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_prefix_is_a_plain_tag() {
        let prefixes = default_tag_prefixes();
        let m = find_first("#topic/rust", &prefixes).unwrap();
        match m {
            TagMatch::Plain { tag, .. } => assert_eq!(tag, "topic/rust"),
            other => panic!("expected plain tag, got {other:?}"),
        }
    }

    #[test]
    fn test_bare_context_token() {
        let prefixes = default_tag_prefixes();
        let m = find_first("Call dentist @phone", &prefixes).unwrap();
        match m {
            TagMatch::Context { value, .. } => assert_eq!(value, "phone"),
            other => panic!("expected context, got {other:?}"),
        }
    }

    #[test]
    fn test_mid_word_hash_is_not_a_tag() {
        let prefixes = default_tag_prefixes();
        assert!(find_first("issue#42", &prefixes).is_none());
        assert!(find_first("mail@example.com", &prefixes).is_none());
    }

    #[test]
    fn test_lone_hash_is_ignored() {
        let prefixes = default_tag_prefixes();
        assert!(find_first("# heading-ish", &prefixes).is_none());
        assert!(find_first("nothing here", &prefixes).is_none());
    }

    #[test]
    fn test_leftmost_token_wins() {
        let prefixes = default_tag_prefixes();
        let m = find_first("@home then #later", &prefixes).unwrap();
        assert!(matches!(m, TagMatch::Context { .. }));
    }
}
