//! Metadata extraction over scanned task content.
//!
//! Runs the configured grammar(s) over a line's content, producing a flat bag
//! of raw field tokens plus the content stripped of metadata markup. Link
//! spans are protected before any grammar runs and restored afterwards, so
//! stripping never damages `[[...]]` or `[text](url)`.
//!
//! Each extraction pass consumes a single token, with the more explicit
//! grammar tried first (dataview, then emoji, then tags). Passes repeat until
//! nothing matches or `max_metadata_iterations` is reached; exceeding the
//! bound stops stripping on that line and leaves the remaining markup visible
//! in the content.

mod dataview;
mod emoji;
mod links;
mod tags;

use std::collections::BTreeMap;

use tracing::warn;

use crate::config::{MetadataField, MetadataParseMode, ParserConfig};
use tags::TagMatch;

/// A raw extracted field token and the exact markup it was stripped from.
///
/// The markup is kept so that a token which later fails resolution (a
/// malformed date, say) can be put back into the content instead of being
/// silently dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    /// The value token, as written.
    pub value: String,
    /// The full markup span that was removed from the content.
    pub markup: String,
}

/// The result of running the grammars over one line's content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtractedMetadata {
    /// Logical field → raw token. First writer wins, and the iteration order
    /// (dataview before emoji) makes the explicit grammar the first writer.
    pub fields: BTreeMap<MetadataField, RawField>,
    /// Plain `#tag` tokens, in source order, deduplicated, `#` stripped.
    pub tags: Vec<String>,
    /// Content with all consumed markup removed and link spans intact.
    pub content: String,
    /// True when the iteration bound cut extraction short.
    pub truncated: bool,
}

/// Extractor with per-parse lookup tables prebuilt from the configuration.
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    mode: MetadataParseMode,
    parse_metadata: bool,
    parse_tags: bool,
    max_iterations: u32,
    emoji_symbols: Vec<(String, MetadataField)>,
    dataview_keys: BTreeMap<String, MetadataField>,
    tag_prefixes: BTreeMap<String, MetadataField>,
}

impl MetadataExtractor {
    /// Builds the extractor's lookup tables once from the configuration.
    pub fn from_config(config: &ParserConfig) -> Self {
        let mut dataview_keys = dataview::builtin_keys();
        for (prefix, field) in &config.special_tag_prefixes {
            dataview_keys
                .entry(prefix.to_lowercase())
                .or_insert(*field);
        }

        Self {
            mode: config.metadata_parse_mode,
            parse_metadata: config.parse_metadata,
            parse_tags: config.parse_tags,
            max_iterations: config.max_metadata_iterations,
            emoji_symbols: config
                .emoji_mapping
                .iter()
                .map(|(symbol, field)| (symbol.clone(), *field))
                .collect(),
            dataview_keys,
            tag_prefixes: config.special_tag_prefixes.clone(),
        }
    }

    /// Strips and collects metadata from one line's content.
    pub fn extract(&self, content: &str) -> ExtractedMetadata {
        let protected = links::protect(content);
        let mut text = protected.text;
        let mut out = ExtractedMetadata::default();

        let mut iterations = 0u32;
        loop {
            if iterations >= self.max_iterations {
                out.truncated = self.next_match(&text).is_some();
                if out.truncated {
                    warn!(
                        max_iterations = self.max_iterations,
                        "metadata extraction iteration bound reached; leaving remaining markup"
                    );
                }
                break;
            }
            let Some(found) = self.next_match(&text) else {
                break;
            };
            iterations += 1;
            self.consume(found, &mut text, &mut out);
        }

        out.content = links::restore(&collapse_whitespace(&text), &protected.spans);
        out
    }

    /// The leftmost match of the highest-priority grammar that has one.
    fn next_match(&self, text: &str) -> Option<GrammarMatch> {
        if self.parse_metadata && self.mode != MetadataParseMode::EmojiOnly {
            if let Some(m) = dataview::find_first(text, &self.dataview_keys) {
                return Some(GrammarMatch::Dataview(m));
            }
        }
        if self.parse_metadata && self.mode != MetadataParseMode::DataviewOnly {
            if let Some(m) = emoji::find_first(text, &self.emoji_symbols) {
                return Some(GrammarMatch::Emoji(m));
            }
        }
        if self.parse_tags {
            if let Some(m) = tags::find_first(text, &self.tag_prefixes) {
                return Some(GrammarMatch::Tag(m));
            }
        }
        None
    }

    /// Records one match and removes its markup from the working text.
    fn consume(&self, found: GrammarMatch, text: &mut String, out: &mut ExtractedMetadata) {
        match found {
            GrammarMatch::Dataview(m) => {
                let markup = text[m.start..m.end].to_string();
                insert_field(out, m.field, m.value, markup);
                remove_span(text, m.start, m.end);
            }
            GrammarMatch::Emoji(m) => {
                let markup = text[m.start..m.end].to_string();
                insert_field(out, m.field, m.value, markup);
                remove_span(text, m.start, m.end);
            }
            GrammarMatch::Tag(m) => {
                let (start, end) = m.span();
                let markup = text[start..end].to_string();
                match m {
                    TagMatch::Prefixed { field, value, .. } => {
                        insert_field(out, field, value, markup);
                    }
                    TagMatch::Plain { tag, .. } => {
                        if !out.tags.contains(&tag) {
                            out.tags.push(tag);
                        }
                    }
                    TagMatch::Context { value, .. } => {
                        insert_field(out, MetadataField::Context, value, markup);
                    }
                }
                remove_span(text, start, end);
            }
        }
    }
}

enum GrammarMatch {
    Dataview(dataview::DataviewMatch),
    Emoji(emoji::EmojiMatch),
    Tag(TagMatch),
}

/// First writer wins: a field already present keeps its value, but the
/// duplicate markup is still stripped.
fn insert_field(out: &mut ExtractedMetadata, field: MetadataField, value: String, markup: String) {
    out.fields
        .entry(field)
        .or_insert(RawField { value, markup });
}

fn remove_span(text: &mut String, start: usize, end: usize) {
    text.replace_range(start..end, " ");
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
