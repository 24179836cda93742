//! Dataview-style `[key::value]` inline field extraction.

use std::collections::BTreeMap;

use crate::config::MetadataField;

/// A matched inline field, with the byte span of its markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DataviewMatch {
    pub field: MetadataField,
    pub value: String,
    pub start: usize,
    pub end: usize,
}

/// Finds the leftmost recognized `[key::value]` field.
///
/// Keys are matched case-insensitively against the recognized key table.
/// Bracketed spans with an unrecognized key (or no `::`) are skipped and left
/// in the content.
pub(crate) fn find_first(
    content: &str,
    keys: &BTreeMap<String, MetadataField>,
) -> Option<DataviewMatch> {
    let mut search_from = 0;

    while let Some(offset) = content[search_from..].find('[') {
        let start = search_from + offset;
        let inner_start = start + 1;
        let Some(close_offset) = content[inner_start..].find(']') else {
            return None;
        };
        let inner = &content[inner_start..inner_start + close_offset];
        let end = inner_start + close_offset + 1;

        if let Some((key, value)) = inner.split_once("::") {
            let key = key.trim().to_lowercase();
            if let Some(&field) = keys.get(key.as_str()) {
                return Some(DataviewMatch {
                    field,
                    value: value.trim().to_string(),
                    start,
                    end,
                });
            }
        }

        search_from = start + 1;
    }

    None
}

/// The fixed set of recognized inline-field keys.
pub(crate) fn builtin_keys() -> BTreeMap<String, MetadataField> {
    let mut keys = BTreeMap::new();
    keys.insert("due".to_string(), MetadataField::DueDate);
    keys.insert("completion".to_string(), MetadataField::CompletedDate);
    keys.insert("created".to_string(), MetadataField::CreatedDate);
    keys.insert("start".to_string(), MetadataField::StartDate);
    keys.insert("scheduled".to_string(), MetadataField::ScheduledDate);
    keys.insert("priority".to_string(), MetadataField::Priority);
    keys.insert("repeat".to_string(), MetadataField::Recurrence);
    keys.insert("recurrence".to_string(), MetadataField::Recurrence);
    keys.insert("project".to_string(), MetadataField::Project);
    keys.insert("context".to_string(), MetadataField::Context);
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_due_field() {
        let keys = builtin_keys();
        let m = find_first("task [due::2024-06-01] text", &keys).unwrap();
        assert_eq!(m.field, MetadataField::DueDate);
        assert_eq!(m.value, "2024-06-01");
        assert_eq!(&"task [due::2024-06-01] text"[m.start..m.end], "[due::2024-06-01]");
    }

    #[test]
    fn test_key_is_case_insensitive() {
        let keys = builtin_keys();
        let m = find_first("[Due::2024-06-01]", &keys).unwrap();
        assert_eq!(m.field, MetadataField::DueDate);

        let m = find_first("[PRIORITY::high]", &keys).unwrap();
        assert_eq!(m.field, MetadataField::Priority);
    }

    #[test]
    fn test_value_with_spaces() {
        let keys = builtin_keys();
        let m = find_first("Top [project::Task Project] rest", &keys).unwrap();
        assert_eq!(m.field, MetadataField::Project);
        assert_eq!(m.value, "Task Project");
    }

    #[test]
    fn test_unrecognized_key_is_skipped() {
        let keys = builtin_keys();
        assert!(find_first("[weird::value]", &keys).is_none());

        // A later recognized field is still found.
        let m = find_first("[weird::x] [start::today]", &keys).unwrap();
        assert_eq!(m.field, MetadataField::StartDate);
        assert_eq!(m.value, "today");
    }

    #[test]
    fn test_brackets_without_separator_are_skipped() {
        let keys = builtin_keys();
        assert!(find_first("checklist [abc] plain", &keys).is_none());
    }

    #[test]
    fn test_repeat_and_recurrence_are_synonyms() {
        let keys = builtin_keys();
        let m = find_first("[repeat::every week]", &keys).unwrap();
        assert_eq!(m.field, MetadataField::Recurrence);
        assert_eq!(m.value, "every week");

        let m = find_first("[recurrence::every 2 days]", &keys).unwrap();
        assert_eq!(m.field, MetadataField::Recurrence);
    }
}
