//! Priority token resolution.
//!
//! Priority is advisory, not load-bearing: unrecognized tokens resolve to
//! "no priority" rather than an error.

/// Maps a raw priority token to the canonical 1 (lowest) – 5 (highest) scale.
///
/// Recognized forms:
/// - emoji symbols `⏬ 🔽 🔼 ⏫ 🔺` → 1–5
/// - bracket codes `[#A]`/`[#B]`/`[#C]` → 5/3/1, with the undefined letters
///   `D` and `E` clamping to their nearest defined neighbor (1)
/// - the words `lowest`/`low`/`medium`/`high`/`highest`, case-insensitively
/// - bare digits `1`–`5`
pub fn resolve_priority(token: &str) -> Option<u8> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    match token {
        "⏬" => return Some(1),
        "🔽" => return Some(2),
        "🔼" => return Some(3),
        "⏫" => return Some(4),
        "🔺" => return Some(5),
        _ => {}
    }

    if let Some(code) = bracket_code(token) {
        return Some(code);
    }

    match token.to_lowercase().as_str() {
        "lowest" => Some(1),
        "low" => Some(2),
        "medium" => Some(3),
        "high" => Some(4),
        "highest" => Some(5),
        "1" => Some(1),
        "2" => Some(2),
        "3" => Some(3),
        "4" => Some(4),
        "5" => Some(5),
        _ => None,
    }
}

/// Parses an org-style `[#A]` priority code.
fn bracket_code(token: &str) -> Option<u8> {
    let inner = token.strip_prefix("[#")?.strip_suffix(']')?;
    let mut chars = inner.chars();
    let letter = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    match letter.to_ascii_uppercase() {
        'A' => Some(5),
        'B' => Some(3),
        // C is the lowest defined code; D and E clamp down to it.
        'C' | 'D' | 'E' => Some(1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoji_priority_table() {
        assert_eq!(resolve_priority("⏬"), Some(1));
        assert_eq!(resolve_priority("🔽"), Some(2));
        assert_eq!(resolve_priority("🔼"), Some(3));
        assert_eq!(resolve_priority("⏫"), Some(4));
        assert_eq!(resolve_priority("🔺"), Some(5));
    }

    #[test]
    fn test_word_priority_table() {
        assert_eq!(resolve_priority("lowest"), Some(1));
        assert_eq!(resolve_priority("low"), Some(2));
        assert_eq!(resolve_priority("medium"), Some(3));
        assert_eq!(resolve_priority("high"), Some(4));
        assert_eq!(resolve_priority("highest"), Some(5));
    }

    #[test]
    fn test_words_are_case_insensitive() {
        assert_eq!(resolve_priority("HIGHEST"), Some(5));
        assert_eq!(resolve_priority("Medium"), Some(3));
        assert_eq!(resolve_priority("LoW"), Some(2));
    }

    #[test]
    fn test_bracket_codes() {
        assert_eq!(resolve_priority("[#A]"), Some(5));
        assert_eq!(resolve_priority("[#B]"), Some(3));
        assert_eq!(resolve_priority("[#C]"), Some(1));
        assert_eq!(resolve_priority("[#a]"), Some(5));
        // Undefined letters clamp to the nearest defined neighbor.
        assert_eq!(resolve_priority("[#D]"), Some(1));
        assert_eq!(resolve_priority("[#E]"), Some(1));
    }

    #[test]
    fn test_digits() {
        assert_eq!(resolve_priority("1"), Some(1));
        assert_eq!(resolve_priority("5"), Some(5));
        assert_eq!(resolve_priority("0"), None);
        assert_eq!(resolve_priority("6"), None);
    }

    #[test]
    fn test_unrecognized_tokens_resolve_to_none() {
        assert_eq!(resolve_priority(""), None);
        assert_eq!(resolve_priority("urgent"), None);
        assert_eq!(resolve_priority("[#Z]"), None);
        assert_eq!(resolve_priority("p1"), None);
        assert_eq!(resolve_priority("🔥"), None);
    }

    #[test]
    fn test_token_is_trimmed() {
        assert_eq!(resolve_priority("  high  "), Some(4));
    }
}
