//! Recurrence phrase parsing.

use crate::model::{Recurrence, RecurrenceUnit};

/// Parses a free-text recurrence phrase into a structured rule.
///
/// Recognized shapes: `every <unit>`, `every <n> <unit>s`, and
/// `every <weekday>`. Anything else is retained verbatim as
/// [`Recurrence::Raw`], since downstream consumers treat recurrence as
/// advisory.
pub fn parse_recurrence(phrase: &str) -> Recurrence {
    let trimmed = phrase.trim();
    if trimmed.is_empty() {
        return Recurrence::Raw(String::new());
    }

    let lower = trimmed.to_lowercase();
    let mut words = lower.split_whitespace();

    if words.next() != Some("every") {
        return Recurrence::Raw(trimmed.to_string());
    }

    let Some(second) = words.next() else {
        return Recurrence::Raw(trimmed.to_string());
    };

    // `every 2 weeks`
    if let Ok(interval) = second.parse::<u32>() {
        let unit_word = words.next();
        let trailing = words.next();
        if interval >= 1 && trailing.is_none() {
            if let Some(unit) = unit_word.and_then(parse_unit) {
                return Recurrence::Rule {
                    unit,
                    interval,
                    weekday: None,
                };
            }
        }
        return Recurrence::Raw(trimmed.to_string());
    }

    // `every day` / `every monday`: a single word after "every".
    if words.next().is_some() {
        return Recurrence::Raw(trimmed.to_string());
    }

    if let Some(unit) = parse_unit(second) {
        return Recurrence::Rule {
            unit,
            interval: 1,
            weekday: None,
        };
    }

    if let Some(weekday) = parse_weekday(second) {
        return Recurrence::Rule {
            unit: RecurrenceUnit::Week,
            interval: 1,
            weekday: Some(weekday),
        };
    }

    Recurrence::Raw(trimmed.to_string())
}

fn parse_unit(word: &str) -> Option<RecurrenceUnit> {
    match word {
        "day" | "days" => Some(RecurrenceUnit::Day),
        "week" | "weeks" => Some(RecurrenceUnit::Week),
        "month" | "months" => Some(RecurrenceUnit::Month),
        "year" | "years" => Some(RecurrenceUnit::Year),
        _ => None,
    }
}

/// Weekday number, 0 = Sunday through 6 = Saturday.
fn parse_weekday(word: &str) -> Option<u8> {
    match word {
        "sunday" | "sun" => Some(0),
        "monday" | "mon" => Some(1),
        "tuesday" | "tue" => Some(2),
        "wednesday" | "wed" => Some(3),
        "thursday" | "thu" => Some(4),
        "friday" | "fri" => Some(5),
        "saturday" | "sat" => Some(6),
        _ => None,
    }
}
