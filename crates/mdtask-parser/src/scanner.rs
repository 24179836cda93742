//! Line scanner: classifies a raw source line as a task line or not.
//!
//! A task line matches `indent, list marker, single space, [status], content`.
//! The scanner is pure and total: anything that does not match is simply not
//! a task line.

/// A successfully scanned task line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    /// Indentation depth in columns, tabs expanded to the configured width.
    pub indent_level: usize,
    /// The list marker as written (`-`, `*`, `+`, or `12.` style).
    pub list_marker: String,
    /// The single character between the checkbox brackets.
    pub status: char,
    /// Everything after the checkbox, leading whitespace skipped.
    pub content: String,
}

/// Scans one source line.
///
/// Returns `None` when the line is not a task line. `tab_size` is the number
/// of columns a tab advances when measuring indentation.
pub fn scan_line(line: &str, tab_size: usize) -> Option<ScannedLine> {
    let mut chars = line.char_indices().peekable();

    // Indentation: spaces and tabs only.
    let mut indent_level = 0usize;
    while let Some(&(_, c)) = chars.peek() {
        match c {
            ' ' => indent_level += 1,
            '\t' => indent_level += tab_size.max(1),
            _ => break,
        }
        chars.next();
    }

    // List marker: `-`, `*`, `+`, or one-or-more digits followed by `.`.
    let (_, marker_char) = chars.next()?;
    let mut list_marker = String::new();
    match marker_char {
        '-' | '*' | '+' => list_marker.push(marker_char),
        c if c.is_ascii_digit() => {
            list_marker.push(c);
            while let Some(&(_, d)) = chars.peek() {
                if d.is_ascii_digit() {
                    list_marker.push(d);
                    chars.next();
                } else {
                    break;
                }
            }
            let (_, dot) = chars.next()?;
            if dot != '.' {
                return None;
            }
            list_marker.push('.');
        }
        _ => return None,
    }

    // Exactly one whitespace between marker and checkbox.
    let (_, sep) = chars.next()?;
    if sep != ' ' && sep != '\t' {
        return None;
    }

    // Checkbox: `[`, any single character, `]`.
    let (_, open) = chars.next()?;
    if open != '[' {
        return None;
    }
    let (_, status) = chars.next()?;
    let (_, close) = chars.next()?;
    if close != ']' {
        return None;
    }

    // Content: skip whitespace after the checkbox, keep the rest verbatim.
    let mut content_start = line.len();
    while let Some(&(i, c)) = chars.peek() {
        if c == ' ' || c == '\t' {
            chars.next();
        } else {
            content_start = i;
            break;
        }
    }
    let content = line[content_start.min(line.len())..].to_string();

    Some(ScannedLine {
        indent_level,
        list_marker,
        status,
        content,
    })
}
