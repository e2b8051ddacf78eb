//! Pure Typst escaping and layout utilities.
//!
//! These functions handle Typst string-literal escaping, the two-space
//! continuation indent used by block constructs, and fence sizing for raw
//! blocks.

use std::borrow::Cow;

/// Escape text for use inside a Typst double-quoted string literal.
///
/// Escapes backslashes, double quotes, and control characters. Non-ASCII
/// text passes through verbatim; Typst sources are UTF-8, so `"テスト"` is
/// already a valid literal. Borrows the input unchanged when nothing needs
/// escaping.
///
/// # Examples
///
/// ```
/// use doctyp::typst::escape_str;
///
/// assert_eq!(escape_str(r#"print("テスト")"#), r#"print(\"テスト\")"#);
/// assert_eq!(escape_str("plain"), "plain");
/// ```
pub fn escape_str(text: &str) -> Cow<'_, str> {
    let Some(pos) = first_escape(text.as_bytes()) else {
        return Cow::Borrowed(text);
    };

    let mut result = String::with_capacity(text.len() + 8);
    result.push_str(&text[..pos]);
    for c in text[pos..].chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                result.push_str(&format!("\\u{{{:x}}}", c as u32));
            }
            c => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Find the first byte that needs escaping, if any.
///
/// All trigger bytes are ASCII, so the returned offset is always a char
/// boundary.
fn first_escape(bytes: &[u8]) -> Option<usize> {
    let quote_or_backslash = memchr::memchr2(b'"', b'\\', bytes);
    let scan_end = quote_or_backslash.unwrap_or(bytes.len());
    match bytes[..scan_end].iter().position(|&b| b < 0x20) {
        Some(control) => Some(control),
        None => quote_or_backslash,
    }
}

/// Indent every line after the first by `width` spaces.
///
/// Blank lines are left unpadded. This is the continuation indent applied
/// to already-rendered child text when it is embedded inside a block
/// construct.
///
/// # Examples
///
/// ```
/// use doctyp::typst::indent_tail;
///
/// assert_eq!(indent_tail("a\nb", 2), "a\n  b");
/// assert_eq!(indent_tail("a\n\nb", 2), "a\n\n  b");
/// ```
pub fn indent_tail(text: &str, width: usize) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }

    let pad = " ".repeat(width);
    let mut result = String::with_capacity(text.len() + text.len() / 4);
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            result.push('\n');
            if !line.is_empty() {
                result.push_str(&pad);
            }
        }
        result.push_str(line);
    }
    result
}

/// Calculate the minimum fence length needed for a raw block.
///
/// Returns the smallest number of fence characters (at least 3) that
/// doesn't appear as a run in the content.
///
/// # Examples
///
/// ```
/// use doctyp::typst::calculate_fence_length;
///
/// // Normal content needs 3 backticks
/// assert_eq!(calculate_fence_length("let x = 1;", '`'), 3);
///
/// // Content with 3 backticks needs 4
/// assert_eq!(calculate_fence_length("```rust\ncode\n```", '`'), 4);
/// ```
pub fn calculate_fence_length(content: &str, fence_char: char) -> usize {
    let mut max_run = 0;
    let mut current_run = 0;

    for c in content.chars() {
        if c == fence_char {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }

    max_run.max(2) + 1
}
