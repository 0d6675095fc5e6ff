//! Single-line escaping for table cells.
//!
//! Source strings and translations are escaped before they are written to the
//! table so that every cell stays on one line. The mapping is:
//!
//! | Character | Escaped form |
//! |---|---|
//! | `\` | `\\` |
//! | line feed | `\n` |
//! | carriage return | `\r` |
//! | tab | `\t` |
//! | `"` | `\"` |
//! | any other control character | `\u{hex}` |
//!
//! [`unescape`] accepts exactly these sequences and keeps anything else
//! verbatim, so `unescape(&normalize(s)) == s` for every `s`.

use std::fmt::Write as _;

/// Escape `raw` into its single-line table form.
pub fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            c if c.is_control() => {
                // Writing to a String cannot fail.
                let _ = write!(out, "\\u{{{:x}}}", c as u32);
            },
            c => out.push(c),
        }
    }
    out
}

/// Reverse [`normalize`].
///
/// Unknown or truncated escape sequences are copied through unchanged.
pub fn unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped;

    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos + 1..];
        let mut chars = tail.chars();

        let consumed = match chars.next() {
            Some('\\') => {
                out.push('\\');
                1
            },
            Some('n') => {
                out.push('\n');
                1
            },
            Some('r') => {
                out.push('\r');
                1
            },
            Some('t') => {
                out.push('\t');
                1
            },
            Some('"') => {
                out.push('"');
                1
            },
            Some('u') => match decode_unicode_escape(&tail[1..]) {
                Some((ch, len)) => {
                    out.push(ch);
                    1 + len
                },
                None => {
                    out.push('\\');
                    0
                },
            },
            _ => {
                out.push('\\');
                0
            },
        };

        rest = &tail[consumed..];
    }

    out.push_str(rest);
    out
}

/// Decode the `{hex}` part of a `\u{hex}` sequence.
///
/// Returns the character and the number of bytes consumed.
fn decode_unicode_escape(input: &str) -> Option<(char, usize)> {
    let body = input.strip_prefix('{')?;
    let close = body.find('}')?;
    let hex = &body[..close];
    if hex.is_empty() || hex.len() > 6 {
        return None;
    }
    let code = u32::from_str_radix(hex, 16).ok()?;
    let ch = char::from_u32(code)?;
    Some((ch, close + 2))
}
