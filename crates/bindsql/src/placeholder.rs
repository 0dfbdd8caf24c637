//! Positional placeholder generation and counting.
//!
//! ```
//! use bindsql::placeholder::{placeholders, placeholders_with, PlaceholderStyle};
//!
//! assert_eq!(placeholders(3), "?,?,?");
//! assert_eq!(placeholders_with(PlaceholderStyle::Dollar, 3, 2), "$3,$4");
//! ```

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Delimiter between generated placeholders.
pub const DELIMITER: char = ',';

/// How placeholder markers are written in SQL text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderStyle {
    /// Anonymous `?` markers (MySQL, SQLite, ODBC).
    #[default]
    Question,
    /// Numbered `$1, $2, ...` markers (Postgres).
    Dollar,
}

impl PlaceholderStyle {
    /// Append the marker for the 1-based parameter `index`.
    pub fn write_marker(self, out: &mut String, index: usize) {
        match self {
            PlaceholderStyle::Question => out.push('?'),
            PlaceholderStyle::Dollar => {
                out.push('$');
                push_usize(out, index);
            }
        }
    }

    /// Canonical lowercase name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            PlaceholderStyle::Question => "question",
            PlaceholderStyle::Dollar => "dollar",
        }
    }
}

impl FromStr for PlaceholderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "question" | "?" => Ok(PlaceholderStyle::Question),
            "dollar" | "$" => Ok(PlaceholderStyle::Dollar),
            other => Err(format!("unknown placeholder style: {other}")),
        }
    }
}

/// `count` comma-separated `?` markers, e.g. `placeholders(3) == "?,?,?"`.
///
/// Zero yields an empty string, so callers must skip the surrounding
/// `IN (...)` clause themselves when there is nothing to bind.
pub fn placeholders(count: usize) -> String {
    placeholders_with(PlaceholderStyle::Question, 1, count)
}

/// `count` comma-separated markers in `style`, numbered from `start` (1-based)
/// when the style is numbered.
pub fn placeholders_with(style: PlaceholderStyle, start: usize, count: usize) -> String {
    let mut out = String::with_capacity(count * 2);
    for i in 0..count {
        if i > 0 {
            out.push(DELIMITER);
        }
        style.write_marker(&mut out, start + i);
    }
    out
}

/// Number of parameters `sql` expects.
///
/// For `?` markers this is the marker count. Numbered markers may repeat, so
/// for `$n` markers it is the highest index seen. Markers inside single-quoted literals, double-quoted identifiers, `--` line
/// comments and `/* */` block comments are ignored.
pub fn count_placeholders(style: PlaceholderStyle, sql: &str) -> usize {
    let bytes = sql.as_bytes();
    let mut count = 0;
    let mut max_index = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'\'' | b'"') => {
                i += 1;
                while i < bytes.len() {
                    if bytes[i] == quote {
                        if i + 1 < bytes.len() && bytes[i + 1] == quote {
                            i += 1; // escaped quote
                        } else {
                            break;
                        }
                    }
                    i += 1;
                }
            }
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    i += 1;
                }
                i += 1;
            }
            b'?' if style == PlaceholderStyle::Question => count += 1,
            b'$' if style == PlaceholderStyle::Dollar => {
                let digits = bytes[i + 1..]
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .count();
                if digits > 0 {
                    let index = sql[i + 1..i + 1 + digits].parse().unwrap_or(usize::MAX);
                    max_index = max_index.max(index);
                    i += digits;
                }
            }
            _ => {}
        }
        i += 1;
    }
    match style {
        PlaceholderStyle::Question => count,
        PlaceholderStyle::Dollar => max_index,
    }
}

/// Write a usize as decimal digits into `out` without going through fmt.
#[inline]
fn push_usize(out: &mut String, mut n: usize) {
    if n < 10 {
        out.push((b'0' + n as u8) as char);
        return;
    }
    // Stack buffer for up to 20 digits (u64::MAX).
    let mut buf = [0u8; 20];
    let mut pos = buf.len();
    while n > 0 {
        pos -= 1;
        buf[pos] = b'0' + (n % 10) as u8;
        n /= 10;
    }
    for &b in &buf[pos..] {
        out.push(b as char);
    }
}
