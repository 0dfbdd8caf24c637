//! Identifier aliases.
//!
//! Identifiers (tables, fields, CTE names) cannot be bound as parameters. When
//! they come from configuration or user-defined fields, write `{alias}` in the
//! SQL and substitute a validated value:
//!
//! ```
//! use bindsql::alias::apply_aliases;
//!
//! let sql = apply_aliases(
//!     "SELECT {field_1} FROM {table_1}",
//!     &[("table_1", "user"), ("field_1", "email")],
//! )?;
//! assert_eq!(sql, "SELECT `email` FROM `user`");
//! # Ok::<(), bindsql::SqlError>(())
//! ```

use crate::error::{SqlError, SqlResult};

/// Whether `s` is non-empty and made only of `[a-z0-9_]`.
pub fn is_valid_alias(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

/// Replace every `{name}` in `sql` with `` `value` ``.
///
/// Both names and values must match `[a-z0-9_]+`; the first offender is
/// reported as `InvalidAlias` and nothing is substituted. A `{name}` left with
/// no matching alias is also `InvalidAlias`, so the SQL never carries an
/// unresolved identifier.
pub fn apply_aliases(sql: &str, aliases: &[(&str, &str)]) -> SqlResult<String> {
    for (name, value) in aliases {
        if !is_valid_alias(name) {
            return Err(SqlError::invalid_alias(format!("invalid alias name \"{name}\"")));
        }
        if !is_valid_alias(value) {
            return Err(SqlError::invalid_alias(format!(
                "invalid alias value \"{value}\" for \"{name}\""
            )));
        }
    }

    let mut out = sql.to_string();
    for (name, value) in aliases {
        out = out.replace(&format!("{{{name}}}"), &format!("`{value}`"));
    }

    if let Some(name) = first_unresolved(&out) {
        return Err(SqlError::invalid_alias(format!("unresolved alias \"{name}\"")));
    }
    Ok(out)
}

/// First `{name}` in `sql` whose name is alias-shaped.
fn first_unresolved(sql: &str) -> Option<&str> {
    let mut rest = sql;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let end = after.find('}')?;
        let name = &after[..end];
        if is_valid_alias(name) {
            return Some(name);
        }
        rest = after;
    }
    None
}
