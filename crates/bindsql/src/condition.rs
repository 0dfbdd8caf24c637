//! Nested WHERE conditions.
//!
//! A [`Condition`] tree renders into a [`Sql`] builder: `column = value` pairs
//! bind their value, groups join their children with a [`Conjunction`] taken
//! from a fixed allow-list, and the only free-form text is `&'static str`, so
//! it is written in the program rather than read at runtime.
//!
//! ```
//! use bindsql::condition::{Condition, Conjunction};
//!
//! let id = String::from("3");
//! let cond = Condition::group(
//!     Conjunction::Or,
//!     vec![
//!         Condition::literal("category_id IS NULL"),
//!         Condition::eq("category_id", id)?,
//!     ],
//! );
//! let q = cond.to_sql_fragment();
//! assert_eq!(q.to_sql(), "(category_id IS NULL OR category_id = ?)");
//! assert_eq!(q.param_count(), 1);
//! # Ok::<(), bindsql::SqlError>(())
//! ```

use crate::alias::is_valid_alias;
use crate::error::{SqlError, SqlResult};
use crate::sql::Sql;
use crate::value::Value;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Operator joining the members of a [`Condition::Group`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Conjunction {
    #[default]
    And,
    Or,
    Xor,
}

impl Conjunction {
    pub const ALL: [Conjunction; 3] = [Conjunction::And, Conjunction::Or, Conjunction::Xor];

    /// The keyword written into SQL.
    pub fn as_str(self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
            Conjunction::Xor => "XOR",
        }
    }

    /// Look `s` up in the allow-list (case-insensitive).
    pub fn parse(s: &str) -> SqlResult<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SqlError::invalid_condition(format!("unknown conjunction \"{s}\"")))
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Conjunction {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Conjunction {
    type Error = SqlError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

/// Whether `column` is one or more dot-separated alias-shaped segments, such
/// as `category_id` or `a.category_id`.
pub fn is_valid_column(column: &str) -> bool {
    column.split('.').all(is_valid_alias)
}

/// A WHERE condition tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// SQL with no values, such as `category_id IS NULL`.
    Literal(&'static str),
    /// `column = ?`, binding `value`.
    Eq { column: String, value: Value },
    /// `(a <conjunction> b ...)`.
    Group {
        conjunction: Conjunction,
        conditions: Vec<Condition>,
    },
}

impl Condition {
    pub fn literal(sql: &'static str) -> Self {
        Condition::Literal(sql)
    }

    /// `column = value`. The column is checked by [`is_valid_column`].
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> SqlResult<Self> {
        let column = column.into();
        if !is_valid_column(&column) {
            return Err(SqlError::invalid_condition(format!(
                "invalid column \"{column}\""
            )));
        }
        Ok(Condition::Eq {
            column,
            value: value.into(),
        })
    }

    pub fn group(conjunction: Conjunction, conditions: Vec<Condition>) -> Self {
        Condition::Group {
            conjunction,
            conditions,
        }
    }

    /// Conditions joined with `AND`.
    pub fn all(conditions: Vec<Condition>) -> Self {
        Self::group(Conjunction::And, conditions)
    }

    /// Conditions joined with `OR`.
    pub fn any(conditions: Vec<Condition>) -> Self {
        Self::group(Conjunction::Or, conditions)
    }

    /// Append this condition to `sql`, binding every value.
    ///
    /// A non-empty group is always parenthesized. An empty group renders as
    /// its identity: `TRUE` for `AND`, `FALSE` for `OR` and `XOR`.
    pub fn append_to_sql(&self, sql: &mut Sql) {
        match self {
            Condition::Literal(s) => {
                sql.push(s);
            }
            Condition::Eq { column, value } => {
                sql.push(column).push(" = ").push_bind(value.clone());
            }
            Condition::Group {
                conjunction,
                conditions,
            } => {
                if conditions.is_empty() {
                    sql.push(match conjunction {
                        Conjunction::And => "TRUE",
                        Conjunction::Or | Conjunction::Xor => "FALSE",
                    });
                    return;
                }

                sql.push("(");
                for (i, cond) in conditions.iter().enumerate() {
                    if i > 0 {
                        sql.push(" ").push(conjunction.as_str()).push(" ");
                    }
                    cond.append_to_sql(sql);
                }
                sql.push(")");
            }
        }
    }

    /// Render into a fresh builder.
    pub fn to_sql_fragment(&self) -> Sql {
        let mut sql = Sql::empty();
        self.append_to_sql(&mut sql);
        sql
    }
}
