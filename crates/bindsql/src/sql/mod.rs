//! Dynamic SQL builder.
//!
//! `Sql` composes SQL text and bound parameters without manually writing or
//! counting placeholder markers. The finished [`Statement`] is what recorders
//! consume.
//!
//! # Example
//!
//! ```
//! use bindsql::sql;
//!
//! let name = "Bob";
//! let mut q = sql("SELECT name FROM user WHERE deleted IS NULL");
//! if !name.is_empty() {
//!     q.push(" AND name LIKE ").push_bind(format!("%{name}%"));
//! }
//! q.push(" AND id IN (").push_bind_list([1, 2, 3]).push(")");
//!
//! assert_eq!(
//!     q.to_sql(),
//!     "SELECT name FROM user WHERE deleted IS NULL AND name LIKE ? AND id IN (?,?,?)"
//! );
//! assert_eq!(q.param_count(), 4);
//! ```

mod builder;
mod statement;

#[cfg(test)]
mod tests;

pub use builder::Sql;
pub use statement::Statement;

/// Start building a SQL statement.
pub fn sql(initial_sql: impl Into<String>) -> Sql {
    Sql::new(initial_sql)
}
