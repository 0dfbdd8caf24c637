//! # bindsql
//!
//! Build SQL text and its parameters separately, and never splice runtime
//! values into the text.
//!
//! ## Features
//!
//! - **Placeholder generation**: `placeholders(3) == "?,?,?"`, or numbered `$n`
//! - **Dynamic builder**: `Sql` tracks markers and bound values together
//! - **Arity checks**: a `Statement` whose markers and parameters disagree is
//!   a `ParameterMismatch` error, not a silent bug
//! - **Recorders**: write statements to stdout, `tracing`, or memory instead of
//!   a database
//! - **Aliases**: validated `{name}` substitution for identifiers
//! - **Conditions**: nested `AND`/`OR`/`XOR` WHERE trees with bound values
//!
//! ```
//! use bindsql::{record, search::UserSearch, MemoryRecorder};
//!
//! let recorder = MemoryRecorder::new();
//! let stmt = UserSearch::new("Bob", vec![1, 2, 3]).build().build()?;
//! bindsql::record_statement(&recorder, &stmt)?;
//! record(&recorder, "SELECT name FROM user WHERE id = ?", vec![123.into()])?;
//! assert_eq!(recorder.len()?, 2);
//! # Ok::<(), bindsql::SqlError>(())
//! ```

pub mod alias;
pub mod condition;
pub mod error;
pub mod placeholder;
pub mod recorder;
pub mod search;
pub mod sql;
pub mod value;

pub use alias::apply_aliases;
pub use condition::{Condition, Conjunction};
pub use error::{SqlError, SqlResult};
pub use placeholder::{PlaceholderStyle, count_placeholders, placeholders, placeholders_with};
pub use recorder::{
    CompositeRecorder, MemoryRecorder, NoopRecorder, OutputFormat, QueryRecorder, WriterRecorder,
    record, record_sql, record_statement, record_with,
};
pub use sql::{Sql, Statement, sql};
pub use value::Value;

#[cfg(feature = "tracing")]
pub use recorder::TracingRecorder;
