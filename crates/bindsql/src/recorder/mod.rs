//! Query recording.
//!
//! A recorder stands in for executing a parameterized query: it receives the
//! SQL text and its parameters and emits them somewhere observable. Every
//! entry point validates arity first, so a recorder never sees a statement
//! whose marker count disagrees with its parameter count.
//!
//! # Example
//!
//! ```
//! use bindsql::recorder::{record, MemoryRecorder};
//!
//! let recorder = MemoryRecorder::new();
//! record(&recorder, "SELECT name FROM user WHERE id = ?", vec!["123".into()])?;
//!
//! let err = record(&recorder, "SELECT name FROM user WHERE id = ?", Vec::new());
//! assert!(err.unwrap_err().is_parameter_mismatch());
//! assert_eq!(recorder.len()?, 1);
//! # Ok::<(), bindsql::SqlError>(())
//! ```

mod recorders;
mod types;

#[cfg(feature = "tracing")]
mod tracing_recorder;

#[cfg(test)]
mod tests;

pub use recorders::{CompositeRecorder, MemoryRecorder, NoopRecorder, WriterRecorder};
pub use types::{OutputFormat, QueryRecorder};

#[cfg(feature = "tracing")]
pub use tracing_recorder::TracingRecorder;

use crate::error::SqlResult;
use crate::placeholder::PlaceholderStyle;
use crate::sql::{Sql, Statement};
use crate::value::Value;

/// Record `sql` (with `?` markers) and `params`.
///
/// Fails with `ParameterMismatch` before anything is emitted if the counts
/// disagree.
pub fn record<R>(recorder: &R, sql: &str, params: Vec<Value>) -> SqlResult<()>
where
    R: QueryRecorder + ?Sized,
{
    record_with(recorder, PlaceholderStyle::Question, sql, params)
}

/// Like [`record`], counting markers in `style`.
pub fn record_with<R>(
    recorder: &R,
    style: PlaceholderStyle,
    sql: &str,
    params: Vec<Value>,
) -> SqlResult<()>
where
    R: QueryRecorder + ?Sized,
{
    let stmt = Statement::new(style, sql, params)?;
    recorder.on_record(&stmt)
}

/// Record an already-validated statement.
pub fn record_statement<R>(recorder: &R, stmt: &Statement) -> SqlResult<()>
where
    R: QueryRecorder + ?Sized,
{
    recorder.on_record(stmt)
}

/// Build `sql` and record the result.
pub fn record_sql<R>(recorder: &R, sql: &Sql) -> SqlResult<()>
where
    R: QueryRecorder + ?Sized,
{
    recorder.on_record(&sql.build()?)
}

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
