use crate::error::SqlResult;
use crate::sql::Statement;
use serde::Deserialize;
use std::str::FromStr;

/// How [`WriterRecorder`](super::WriterRecorder) lays out a recording.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// SQL line, `params: [...]` line, then a blank line.
    #[default]
    Text,
    /// One JSON object per line: `{"sql": ..., "params": [...]}`.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// A sink for statements that would otherwise be sent to a database.
///
/// Implementations must emit the same output for the same statement every
/// time; the statement has already passed its arity check.
pub trait QueryRecorder: Send + Sync {
    /// Observe one statement.
    fn on_record(&self, stmt: &Statement) -> SqlResult<()>;
}

impl<R: QueryRecorder + ?Sized> QueryRecorder for std::sync::Arc<R> {
    fn on_record(&self, stmt: &Statement) -> SqlResult<()> {
        (**self).on_record(stmt)
    }
}
