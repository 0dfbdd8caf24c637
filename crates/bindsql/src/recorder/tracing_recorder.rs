use super::types::QueryRecorder;
use crate::error::SqlResult;
use crate::sql::Statement;
use crate::value::format_params;
use tracing::Level;

/// Target of every event emitted by [`TracingRecorder`].
const TARGET: &str = "bindsql.sql";

/// Emits one `tracing` event per statement on target `bindsql.sql`.
///
/// The event carries `tag`, `style`, `param_count`, the full `sql` and the
/// rendered `params`. Filtering and truncation are left to the subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingRecorder {
    level: Level,
}

impl Default for TracingRecorder {
    fn default() -> Self {
        Self::at(Level::DEBUG)
    }
}

impl TracingRecorder {
    /// Emit at `level`.
    pub fn at(level: Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

// `tracing` needs the level at compile time.
macro_rules! event_at {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            Level::ERROR => tracing::event!(target: TARGET, Level::ERROR, $($arg)+),
            Level::WARN => tracing::event!(target: TARGET, Level::WARN, $($arg)+),
            Level::INFO => tracing::event!(target: TARGET, Level::INFO, $($arg)+),
            Level::DEBUG => tracing::event!(target: TARGET, Level::DEBUG, $($arg)+),
            _ => tracing::event!(target: TARGET, Level::TRACE, $($arg)+),
        }
    };
}

impl QueryRecorder for TracingRecorder {
    fn on_record(&self, stmt: &Statement) -> SqlResult<()> {
        let params = format_params(stmt.params());
        event_at!(
            self.level,
            tag = stmt.tag().unwrap_or("-"),
            style = stmt.style().as_str(),
            param_count = stmt.params().len(),
            sql = stmt.sql(),
            params = %params,
            "recorded statement"
        );
        Ok(())
    }
}
