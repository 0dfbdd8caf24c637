use super::truncate_sql_bytes;
use super::types::{OutputFormat, QueryRecorder};
use crate::error::{SqlError, SqlResult};
use crate::sql::Statement;
use crate::value::format_params;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(m: &Mutex<T>) -> SqlResult<MutexGuard<'_, T>> {
    m.lock()
        .map_err(|_| SqlError::Other("recorder lock poisoned".to_string()))
}

/// A recorder that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

impl QueryRecorder for NoopRecorder {
    fn on_record(&self, _stmt: &Statement) -> SqlResult<()> {
        Ok(())
    }
}

/// Writes each recording to an `io::Write` sink (stdout by default).
pub struct WriterRecorder<W: Write + Send> {
    out: Mutex<W>,
    /// Layout of each recording.
    pub format: OutputFormat,
    /// Truncate long SQL strings (in bytes, on a char boundary). `None` means
    /// no truncation. Only applies to [`OutputFormat::Text`].
    pub max_sql_length: Option<usize>,
}

impl WriterRecorder<std::io::Stdout> {
    /// Record to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> WriterRecorder<W> {
    /// Record to `out` in text format.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            format: OutputFormat::Text,
            max_sql_length: None,
        }
    }

    /// Override the output format.
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Consume the recorder, returning the sink.
    pub fn into_inner(self) -> SqlResult<W> {
        self.out
            .into_inner()
            .map_err(|_| SqlError::Other("recorder lock poisoned".to_string()))
    }

    fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }
}

impl<W: Write + Send> QueryRecorder for WriterRecorder<W> {
    fn on_record(&self, stmt: &Statement) -> SqlResult<()> {
        let rendered = match self.format {
            OutputFormat::Text => format!(
                "{}\nparams: {}\n\n",
                self.truncate_sql(stmt.sql()),
                format_params(stmt.params())
            ),
            OutputFormat::Json => {
                let mut line = serde_json::to_string(stmt)?;
                line.push('\n');
                line
            }
        };

        let mut out = lock(&self.out)?;
        out.write_all(rendered.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Keeps every recording in memory.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    recordings: Mutex<Vec<Statement>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, oldest first.
    pub fn recordings(&self) -> SqlResult<Vec<Statement>> {
        Ok(lock(&self.recordings)?.clone())
    }

    pub fn len(&self) -> SqlResult<usize> {
        Ok(lock(&self.recordings)?.len())
    }

    pub fn is_empty(&self) -> SqlResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn clear(&self) -> SqlResult<()> {
        lock(&self.recordings)?.clear();
        Ok(())
    }
}

impl QueryRecorder for MemoryRecorder {
    fn on_record(&self, stmt: &Statement) -> SqlResult<()> {
        lock(&self.recordings)?.push(stmt.clone());
        Ok(())
    }
}

/// Delegates to several recorders in insertion order, stopping at the first
/// error.
#[derive(Default)]
pub struct CompositeRecorder {
    recorders: Vec<Arc<dyn QueryRecorder>>,
}

impl CompositeRecorder {
    /// Create an empty composite recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a recorder.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: QueryRecorder + 'static>(mut self, recorder: R) -> Self {
        self.recorders.push(Arc::new(recorder));
        self
    }

    /// Add an Arc-wrapped recorder.
    pub fn add_arc(mut self, recorder: Arc<dyn QueryRecorder>) -> Self {
        self.recorders.push(recorder);
        self
    }

    pub fn len(&self) -> usize {
        self.recorders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorders.is_empty()
    }
}

impl QueryRecorder for CompositeRecorder {
    fn on_record(&self, stmt: &Statement) -> SqlResult<()> {
        for recorder in &self.recorders {
            recorder.on_record(stmt)?;
        }
        Ok(())
    }
}
