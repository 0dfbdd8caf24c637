use super::*;
use crate::error::SqlError;
use crate::sql::sql;
use std::sync::Arc;

fn lookup() -> (&'static str, Vec<Value>) {
    ("SELECT name FROM user WHERE id = ?", vec![Value::from("123")])
}

fn text_output(recorder: WriterRecorder<Vec<u8>>) -> String {
    String::from_utf8(recorder.into_inner().unwrap()).unwrap()
}

struct FailingRecorder;

impl QueryRecorder for FailingRecorder {
    fn on_record(&self, _stmt: &Statement) -> SqlResult<()> {
        Err(SqlError::Other("sink closed".to_string()))
    }
}

#[test]
fn writer_text_format() {
    let recorder = WriterRecorder::new(Vec::new());
    let (q, params) = lookup();
    record(&recorder, q, params).unwrap();

    assert_eq!(
        text_output(recorder),
        "SELECT name FROM user WHERE id = ?\nparams: ['123']\n\n"
    );
}

#[test]
fn writer_json_format() {
    let recorder = WriterRecorder::new(Vec::new()).format(OutputFormat::Json);
    let mut q = sql("SELECT u.name FROM user AS u WHERE u.id IN (");
    q.push_bind_list([1, 2]).push(")");
    record_sql(&recorder, &q).unwrap();

    assert_eq!(
        text_output(recorder),
        "{\"sql\":\"SELECT u.name FROM user AS u WHERE u.id IN (?,?)\",\"params\":[1,2]}\n"
    );
}

#[test]
fn writer_truncates_long_sql() {
    let recorder = WriterRecorder::new(Vec::new()).max_sql_length(6);
    record(&recorder, "SELECT 1 FROM dual", Vec::new()).unwrap();
    assert_eq!(text_output(recorder), "SELECT...\nparams: []\n\n");
}

#[test]
fn truncation_respects_char_boundaries() {
    assert_eq!(truncate_sql_bytes("héllo", 2), "h");
    assert_eq!(truncate_sql_bytes("abc", 10), "abc");
}

#[test]
fn recording_twice_is_idempotent() {
    let recorder = WriterRecorder::new(Vec::new());
    let (q, params) = lookup();
    record(&recorder, q, params.clone()).unwrap();
    record(&recorder, q, params).unwrap();

    let out = text_output(recorder);
    let (first, second) = out.split_at(out.len() / 2);
    assert_eq!(first, second);
}

#[test]
fn mismatch_is_rejected_before_emitting() {
    let recorder = MemoryRecorder::new();
    let err = record(
        &recorder,
        "SELECT name FROM user WHERE id = ?",
        vec![Value::from(1), Value::from(2)],
    )
    .unwrap_err();

    assert!(matches!(
        err,
        SqlError::ParameterMismatch {
            expected: 1,
            actual: 2
        }
    ));
    assert!(recorder.is_empty().unwrap());
}

#[test]
fn record_with_dollar_style() {
    let recorder = MemoryRecorder::new();
    record_with(
        &recorder,
        PlaceholderStyle::Dollar,
        "SELECT * FROM t WHERE a = $1 OR b = $1",
        vec![Value::from(7)],
    )
    .unwrap();
    assert_eq!(recorder.recordings().unwrap()[0].params(), &[Value::Int(7)]);
}

#[test]
fn memory_recorder_keeps_order() {
    let recorder = MemoryRecorder::new();
    record(&recorder, "SELECT 1", Vec::new()).unwrap();
    record(&recorder, "SELECT ?", vec![Value::from(2)]).unwrap();

    let sqls: Vec<_> = recorder
        .recordings()
        .unwrap()
        .iter()
        .map(|s| s.sql().to_string())
        .collect();
    assert_eq!(sqls, vec!["SELECT 1", "SELECT ?"]);

    recorder.clear().unwrap();
    assert!(recorder.is_empty().unwrap());
}

#[test]
fn composite_fans_out_in_order() {
    let a = Arc::new(MemoryRecorder::new());
    let b = Arc::new(MemoryRecorder::new());
    let composite = CompositeRecorder::new()
        .add_arc(a.clone())
        .add(NoopRecorder)
        .add_arc(b.clone());
    assert_eq!(composite.len(), 3);

    record(&composite, "SELECT 1", Vec::new()).unwrap();
    assert_eq!(a.len().unwrap(), 1);
    assert_eq!(b.len().unwrap(), 1);
}

#[test]
fn composite_stops_at_first_error() {
    let after = Arc::new(MemoryRecorder::new());
    let composite = CompositeRecorder::new()
        .add(FailingRecorder)
        .add_arc(after.clone());

    let err = record(&composite, "SELECT 1", Vec::new()).unwrap_err();
    assert_eq!(err.to_string(), "sink closed");
    assert!(after.is_empty().unwrap());
}

#[test]
fn dyn_recorder_is_accepted() {
    let recorder: Box<dyn QueryRecorder> = Box::new(MemoryRecorder::new());
    record(recorder.as_ref(), "SELECT 1", Vec::new()).unwrap();
}

#[cfg(feature = "tracing")]
#[test]
fn tracing_recorder_records_without_subscriber() {
    let recorder = TracingRecorder::at(tracing::Level::WARN);
    assert_eq!(recorder.level(), tracing::Level::WARN);
    assert_eq!(TracingRecorder::default().level(), tracing::Level::DEBUG);

    let (q, params) = lookup();
    record(&recorder, q, params).unwrap();
}

#[test]
fn output_format_parses() {
    assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
    assert!("yaml".parse::<OutputFormat>().is_err());
}
