use super::*;
use crate::placeholder::PlaceholderStyle;
use crate::value::Value;

#[test]
fn builds_placeholders_in_order() {
    let mut q = sql("SELECT * FROM user WHERE a = ");
    q.push_bind(1).push(" AND b = ").push_bind("x");

    assert_eq!(q.to_sql(), "SELECT * FROM user WHERE a = ? AND b = ?");
    assert_eq!(q.params(), &[Value::Int(1), Value::from("x")]);
}

#[test]
fn dollar_style_numbers_markers() {
    let mut q = sql("SELECT * FROM user WHERE a = ");
    q.style(PlaceholderStyle::Dollar)
        .push_bind(1)
        .push(" AND id IN (")
        .push_bind_list([2, 3])
        .push(")");

    assert_eq!(q.to_sql(), "SELECT * FROM user WHERE a = $1 AND id IN ($2,$3)");
}

#[test]
fn can_compose_fragments() {
    let mut w = Sql::empty();
    w.push(" WHERE id = ").push_bind(42);

    let mut q = sql("SELECT * FROM user");
    q.push_sql(w);

    assert_eq!(q.to_sql(), "SELECT * FROM user WHERE id = ?");
    assert_eq!(q.param_count(), 1);
}

#[test]
fn composed_fragments_renumber_under_dollar_style() {
    let mut w = Sql::empty();
    w.push(" AND b = ").push_bind("x");

    let mut q = sql("SELECT * FROM t WHERE a = ").with_style(PlaceholderStyle::Dollar);
    q.push_bind(1).push_sql(w);

    assert_eq!(q.to_sql(), "SELECT * FROM t WHERE a = $1 AND b = $2");
}

#[test]
fn bind_list_renders_commas_without_spaces() {
    let mut q = sql("SELECT * FROM user WHERE id IN (");
    q.push_bind_list(vec![1, 2, 3]).push(")");
    assert_eq!(q.to_sql(), "SELECT * FROM user WHERE id IN (?,?,?)");
    assert_eq!(q.param_count(), 3);
}

#[test]
fn bind_list_empty_is_valid_sql() {
    let mut q = sql("SELECT * FROM user WHERE id IN (");
    q.push_bind_list(Vec::<i64>::new()).push(")");
    assert_eq!(q.to_sql(), "SELECT * FROM user WHERE id IN (NULL)");
    assert_eq!(q.param_count(), 0);
}

#[test]
fn build_checks_hand_written_markers() {
    let ok = sql("SELECT name FROM user WHERE id = ?").bind("123").build();
    assert!(ok.is_ok());

    let err = sql("SELECT name FROM user WHERE id = ? AND type = ?")
        .bind("123")
        .build()
        .unwrap_err();
    assert!(err.is_parameter_mismatch());
    assert_eq!(
        err.to_string(),
        "Parameter mismatch: SQL has 2 placeholder(s) but 1 parameter(s) were given"
    );
}

#[test]
fn build_rejects_marker_pushed_as_raw_text() {
    let mut q = sql("SELECT * FROM user WHERE a = ?");
    q.push(" AND b = ").push_bind(2);
    assert!(q.build().unwrap_err().is_parameter_mismatch());
}

#[test]
fn build_carries_tag() {
    let stmt = sql("SELECT 1").tagged("users.ping").build().unwrap();
    assert_eq!(stmt.tag(), Some("users.ping"));
    assert_eq!(stmt.sql(), "SELECT 1");
}

#[test]
fn statement_serializes_sql_and_params() {
    let mut q = sql("SELECT * FROM user WHERE name LIKE ");
    q.push_bind("%a%");
    let json = serde_json::to_string(&q.build().unwrap()).unwrap();
    assert_eq!(json, r#"{"sql":"SELECT * FROM user WHERE name LIKE ?","params":["%a%"]}"#);
}

#[test]
fn dollar_markers_follow_values_added_by_bind() {
    let mut q = sql("SELECT * FROM t WHERE a = $1")
        .with_style(PlaceholderStyle::Dollar)
        .bind(1);
    q.push(" AND b = ").push_bind(2);

    assert_eq!(q.to_sql(), "SELECT * FROM t WHERE a = $1 AND b = $2");
    let stmt = q.build().unwrap();
    assert_eq!(stmt.params(), &[Value::Int(1), Value::Int(2)]);
}

#[test]
fn question_markers_after_bind_stay_positional() {
    let mut q = sql("SELECT * FROM t WHERE a = ?").bind(1);
    q.push(" AND b = ").push_bind(2);

    assert_eq!(q.to_sql(), "SELECT * FROM t WHERE a = ? AND b = ?");
    assert!(q.build().is_ok());
}
