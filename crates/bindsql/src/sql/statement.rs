use crate::error::{SqlError, SqlResult};
use crate::placeholder::{PlaceholderStyle, count_placeholders};
use crate::value::Value;
use serde::Serialize;

/// SQL text plus the parameters bound to its markers.
///
/// Construction checks that the marker count matches the parameter count, so a
/// `Statement` in hand is always consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    sql: String,
    params: Vec<Value>,
    #[serde(skip)]
    style: PlaceholderStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
}

impl Statement {
    /// Pair `sql` with `params`, checking arity against markers in `style`.
    pub fn new(
        style: PlaceholderStyle,
        sql: impl Into<String>,
        params: Vec<Value>,
    ) -> SqlResult<Self> {
        let sql = sql.into();
        let expected = count_placeholders(style, &sql);
        if expected != params.len() {
            return Err(SqlError::mismatch(expected, params.len()));
        }
        Ok(Self {
            sql,
            params,
            style,
            tag: None,
        })
    }

    /// Attach a tag for recorders.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// The SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameters in marker order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn style(&self) -> PlaceholderStyle {
        self.style
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Split into SQL text and parameters.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}
