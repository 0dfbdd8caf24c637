use super::statement::Statement;
use crate::error::SqlResult;
use crate::placeholder::{DELIMITER, PlaceholderStyle};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SqlPart {
    Raw(String),
    /// 1-based position of the bound value in `params`.
    Param(usize),
}

/// A parameter-safe dynamic SQL builder.
///
/// `Sql` stores SQL pieces and parameters separately and writes a placeholder
/// marker for every bound value when rendering.
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct Sql {
    parts: Vec<SqlPart>,
    params: Vec<Value>,
    style: PlaceholderStyle,
    tag: Option<String>,
}

impl Sql {
    /// Create a new builder with an initial SQL fragment.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            parts: vec![SqlPart::Raw(initial_sql.into())],
            ..Self::default()
        }
    }

    /// Create an empty builder.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Render markers in `style` (default `?`).
    pub fn style(&mut self, style: PlaceholderStyle) -> &mut Self {
        self.style = style;
        self
    }

    /// Consuming counterpart of [`Sql::style`].
    pub fn with_style(mut self, style: PlaceholderStyle) -> Self {
        self.style = style;
        self
    }

    /// Associate a tag for recorders.
    pub fn tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tag = Some(tag.into());
        self
    }

    /// Consuming counterpart of [`Sql::tag`].
    pub fn tagged(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if sql.is_empty() {
            return self;
        }

        match self.parts.last_mut() {
            Some(SqlPart::Raw(last)) => last.push_str(sql),
            _ => self.parts.push(SqlPart::Raw(sql.to_string())),
        }
        self
    }

    /// Append a placeholder marker and bind its value.
    pub fn push_bind(&mut self, value: impl Into<Value>) -> &mut Self {
        self.params.push(value.into());
        self.parts.push(SqlPart::Param(self.params.len()));
        self
    }

    /// Append comma-separated markers and bind all values, in order.
    ///
    /// An empty list appends `NULL`, so `IN (NULL)` stays valid SQL but never
    /// matches a row. Check for emptiness first if the clause should be skipped.
    pub fn push_bind_list<T>(&mut self, values: impl IntoIterator<Item = T>) -> &mut Self
    where
        T: Into<Value>,
    {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return self.push("NULL");
        };

        self.push_bind(first);
        let delim = DELIMITER.to_string();
        for v in iter {
            self.push(&delim);
            self.push_bind(v);
        }
        self
    }

    /// Append another `Sql` fragment, consuming it.
    ///
    /// The fragment's parameters are renumbered after the ones already bound.
    pub fn push_sql(&mut self, mut other: Sql) -> &mut Self {
        let offset = self.params.len();
        for part in other.parts.drain(..) {
            match part {
                SqlPart::Raw(s) => {
                    self.push(&s);
                }
                SqlPart::Param(idx) => self.parts.push(SqlPart::Param(offset + idx)),
            }
        }
        self.params.append(&mut other.params);
        if self.tag.is_none() {
            self.tag = other.tag;
        }
        self
    }

    /// Add a parameter without writing a marker.
    ///
    /// For SQL text that already contains its markers:
    /// ```
    /// let q = bindsql::sql("SELECT name FROM user WHERE id = ?").bind(123);
    /// assert_eq!(q.param_count(), 1);
    /// ```
    /// Nothing ties these values to markers, so [`Sql::build`] re-counts.
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Render SQL with placeholder markers in the configured style.
    ///
    /// A `$n` marker always names its own value's position, including values
    /// added with [`Sql::bind`] before it.
    pub fn to_sql(&self) -> String {
        let raw_len: usize = self
            .parts
            .iter()
            .map(|p| match p {
                SqlPart::Raw(s) => s.len(),
                SqlPart::Param(_) => 0,
            })
            .sum();
        let mut out = String::with_capacity(raw_len + self.params.len() * 3);

        for part in &self.parts {
            match part {
                SqlPart::Raw(s) => out.push_str(s),
                SqlPart::Param(idx) => self.style.write_marker(&mut out, *idx),
            }
        }
        out
    }

    /// Bound parameters, in marker order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Number of bound parameters.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// The configured placeholder style.
    pub fn placeholder_style(&self) -> PlaceholderStyle {
        self.style
    }

    /// The tag set via [`Sql::tag`], if any.
    pub fn tag_ref(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Render and validate into a [`Statement`].
    ///
    /// Fails with `ParameterMismatch` when the rendered SQL's markers and the
    /// bound parameters disagree (possible after [`Sql::bind`] or when raw SQL
    /// contains its own markers).
    pub fn build(&self) -> SqlResult<Statement> {
        let stmt = Statement::new(self.style, self.to_sql(), self.params.clone())?;
        Ok(match &self.tag {
            Some(tag) => stmt.with_tag(tag.clone()),
            None => stmt,
        })
    }
}
