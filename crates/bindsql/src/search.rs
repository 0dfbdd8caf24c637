//! User search: a query assembled from optional filters.
//!
//! Every user-supplied value is bound as a parameter. The only user-influenced
//! SQL text is the `ORDER BY` column, which is picked from a fixed allow-list.
//!
//! ```
//! use bindsql::search::{UserSearch, BASE_QUERY};
//!
//! let q = UserSearch::new("Bob", vec![1, 2, 3]).build();
//! assert_eq!(
//!     q.to_sql(),
//!     format!("{BASE_QUERY} AND u.name LIKE ? AND u.id IN (?,?,?)")
//! );
//! assert_eq!(q.param_count(), 4);
//! ```

use crate::condition::Condition;
use crate::placeholder::PlaceholderStyle;
use crate::sql::{Sql, sql};
use serde::{Deserialize, Serialize};

/// Unfiltered query: every user that is not soft-deleted.
pub const BASE_QUERY: &str = "SELECT u.name, u.email FROM user AS u WHERE u.deleted IS NULL";

/// Columns a search may be ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    #[default]
    Email,
}

impl SortField {
    pub const ALL: [SortField; 2] = [SortField::Name, SortField::Email];

    /// The column name written into SQL.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Email => "email",
        }
    }

    /// Look `s` up in the allow-list (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.column().eq_ignore_ascii_case(s.trim()))
    }

    /// Like [`SortField::parse`], but a name not on the allow-list resolves to
    /// the first allowed field (`name`). The [`Default`] (`email`) is only for
    /// when no sort was asked for.
    pub fn parse_or_first(s: &str) -> Self {
        Self::parse(s).unwrap_or(Self::ALL[0])
    }
}

/// Offset/limit paging, bound as `LIMIT ?, ?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

impl Page {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }
}

/// Filters for a user search.
///
/// Empty `name` and empty `ids` add no clause; `sort` and `page` are opt-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSearch {
    pub name: String,
    pub ids: Vec<i64>,
    pub sort: Option<SortField>,
    pub page: Option<Page>,
    pub style: PlaceholderStyle,
}

impl UserSearch {
    pub fn new(name: impl Into<String>, ids: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            ids,
            ..Self::default()
        }
    }

    pub fn sort(mut self, field: SortField) -> Self {
        self.sort = Some(field);
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn style(mut self, style: PlaceholderStyle) -> Self {
        self.style = style;
        self
    }

    /// Assemble the query. Finish with [`Sql::build`] for a checked statement.
    pub fn build(&self) -> Sql {
        let mut q = sql(BASE_QUERY).tagged("users.search");
        q.style(self.style);

        if !self.name.is_empty() {
            q.push(" AND u.name LIKE ")
                .push_bind(format!("%{}%", self.name));
        }

        if !self.ids.is_empty() {
            q.push(" AND u.id IN (")
                .push_bind_list(self.ids.iter().copied())
                .push(")");
        }

        if let Some(field) = self.sort {
            q.push(" ORDER BY u.").push(field.column());
        }

        if let Some(page) = self.page {
            q.push(" LIMIT ")
                .push_bind(page.offset)
                .push(", ")
                .push_bind(page.limit);
        }

        q
    }
}

/// Lookup SQL without its value; the parameterized and concatenated forms
/// both start from this.
pub const LOOKUP_QUERY: &str = "SELECT name FROM user WHERE username = ";

/// Parameterized lookup of one user by username.
pub fn lookup_by_username(username: &str) -> Sql {
    let mut q = sql(LOOKUP_QUERY).tagged("users.lookup");
    q.push_bind(username);
    q
}

/// Article query without its condition.
pub const ARTICLES_QUERY: &str = "SELECT * FROM articles WHERE ";

/// Articles matching `condition`, every value bound.
pub fn find_articles(condition: &Condition) -> Sql {
    let mut q = sql(ARTICLES_QUERY).tagged("articles.find");
    condition.append_to_sql(&mut q);
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn empty_filters_yield_base_query() {
        let q = UserSearch::new("", Vec::new()).build();
        assert_eq!(q.to_sql(), BASE_QUERY);
        assert!(q.params().is_empty());
    }

    #[test]
    fn name_and_ids_add_like_and_in_clauses() {
        let q = UserSearch::new("MyName", vec![1, 2, 3]).build();
        assert_eq!(
            q.to_sql(),
            format!("{BASE_QUERY} AND u.name LIKE ? AND u.id IN (?,?,?)")
        );
        assert_eq!(
            q.params(),
            &[
                Value::from("%MyName%"),
                Value::Int(1),
                Value::Int(2),
                Value::Int(3)
            ]
        );
    }

    #[test]
    fn name_only() {
        let q = UserSearch::new("a", Vec::new()).build();
        assert_eq!(q.to_sql(), format!("{BASE_QUERY} AND u.name LIKE ?"));
        assert_eq!(q.params(), &[Value::from("%a%")]);
    }

    #[test]
    fn ids_only() {
        let q = UserSearch::new("", vec![9]).build();
        assert_eq!(q.to_sql(), format!("{BASE_QUERY} AND u.id IN (?)"));
        assert_eq!(q.params(), &[Value::Int(9)]);
    }

    #[test]
    fn sort_and_page_append_after_filters() {
        let q = UserSearch::new("x", vec![1])
            .sort(SortField::Email)
            .page(Page::new(0, 3))
            .build();
        assert_eq!(
            q.to_sql(),
            format!("{BASE_QUERY} AND u.name LIKE ? AND u.id IN (?) ORDER BY u.email LIMIT ?, ?")
        );
        assert_eq!(q.param_count(), 4);
        assert!(q.build().is_ok());
    }

    #[test]
    fn dollar_style_numbers_all_parameters() {
        let q = UserSearch::new("x", vec![1, 2])
            .style(PlaceholderStyle::Dollar)
            .build();
        assert!(q.to_sql().ends_with("u.name LIKE $1 AND u.id IN ($2,$3)"));
    }

    #[test]
    fn sort_field_allow_list() {
        assert_eq!(SortField::parse("NAME"), Some(SortField::Name));
        assert_eq!(SortField::parse("password"), None);
        assert_eq!(SortField::parse_or_first("email"), SortField::Email);
        assert_eq!(
            SortField::parse_or_first("email; DROP TABLE user"),
            SortField::Name
        );
        assert_eq!(SortField::default(), SortField::Email);
    }

    #[test]
    fn lookup_binds_username() {
        let stmt = lookup_by_username("x' OR '1'='1").build().unwrap();
        assert_eq!(stmt.sql(), "SELECT name FROM user WHERE username = ?");
        assert_eq!(stmt.params(), &[Value::from("x' OR '1'='1")]);
        assert_eq!(stmt.tag(), Some("users.lookup"));
    }

    #[test]
    fn find_articles_appends_condition() {
        let cond = Condition::any(vec![
            Condition::literal("category_id IS NULL"),
            Condition::eq("category_id", "3").unwrap(),
        ]);
        let stmt = find_articles(&cond).build().unwrap();
        assert_eq!(
            stmt.sql(),
            "SELECT * FROM articles WHERE (category_id IS NULL OR category_id = ?)"
        );
        assert_eq!(stmt.params(), &[Value::from("3")]);
        assert_eq!(stmt.tag(), Some("articles.find"));
    }
}
