//! The anti-pattern, kept only so `demo` can print it beside the safe form.
//!
//! Nothing here is ever recorded: the output is labelled INSECURE and shown as
//! text.

use bindsql::search::{ARTICLES_QUERY, LOOKUP_QUERY};

/// Where an untrusted value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Env,
    ProgramPath,
    Stdin,
}

impl Source {
    pub fn label(self) -> &'static str {
        match self {
            Source::Env => "environment",
            Source::ProgramPath => "program path",
            Source::Stdin => "stdin",
        }
    }
}

/// Splice `value` straight into the lookup SQL. Injectable by construction.
pub fn concat_lookup(value: &str) -> String {
    format!("{LOOKUP_QUERY}{value}")
}

/// Splice `value` into an article condition.
pub fn concat_category(value: &str) -> String {
    format!("{ARTICLES_QUERY}(category_id IS NULL OR category_id = {value})")
}
