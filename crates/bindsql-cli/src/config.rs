use bindsql::search::{Page, SortField};
use bindsql::{Conjunction, OutputFormat, PlaceholderStyle};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// `bindsql.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Environment variable read by `demo` as a second untrusted name.
    pub name_env: String,
    /// Ids for the `IN (...)` filter.
    pub ids: Vec<i64>,
    /// `ORDER BY` field, checked against the allow-list.
    pub sort: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub style: PlaceholderStyle,
    pub output: OutputFormat,
    /// Joins the `category_id` conditions; `and`, `or` or `xor`.
    pub conjunction: Conjunction,
    /// `{alias}` substitutions for the CTE example, merged over the defaults.
    pub aliases: BTreeMap<String, String>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            name_env: "MY_USER".to_string(),
            ids: vec![1, 2, 3, 4, 5],
            sort: None,
            offset: None,
            limit: None,
            style: PlaceholderStyle::Question,
            output: OutputFormat::Text,
            conjunction: Conjunction::Or,
            aliases: default_aliases(),
        }
    }
}

fn default_aliases() -> BTreeMap<String, String> {
    [("with_1", "w1"), ("table_1", "user"), ("field_1", "email")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl ConfigFile {
    /// Read `path`. A missing file yields defaults unless `required`.
    pub fn load(path: &Path, required: bool) -> anyhow::Result<Self> {
        if !required && !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;
        let file = Self::parse(&raw)
            .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {e}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(file)
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let mut file: Self = toml::from_str(raw)?;
        let mut aliases = default_aliases();
        aliases.append(&mut file.aliases);
        file.aliases = aliases;
        file.validate()?;
        Ok(file)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.name_env.trim().is_empty() {
            anyhow::bail!("name_env must not be empty");
        }
        if self.offset.is_some() && self.limit.is_none() {
            anyhow::bail!("offset requires limit");
        }
        Ok(())
    }

    /// Sort field after the allow-list; unknown names fall back to `name`.
    pub fn sort_field(&self) -> Option<SortField> {
        let requested = self.sort.as_deref()?;
        if SortField::parse(requested).is_none() {
            tracing::warn!(requested, "sort field not allowed, using name");
        }
        Some(SortField::parse_or_first(requested))
    }

    pub fn page(&self) -> Option<Page> {
        self.limit
            .map(|limit| Page::new(self.offset.unwrap_or(0), limit))
    }

    /// Aliases in the form `apply_aliases` takes.
    pub fn alias_pairs(&self) -> Vec<(&str, &str)> {
        self.aliases
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(ConfigFile::parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn parses_all_keys() {
        let cfg = ConfigFile::parse(
            r#"
name_env = "NAME"
ids = [7, 8]
sort = "name"
offset = 10
limit = 5
style = "dollar"
output = "json"
conjunction = "XOR"

[aliases]
table_1 = "account"
"#,
        )
        .unwrap();

        assert_eq!(cfg.name_env, "NAME");
        assert_eq!(cfg.ids, vec![7, 8]);
        assert_eq!(cfg.sort_field(), Some(SortField::Name));
        assert_eq!(cfg.page(), Some(Page::new(10, 5)));
        assert_eq!(cfg.style, PlaceholderStyle::Dollar);
        assert_eq!(cfg.output, OutputFormat::Json);
        assert_eq!(cfg.conjunction, Conjunction::Xor);
        assert_eq!(
            cfg.alias_pairs(),
            vec![("field_1", "email"), ("table_1", "account"), ("with_1", "w1")]
        );
    }

    #[test]
    fn partial_alias_table_keeps_other_defaults() {
        let cfg = ConfigFile::parse("[aliases]\ntable_1 = \"account\"\nextra = \"x\"").unwrap();
        assert_eq!(cfg.aliases.len(), 4);
        assert_eq!(cfg.aliases["with_1"], "w1");
        assert_eq!(cfg.aliases["table_1"], "account");
    }

    #[test]
    fn disallowed_sort_falls_back() {
        let cfg = ConfigFile::parse(r#"sort = "password""#).unwrap();
        assert_eq!(cfg.sort_field(), Some(SortField::Name));
    }

    #[test]
    fn rejects_invalid_files() {
        assert!(ConfigFile::parse("offset = 3").is_err());
        assert!(ConfigFile::parse(r#"name_env = """#).is_err());
        assert!(ConfigFile::parse(r#"style = "colon""#).is_err());
        assert!(ConfigFile::parse("unknown = 1").is_err());
        assert!(ConfigFile::parse(r#"conjunction = "OR 1=1""#).is_err());
    }

    #[test]
    fn missing_optional_file_is_defaults() {
        let path = Path::new("definitely/not/here/bindsql.toml");
        assert_eq!(ConfigFile::load(path, false).unwrap(), ConfigFile::default());
        assert!(ConfigFile::load(path, true).is_err());
    }
}
