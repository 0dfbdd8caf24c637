use crate::cli::DemoArgs;
use crate::config::ConfigFile;
use crate::insecure::{Source, concat_category, concat_lookup};
use crate::recorder_for;
use anyhow::Context;
use bindsql::search::{UserSearch, find_articles, lookup_by_username};
use bindsql::{Condition, Conjunction, OutputFormat, QueryRecorder, apply_aliases, record_sql, sql};
use colored::Colorize;
use std::io::{BufRead, Write};

/// CTE whose identifiers come from config; the type filter is bound.
const ALIAS_TEMPLATE: &str = "WITH {with_1} AS (SELECT id, name, type, {field_1} AS f1, deleted FROM {table_1}) \
SELECT t.name, t.f1 FROM {with_1} AS t WHERE t.deleted IS NULL AND t.type = ";

/// Untrusted values the demo feeds into its queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoInputs {
    pub username: String,
    pub env_name: Option<String>,
    pub program: String,
}

impl DemoInputs {
    /// Prompt on `prompt`, read one line from `input`, and look up `name_env`.
    pub fn read(
        cfg: &ConfigFile,
        program: String,
        input: &mut impl BufRead,
        prompt: &mut impl Write,
    ) -> anyhow::Result<Self> {
        write!(prompt, "Enter your name: ")?;
        prompt.flush()?;

        let mut line = String::new();
        input.read_line(&mut line).context("failed to read name from stdin")?;
        let username = line.trim_end_matches(['\r', '\n']).to_string();

        let env_name = std::env::var(&cfg.name_env).ok();
        if env_name.is_none() {
            tracing::warn!(var = %cfg.name_env, "environment variable not set");
        }

        Ok(Self {
            username,
            env_name,
            program,
        })
    }
}

pub fn run(args: DemoArgs, program: String) -> anyhow::Result<()> {
    let mut cfg = ConfigFile::load(&args.config, args.config_required)?;
    if let Some(style) = args.output.style {
        cfg.style = style;
    }
    if let Some(format) = args.output.format {
        cfg.output = format;
    }

    let inputs = {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        DemoInputs::read(&cfg, program, &mut input, &mut std::io::stderr())?
    };

    let recorder = recorder_for(cfg.output);
    run_with(&inputs, &cfg, &recorder, &mut std::io::stdout())
}

/// Record the safe statements through `recorder` and print the concatenated
/// ones to `out`, in script order.
pub fn run_with(
    inputs: &DemoInputs,
    cfg: &ConfigFile,
    recorder: &dyn QueryRecorder,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    record_sql(
        recorder,
        &lookup_by_username(&inputs.username).with_style(cfg.style),
    )?;

    if let Some(name) = &inputs.env_name {
        print_insecure(out, cfg.output, Source::Env, &concat_lookup(name))?;
    }
    print_insecure(out, cfg.output, Source::ProgramPath, &concat_lookup(&inputs.program))?;
    print_insecure(out, cfg.output, Source::Stdin, &concat_lookup(&inputs.username))?;

    let mut search = UserSearch::new(inputs.username.clone(), cfg.ids.clone()).style(cfg.style);
    if let Some(field) = cfg.sort_field() {
        search = search.sort(field);
    }
    if let Some(page) = cfg.page() {
        search = search.page(page);
    }
    record_sql(recorder, &search.build())?;

    record_sql(recorder, &aliased_cte(cfg, "admin")?)?;

    let category = &inputs.username;
    let by_category = Condition::all(vec![Condition::eq("category_id", category.as_str())?]);
    record_sql(recorder, &find_articles(&by_category).with_style(cfg.style))?;

    record_sql(
        recorder,
        &find_articles(&category_or_null(Conjunction::Or, category)?).with_style(cfg.style),
    )?;
    print_insecure(out, cfg.output, Source::Stdin, &concat_category(category))?;

    record_sql(
        recorder,
        &find_articles(&category_or_null(cfg.conjunction, category)?).with_style(cfg.style),
    )?;
    Ok(())
}

/// `(category_id IS NULL <conjunction> category_id = ?)`
fn category_or_null(conjunction: Conjunction, category: &str) -> bindsql::SqlResult<Condition> {
    Ok(Condition::group(
        conjunction,
        vec![
            Condition::literal("category_id IS NULL"),
            Condition::eq("category_id", category)?,
        ],
    ))
}

fn aliased_cte(cfg: &ConfigFile, user_type: &str) -> anyhow::Result<bindsql::Sql> {
    let text = apply_aliases(ALIAS_TEMPLATE, &cfg.alias_pairs())?;
    let mut q = sql(text).with_style(cfg.style).tagged("users.by_type");
    q.push_bind(user_type);
    Ok(q)
}

fn print_insecure(
    out: &mut dyn Write,
    format: OutputFormat,
    source: Source,
    sql: &str,
) -> anyhow::Result<()> {
    tracing::warn!(source = source.label(), "value concatenated into SQL");
    match format {
        OutputFormat::Text => {
            writeln!(out, "{} ({}): {sql}\n", "INSECURE".red().bold(), source.label())?;
        }
        OutputFormat::Json => {
            let line = serde_json::json!({
                "insecure": true,
                "source": source.label(),
                "sql": sql,
            });
            writeln!(out, "{line}")?;
        }
    }
    out.flush()?;
    Ok(())
}
