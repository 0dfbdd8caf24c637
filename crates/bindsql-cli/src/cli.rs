use bindsql::{OutputFormat, PlaceholderStyle};
use std::path::PathBuf;

pub const DEFAULT_CONFIG: &str = "bindsql.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Demo,
    Search,
    Placeholders,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help(HelpTopic),
    Demo(DemoArgs),
    Search(SearchArgs),
    Placeholders(PlaceholdersArgs),
}

/// Flags shared by commands that record statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputArgs {
    pub format: Option<OutputFormat>,
    pub style: Option<PlaceholderStyle>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoArgs {
    pub config: PathBuf,
    /// `--config` was given, so a missing file is an error.
    pub config_required: bool,
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchArgs {
    pub name: String,
    pub ids: Vec<i64>,
    pub sort: Option<String>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub output: OutputArgs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholdersArgs {
    pub count: usize,
    pub start: usize,
    pub style: PlaceholderStyle,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" => Ok(Command::Help(HelpTopic::Root)),
        "demo" => parse_demo(it.map(|s| s.as_str())),
        "search" => parse_search(it.map(|s| s.as_str())),
        "placeholders" => parse_placeholders(it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

/// Value of `--flag VALUE` or `--flag=VALUE`, if `token` is that flag.
fn flag_value<'a>(
    token: &'a str,
    flag: &str,
    it: &mut impl Iterator<Item = &'a str>,
) -> anyhow::Result<Option<&'a str>> {
    if token == flag {
        let Some(v) = it.next() else {
            anyhow::bail!("{flag} requires a value");
        };
        return Ok(Some(v));
    }
    Ok(token
        .strip_prefix(flag)
        .and_then(|rest| rest.strip_prefix('=')))
}

/// Consume `token` if it is an output flag. Returns `false` when it is not.
fn parse_output_flag<'a>(
    token: &'a str,
    it: &mut impl Iterator<Item = &'a str>,
    out: &mut OutputArgs,
) -> anyhow::Result<bool> {
    if token == "--json" {
        out.format = Some(OutputFormat::Json);
        return Ok(true);
    }
    if let Some(v) = flag_value(token, "--format", it)? {
        out.format = Some(v.parse().map_err(anyhow::Error::msg)?);
        return Ok(true);
    }
    if let Some(v) = flag_value(token, "--style", it)? {
        out.style = Some(v.parse().map_err(anyhow::Error::msg)?);
        return Ok(true);
    }
    Ok(false)
}

fn parse_demo<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config = PathBuf::from(DEFAULT_CONFIG);
    let mut config_required = false;
    let mut output = OutputArgs::default();

    while let Some(token) = it.next() {
        if matches!(token, "-h" | "--help") {
            return Ok(Command::Help(HelpTopic::Demo));
        }
        if parse_output_flag(token, &mut it, &mut output)? {
            continue;
        }
        let Some(v) = flag_value(token, "--config", &mut it)? else {
            anyhow::bail!("unknown argument: {token}");
        };
        config = PathBuf::from(v);
        config_required = true;
    }

    Ok(Command::Demo(DemoArgs {
        config,
        config_required,
        output,
    }))
}

fn parse_search<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut args = SearchArgs::default();

    while let Some(token) = it.next() {
        if matches!(token, "-h" | "--help") {
            return Ok(Command::Help(HelpTopic::Search));
        }
        if parse_output_flag(token, &mut it, &mut args.output)? {
            continue;
        }
        if let Some(v) = flag_value(token, "--name", &mut it)? {
            args.name = v.to_string();
        } else if let Some(v) = flag_value(token, "--ids", &mut it)? {
            args.ids = parse_ids(v)?;
        } else if let Some(v) = flag_value(token, "--sort", &mut it)? {
            args.sort = Some(v.to_string());
        } else if let Some(v) = flag_value(token, "--offset", &mut it)? {
            args.offset = Some(parse_number(v, "--offset")?);
        } else if let Some(v) = flag_value(token, "--limit", &mut it)? {
            args.limit = Some(parse_number(v, "--limit")?);
        } else {
            anyhow::bail!("unknown argument: {token}");
        }
    }

    if args.offset.is_some() && args.limit.is_none() {
        anyhow::bail!("--offset requires --limit");
    }

    Ok(Command::Search(args))
}

fn parse_placeholders<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut count: Option<usize> = None;
    let mut start: usize = 1;
    let mut style = PlaceholderStyle::default();

    while let Some(token) = it.next() {
        if matches!(token, "-h" | "--help") {
            return Ok(Command::Help(HelpTopic::Placeholders));
        }
        if let Some(v) = flag_value(token, "--style", &mut it)? {
            style = v.parse().map_err(anyhow::Error::msg)?;
        } else if let Some(v) = flag_value(token, "--start", &mut it)? {
            start = parse_number(v, "--start")?;
            if start == 0 {
                anyhow::bail!("--start is 1-based and must be at least 1");
            }
        } else if count.is_none() && !token.starts_with('-') {
            count = Some(parse_number(token, "COUNT")?);
        } else {
            anyhow::bail!("unknown argument: {token}");
        }
    }

    let Some(count) = count else {
        anyhow::bail!("placeholders requires COUNT");
    };

    Ok(Command::Placeholders(PlaceholdersArgs {
        count,
        start,
        style,
    }))
}

fn parse_number<T: std::str::FromStr>(v: &str, what: &str) -> anyhow::Result<T> {
    v.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("{what}: expected a non-negative integer, got '{v}'"))
}

fn parse_ids(v: &str) -> anyhow::Result<Vec<i64>> {
    v.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| anyhow::anyhow!("--ids: invalid id '{s}'"))
        })
        .collect()
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
bindsql - parameterized queries vs. string concatenation

USAGE:
  bindsql <COMMAND> [OPTIONS]

COMMANDS:
  demo          Read a username, then record safe queries next to injectable ones
  search        Record a user search built from the given filters
  placeholders  Print COUNT placeholder markers

Run `bindsql <command> --help` for more."
            );
        }
        HelpTopic::Demo => {
            println!(
                "\
USAGE:
  bindsql demo [OPTIONS]

Reads one line (a username) from stdin, the environment variable named by
`name_env` in the config (default MY_USER), and the program path.
The username is also used as the article category for the condition
examples, joined by `conjunction` from the config (default or).

OPTIONS:
  --config <FILE>       Config file path (default: bindsql.toml, optional)
  --json                Shorthand for --format json
  --format <FORMAT>     text | json
  --style <STYLE>       question | dollar
  -h, --help            Print help"
            );
        }
        HelpTopic::Search => {
            println!(
                "\
USAGE:
  bindsql search [OPTIONS]

OPTIONS:
  --name <NAME>         Filter with name LIKE %NAME%
  --ids <1,2,3>         Filter with id IN (...)
  --sort <FIELD>        name | email (anything else falls back to name)
  --offset <N>          Rows to skip (requires --limit)
  --limit <N>           Rows to return
  --json                Shorthand for --format json
  --format <FORMAT>     text | json
  --style <STYLE>       question | dollar
  -h, --help            Print help"
            );
        }
        HelpTopic::Placeholders => {
            println!(
                "\
USAGE:
  bindsql placeholders <COUNT> [OPTIONS]

OPTIONS:
  --style <STYLE>       question | dollar
  --start <N>           First index for numbered markers (default: 1)
  -h, --help            Print help"
            );
        }
    }
}
