mod cli;
mod config;
mod demo;
mod insecure;
mod search;

use bindsql::{CompositeRecorder, OutputFormat, TracingRecorder, WriterRecorder};
use tracing_subscriber::EnvFilter;

pub use cli::{Command, HelpTopic, parse_args};
pub use config::ConfigFile;

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    let cmd = cli::parse_args(&args)?;
    match cmd {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        cli::Command::Demo(demo_args) => {
            let program = args.first().cloned().unwrap_or_default();
            demo::run(demo_args, program)
        }
        cli::Command::Search(search_args) => search::run(search_args),
        cli::Command::Placeholders(p) => {
            println!("{}", bindsql::placeholders_with(p.style, p.start, p.count));
            Ok(())
        }
    }
}

/// Install the stderr `tracing` subscriber. `RUST_LOG` overrides the default
/// filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bindsql=info,bindsql_cli=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

/// Statements go to stdout in `format` and to `tracing` at debug level.
pub(crate) fn recorder_for(format: OutputFormat) -> CompositeRecorder {
    CompositeRecorder::new()
        .add(WriterRecorder::stdout().format(format))
        .add(TracingRecorder::at(tracing::Level::DEBUG))
}
