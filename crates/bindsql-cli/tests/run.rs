use bindsql_cli::{Command, ConfigFile, HelpTopic, parse_args, run};

fn argv(v: &[&str]) -> Vec<String> {
    std::iter::once("bindsql")
        .chain(v.iter().copied())
        .map(String::from)
        .collect()
}

#[test]
fn help_and_placeholders_succeed() {
    run(argv(&["--help"])).unwrap();
    run(argv(&["placeholders", "3"])).unwrap();
    run(argv(&["placeholders", "0", "--style", "dollar"])).unwrap();
}

#[test]
fn search_records_to_stdout() {
    run(argv(&["search", "--name", "Bob", "--ids", "1,2,3", "--json"])).unwrap();
}

#[test]
fn errors_are_reported_not_panicked() {
    let err = run(argv(&["search", "--style", "colon"])).unwrap_err();
    assert!(format!("{err:#}").contains("unknown placeholder style"));

    let err = run(argv(&["demo", "--config", "missing/bindsql.toml"])).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read config file"));
}

#[test]
fn subcommand_help_topics() {
    assert_eq!(
        parse_args(&argv(&["demo", "-h"])).unwrap(),
        Command::Help(HelpTopic::Demo)
    );
    assert_eq!(
        parse_args(&argv(&["placeholders", "--help"])).unwrap(),
        Command::Help(HelpTopic::Placeholders)
    );
}

#[test]
fn example_config_parses() {
    let raw = include_str!("../bindsql.example.toml");
    let cfg = ConfigFile::parse(raw).unwrap();
    assert_eq!(cfg.name_env, "MY_USER");
}
