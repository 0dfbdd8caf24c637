fn main() {
    // A missing .env file is fine; variables may come from the real environment.
    let _ = dotenvy::dotenv();
    bindsql_cli::init_logging();

    if let Err(e) = bindsql_cli::run(std::env::args().collect()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
