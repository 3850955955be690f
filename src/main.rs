use clap::ErrorKind;
use lc3vm::Config;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let config = match Config::with(std::env::args_os()) {
        Ok(config) => config,
        Err(e) => match e.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => e.exit(),
            _ => {
                eprintln!("{}", e.message);
                process::exit(1);
            }
        },
    };

    init_logging(config.log_level());

    if let Err(e) = lc3vm::run(config) {
        eprintln!("error: {}", e);
        process::exit(e.exit_code());
    }
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
