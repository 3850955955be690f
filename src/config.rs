use clap::{App, Arg};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, PartialEq)]
pub struct Config {
    pub images: Vec<PathBuf>,
    pub verbosity: u64,
}

impl Config {
    /// Parses the command line, program name first.
    pub fn with<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = app().get_matches_from_safe(args)?;

        Ok(Self {
            images: matches
                .values_of_os("IMAGE")
                .map(|values| values.map(PathBuf::from).collect())
                .unwrap_or_default(),
            verbosity: matches.occurrences_of("verbose"),
        })
    }

    /// Log filter used when RUST_LOG is not set.
    pub fn log_level(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn app() -> App<'static, 'static> {
    App::new("vm")
        .about("Runs LC-3 program images")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Logs more to stderr; repeat for more detail"),
        )
        .arg(
            Arg::with_name("IMAGE")
                .help("Program images to load, in order. Execution starts at x3000.")
                .required(true)
                .multiple(true)
                .index(1),
        )
}
