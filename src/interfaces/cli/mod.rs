//! Command-line interface of ShellSym.

use std::path::{Path, PathBuf};

use anyhow::{self, format_err};
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::append::Append;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::io::format::shellsym_output;

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;

const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Logs a nicely formatted ShellSym heading to the `shellsym-output` logger.
pub fn log_heading() {
    let version = if let Some(ver) = VERSION {
        format!("v{ver}")
    } else {
        "v unknown".to_string()
    };
    shellsym_output!("╭─────────────────────────────────────────────────────────────────────────────────────────────────────╮");
    shellsym_output!("│                                                                                                     │");
    shellsym_output!("│   ShellSym: symmetry-adapted atomic-orbital shells in D2h and its subgroups                         │");
    shellsym_output!("│                                                                                                     │");
    shellsym_output!("│{version:>100} │");
    shellsym_output!("╰─────────────────────────────────────────────────────────────────────────────────────────────────────╯");
    shellsym_output!("");
}

/// Command-line arguments of ShellSym.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the YAML input configuration.
    #[arg(short, long)]
    pub config: PathBuf,

    /// Name of the output file (without extension). The report is written to the console if not
    /// given.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Increases the verbosity of diagnostics. May be given several times.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Maps a number of `-v` flags to a diagnostic level.
pub fn verbosity_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Builds the logging configuration of the ShellSym binary.
///
/// The report on the `shellsym-output` target goes to `<output>.out` if an output name is given,
/// or to the standard output otherwise. All other diagnostics go to the standard error.
///
/// # Errors
///
/// Errors if the output file cannot be created.
pub fn log_config(output: Option<&Path>, verbose: u8) -> Result<Config, anyhow::Error> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{h({l:<5})} {t} - {m}{n}")))
        .build();
    let report: Box<dyn Append> = if let Some(name) = output {
        let mut path = name.to_path_buf();
        path.set_extension("out");
        Box::new(
            FileAppender::builder()
                .encoder(Box::new(PatternEncoder::new("{m}{n}")))
                .append(false)
                .build(path)?,
        )
    } else {
        Box::new(
            ConsoleAppender::builder()
                .target(Target::Stdout)
                .encoder(Box::new(PatternEncoder::new("{m}{n}")))
                .build(),
        )
    };

    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .appender(Appender::builder().build("report", report))
        .logger(
            Logger::builder()
                .appender("report")
                .additive(false)
                .build("shellsym-output", LevelFilter::Info),
        )
        .build(Root::builder().appender("stderr").build(verbosity_level(verbose)))
        .map_err(|err| format_err!(err))
}
