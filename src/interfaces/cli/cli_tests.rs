use clap::Parser;
use log::LevelFilter;

use crate::interfaces::cli::{log_config, verbosity_level, Cli};

#[test]
fn test_interfaces_cli_arguments() {
    let cli = Cli::parse_from(["shellsym", "-c", "input.yml", "-o", "water", "-vv"]);
    assert_eq!(cli.config.to_string_lossy(), "input.yml");
    assert_eq!(cli.output.unwrap().to_string_lossy(), "water");
    assert_eq!(cli.verbose, 2);

    assert!(Cli::try_parse_from(["shellsym"]).is_err());
}

#[test]
fn test_interfaces_cli_logging() {
    assert_eq!(verbosity_level(0), LevelFilter::Warn);
    assert_eq!(verbosity_level(2), LevelFilter::Debug);
    assert_eq!(verbosity_level(7), LevelFilter::Trace);

    let config = log_config(None, 1).unwrap();
    assert_eq!(config.root().level(), LevelFilter::Info);
    assert_eq!(config.appenders().len(), 2);
    assert_eq!(config.loggers()[0].name(), "shellsym-output");
}
