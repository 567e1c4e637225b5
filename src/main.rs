use std::process;

use anyhow::{self, Context};
use clap::Parser;

use shellsym::interfaces::cli::{log_config, log_heading, Cli};
use shellsym::interfaces::input::Input;
use shellsym::interfaces::InputHandle;
use shellsym::io::read_shellsym_yaml;

fn run(cli: &Cli) -> Result<(), anyhow::Error> {
    let config = log_config(cli.output.as_deref(), cli.verbose)?;
    log4rs::init_config(config).with_context(|| "Unable to initialise the loggers")?;
    log_heading();
    let input = read_shellsym_yaml::<Input, _>(&cli.config).with_context(|| {
        format!(
            "Unable to read the input configuration `{}`",
            cli.config.display()
        )
    })?;
    input.handle()
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}
