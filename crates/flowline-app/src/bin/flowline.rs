//! Terminal frontend for flowline.

use std::{io, process::ExitCode};

use clap::Parser as _;
use flowline_app::cli::{self, Cli};

fn main() -> ExitCode {
    better_panic::install();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(err) = cli::run(&cli, &mut io::stdout().lock()) {
        log::debug!("{err:?}");
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
