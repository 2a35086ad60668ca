use std::process::ExitCode;

use clap::Parser;
use xrectsel::{cli::Cli, core::app};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match app::run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("xrectsel: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
