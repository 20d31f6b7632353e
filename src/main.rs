extern crate anyhow;
extern crate clap;
#[macro_use]
extern crate huffdict;
extern crate thiserror;

if_tracing! {
    use tracing_subscriber::{EnvFilter, fmt};
}

use crate::cli::Cli;
use clap::Parser;
use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    if_tracing! {
        let subscriber = fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }

    let cli = Cli::parse();
    match cli::execute_command(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
