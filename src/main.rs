mod bench_cmd;
mod cli;
mod config;
mod convert;
mod logging;
mod plan_cmd;
mod synthetic;

use std::process;

use anyhow::Result;
use clap::Parser;
use cpa_chunked::CpaError;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(exit_code(&e));
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Plan(args) => plan_cmd::run(args),
        Command::Bench(args) => bench_cmd::run(args),
    }
}

/// 2 for rejected input (shapes, empty grids, chunk sizes, scheduler settings),
/// 1 otherwise.
fn exit_code(err: &anyhow::Error) -> i32 {
    let rejected = err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<CpaError>(),
            Some(
                CpaError::DimensionMismatch { .. }
                    | CpaError::ChunkSizeInvalid { .. }
                    | CpaError::EmptyGrid { .. }
                    | CpaError::InvalidScheduler { .. }
                    | CpaError::InvalidWorkers { .. }
            )
        )
    });
    if rejected { 2 } else { 1 }
}
