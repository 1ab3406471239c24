use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Pairwise coefficient of predictive ability between gridded fields.
#[derive(Parser)]
#[command(
    name = "cpa",
    version,
    about = "Pairwise coefficient of predictive ability between gridded fields"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Validate a configuration and print the chunk plan without computing.
    Plan(PlanArgs),
    /// Run the chunked computation on synthetic fields and report timings.
    Bench(BenchArgs),
}

/// Arguments for the `plan` subcommand.
#[derive(clap::Args)]
pub struct PlanArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "cpa.toml")]
    pub config: PathBuf,
}

/// Arguments for the `bench` subcommand.
#[derive(clap::Args)]
pub struct BenchArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "cpa.toml")]
    pub config: PathBuf,

    /// Override the scheduler from config (processes, threads, synchronous).
    #[arg(long)]
    pub scheduler: Option<String>,

    /// Override the RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Also run an unchunked synchronous reference and compare results.
    #[arg(long)]
    pub check: bool,

    /// Write the JSON report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
