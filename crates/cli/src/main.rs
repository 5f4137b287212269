mod args;
mod commands;
pub mod defaults;
mod printing;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use args::{InitArgs, RunArgs, SimulateArgs};
use commands::{info, init, run, simulate};

/// Popsplit: replicated coalescent simulations of a two-population split
///
/// Two derived populations N1 and N2 descend from an ancestral population
/// ANC. Each replicate simulates their genealogy, throws mutations on it and
/// reports diversity, Tajima's D, the allele frequency spectrum and Fst.
#[derive(Parser, Debug)]
#[command(name = "popsplit")]
#[command(author, version, about = "Parameter sweeps over population split scenarios", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel replicates
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    /// Log filter (e.g. "info", "popsplit_sweep=debug")
    #[arg(long, global = true, default_value = defaults::LOG_FILTER)]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a sweep configuration file.
    ///
    /// One parameter combination per split time; every other parameter is
    /// shared. Nothing is simulated yet.
    Init(Box<InitArgs>),

    /// Show a sweep configuration.
    Info {
        /// Sweep configuration file
        #[arg(short, long, default_value = defaults::CONFIG_FILE)]
        config: PathBuf,
    },

    /// Simulate a single replicate and print its statistics.
    Simulate(Box<SimulateArgs>),

    /// Run every replicate of a sweep and write one row per replicate.
    Run(RunArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cli.log))
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    match cli.command {
        Commands::Init(args) => init::init_sweep(&args)?,
        Commands::Info { config } => info::show_info(&config)?,
        Commands::Simulate(args) => simulate::simulate_once(&args)?,
        Commands::Run(args) => run::run_sweep(&args)?,
    }

    Ok(())
}
