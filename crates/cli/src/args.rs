use clap::Args;
use popsplit_sweep::SplitParameters;
use std::path::PathBuf;

use crate::defaults;

/// Demographic and genomic parameters shared by `init` and `simulate`.
#[derive(Args, Debug, Clone)]
pub struct ScenarioArgs {
    /// Size of derived population N1
    #[arg(long, default_value_t = defaults::N1_SIZE)]
    pub n1_size: f64,

    /// Size of derived population N2
    #[arg(long, default_value_t = defaults::N2_SIZE)]
    pub n2_size: f64,

    /// Size of the ancestral population ANC
    #[arg(long, default_value_t = defaults::ANCESTRAL_SIZE)]
    pub ancestral_size: f64,

    /// Sequence length (bp)
    #[arg(short = 'L', long, default_value_t = defaults::SEQUENCE_LENGTH)]
    pub sequence_length: u64,

    /// Recombination rate (per bp per generation)
    #[arg(long, default_value_t = defaults::RECOMBINATION_RATE)]
    pub recombination_rate: f64,

    /// Mutation rate (per bp per generation)
    #[arg(long, default_value_t = defaults::MUTATION_RATE)]
    pub mutation_rate: f64,

    /// Individuals sampled from N1
    #[arg(long, default_value_t = defaults::N1_SAMPLES)]
    pub n1_samples: usize,

    /// Individuals sampled from N2
    #[arg(long, default_value_t = defaults::N2_SAMPLES)]
    pub n2_samples: usize,
}

impl ScenarioArgs {
    pub fn to_parameters(&self, split_time: f64) -> SplitParameters {
        SplitParameters {
            n1_size: self.n1_size,
            n2_size: self.n2_size,
            ancestral_size: self.ancestral_size,
            split_time,
            sequence_length: self.sequence_length,
            recombination_rate: self.recombination_rate,
            mutation_rate: self.mutation_rate,
            n1_samples: self.n1_samples,
            n2_samples: self.n2_samples,
        }
    }
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Output configuration path
    #[arg(short, long, default_value = defaults::CONFIG_FILE)]
    pub output: PathBuf,

    /// Split times to sweep (generations, comma-separated)
    #[arg(long, value_delimiter = ',', default_values_t = defaults::SPLIT_TIMES)]
    pub split_times: Vec<f64>,

    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Replicates per split time
    #[arg(short = 'r', long, default_value_t = defaults::REPLICATES)]
    pub replicates: usize,

    /// Base seed. Without it every replicate draws a fresh seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run replicates in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Fold the allele frequency spectrum
    #[arg(long)]
    pub unpolarised: bool,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Split time (generations before present)
    #[arg(short = 'T', long, default_value_t = defaults::SPLIT_TIME)]
    pub split_time: f64,

    /// Random seed for ancestry and mutations
    #[arg(long, default_value_t = defaults::SEED)]
    pub seed: u64,

    /// Fold the allele frequency spectrum
    #[arg(long)]
    pub unpolarised: bool,

    /// Print the statistics as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Sweep configuration file
    #[arg(short, long, default_value = defaults::CONFIG_FILE)]
    pub config: PathBuf,

    /// Results file
    #[arg(short, long, default_value = defaults::RESULTS_FILE)]
    pub output: PathBuf,

    /// Output format (csv, json)
    #[arg(short, long, default_value = "csv")]
    pub format: String,

    /// Override the base seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override the number of replicates
    #[arg(short = 'r', long)]
    pub replicates: Option<usize>,

    /// Run replicates in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,
}
