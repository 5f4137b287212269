use anyhow::{Context, Result};
use popsplit_sweep::{StatisticsConfig, SweepConfig};

use crate::args::InitArgs;
use crate::printing::print_sweep_config;

pub fn init_sweep(args: &InitArgs) -> Result<()> {
    println!("🧬 Popsplit - Population Split Sweeps");
    println!("============================================\n");

    let config = build_config(args);
    config.validate().context("Invalid sweep configuration")?;

    print_sweep_config(&config);

    config
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("✓ Sweep configuration written to {}", args.output.display());
    println!("\nNext: popsplit run -c {}", args.output.display());
    Ok(())
}

pub fn build_config(args: &InitArgs) -> SweepConfig {
    let base = args.scenario.to_parameters(0.0);
    SweepConfig::split_time_sweep(&base, &args.split_times, args.replicates)
        .maybe_base_seed(args.seed)
        .parallel(args.parallel)
        .statistics(StatisticsConfig {
            polarised: !args.unpolarised,
            ..StatisticsConfig::default()
        })
}
