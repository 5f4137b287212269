use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use popsplit_sweep::{
    summarize, write_results, CoalescentSimulator, OutputFormat, SweepConfig, SweepRunner,
};
use tracing::info;

use crate::args::RunArgs;
use crate::printing::{print_summary, print_sweep_config};

pub fn run_sweep(args: &RunArgs) -> Result<()> {
    println!("🧬 Popsplit - Running Sweep");
    println!("============================================\n");

    let format = args
        .format
        .parse::<OutputFormat>()
        .map_err(anyhow::Error::msg)?;

    let mut config = SweepConfig::load(&args.config).with_context(|| {
        format!(
            "Failed to load {}. Did you run 'popsplit init' first?",
            args.config.display()
        )
    })?;
    if let Some(seed) = args.seed {
        config.base_seed = Some(seed);
    }
    if let Some(replicates) = args.replicates {
        config.replicates = replicates;
    }
    if args.parallel {
        config.parallel = true;
    }
    config.validate().context("Invalid sweep configuration")?;

    print_sweep_config(&config);
    println!("Running {} replicates...", config.num_rows());

    let pb = if args.progress {
        let pb = ProgressBar::new(config.num_rows() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {per_sec}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let simulator = CoalescentSimulator::new();
    let mut runner = SweepRunner::new(&config, &simulator);
    if let Some(pb) = &pb {
        let pb = pb.clone();
        runner = runner.on_replicate(move |_| pb.inc(1));
    }
    let rows = runner.run().context("Sweep failed")?;

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    write_results(&args.output, &rows, format)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), rows = rows.len(), ?format, "results written");

    print_summary(&summarize(&rows));
    println!("\n✓ Sweep complete!");
    println!("  Rows written: {}", rows.len());
    println!("  Output: {}", args.output.display());
    Ok(())
}
