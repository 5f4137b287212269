use anyhow::{Context, Result};
use popsplit_sweep::{run_replicate, CoalescentSimulator, StatisticsConfig};

use crate::args::SimulateArgs;
use crate::printing::{print_parameters, print_statistics};

pub fn simulate_once(args: &SimulateArgs) -> Result<()> {
    let params = args.scenario.to_parameters(args.split_time);
    let statistics = StatisticsConfig {
        polarised: !args.unpolarised,
        ..StatisticsConfig::default()
    };

    let bundle = run_replicate(&CoalescentSimulator::new(), &params, args.seed, &statistics)
        .context("Simulation failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
        return Ok(());
    }

    println!("🧬 Popsplit - Single Replicate");
    println!("============================================");
    print_parameters(&params);
    println!("  • Seed: {} [--seed]", args.seed);
    print_statistics(&bundle);
    println!("\n✓ Simulation complete!");
    Ok(())
}
