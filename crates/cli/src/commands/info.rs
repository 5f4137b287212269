use anyhow::{Context, Result};
use popsplit_sweep::SweepConfig;
use std::path::Path;

use crate::printing::print_sweep_config;

pub fn show_info(config_path: &Path) -> Result<()> {
    let config = SweepConfig::load(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    println!("\n📊 Sweep Information");
    println!("{}", "=".repeat(50));
    println!("File: {}", config_path.display());
    print_sweep_config(&config);

    Ok(())
}
