use popsplit_sweep::{CombinationSummary, SplitParameters, StatisticBundle, SweepConfig};

pub fn print_parameters(params: &SplitParameters) {
    println!("\n👥 Demography");
    println!("  • N1 Size: {} [--n1-size]", params.n1_size);
    println!("  • N2 Size: {} [--n2-size]", params.n2_size);
    println!("  • Ancestral Size: {} [--ancestral-size]", params.ancestral_size);
    println!("  • Split Time: {} generations", params.split_time);

    println!("\n🧬 Genome");
    println!("  • Sequence Length: {} bp [-L, --sequence-length]", params.sequence_length);
    println!(
        "  • Recombination Rate: {:.2e} /bp/gen [--recombination-rate]",
        params.recombination_rate
    );
    println!("  • Mutation Rate: {:.2e} /bp/gen [--mutation-rate]", params.mutation_rate);

    println!("\n🧪 Sampling");
    println!(
        "  • Samples: {} from N1, {} from N2 (diploid)",
        params.n1_samples, params.n2_samples
    );
}

pub fn print_sweep_config(config: &SweepConfig) {
    println!("\n📋 Sweep Configuration");
    println!("  • Combinations: {}", config.combinations.len());
    println!("  • Replicates: {} [-r, --replicates]", config.replicates);
    match config.base_seed {
        Some(seed) => println!("  • Base Seed: {seed} [--seed]"),
        None => println!("  • Base Seed: Random [--seed]"),
    }
    println!("  • Parallel: {}", config.parallel);
    println!(
        "  • Fst Populations: {} vs {}",
        config.statistics.fst_populations[0], config.statistics.fst_populations[1]
    );
    println!(
        "  • AFS: {}",
        if config.statistics.polarised {
            "polarised"
        } else {
            "unpolarised"
        }
    );

    if let Some(first) = config.combinations.first() {
        print_parameters(first);
    }
    let times: Vec<String> = config
        .combinations
        .iter()
        .map(|c| c.split_time.to_string())
        .collect();
    println!("\n⏱  Split Times: {}", times.join(", "));
    println!("  • Total Rows: {}", config.num_rows());
    println!();
}

pub fn print_statistics(stats: &StatisticBundle) {
    println!("\n📊 Statistics");
    println!("  • Diversity: {:.6e}", stats.diversity);
    println!("  • Tajima's D: {:.4}", stats.tajimas_d);
    println!("  • Fst (N1 vs N2): {:.4}", stats.fst);
    let segregating: f64 = stats.allele_frequency_spectrum.iter().sum();
    println!(
        "  • AFS: {} bins, {} alleles",
        stats.allele_frequency_spectrum.len(),
        segregating
    );
}

pub fn print_summary(summaries: &[CombinationSummary]) {
    println!("\n📈 Summary per combination");
    println!("{}", "=".repeat(72));
    println!(
        "{:>10} {:>5} {:>14} {:>10} {:>10} {:>10}",
        "T_split", "reps", "diversity", "±sd", "Tajima", "Fst"
    );
    for s in summaries {
        println!(
            "{:>10} {:>5} {:>14.6e} {:>10.2e} {:>10.4} {:>10.4}",
            s.parameters.split_time,
            s.replicates,
            s.diversity.mean,
            s.diversity.std_dev,
            s.tajimas_d.mean,
            s.fst.mean
        );
    }
}
