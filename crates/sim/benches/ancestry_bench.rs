use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use popsplit_sim::evolution::{MutationConfig, sim_mutations};
use popsplit_sim::simulation::{AncestryConfig, Demography, SampleSet, sim_ancestry};

fn demography() -> Demography {
    Demography::isolated_split([("N1", 90_000.0), ("N2", 3_000.0)], ("ANC", 7e6), 6000.0).unwrap()
}

fn bench_sim_ancestry(c: &mut Criterion) {
    let mut group = c.benchmark_group("sim_ancestry");
    let demography = demography();

    for samples in [10usize, 50] {
        group.throughput(Throughput::Elements((samples * 4) as u64));
        group.bench_with_input(BenchmarkId::new("samples_per_pop", samples), &samples, |b, &n| {
            let config = AncestryConfig::new(vec![SampleSet::new("N1", n), SampleSet::new("N2", n)], 1_000)
                .recombination_rate(3.5e-9)
                .seed(1234);
            b.iter(|| black_box(sim_ancestry(&demography, &config).unwrap()))
        });
    }

    group.finish();
}

fn bench_sim_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("sim_mutations");
    let config = AncestryConfig::new(vec![SampleSet::new("N1", 50), SampleSet::new("N2", 50)], 1_000)
        .recombination_rate(3.5e-9)
        .seed(1234);
    let ts = sim_ancestry(&demography(), &config).unwrap();

    group.bench_function("default_split", |b| {
        b.iter(|| black_box(sim_mutations(&ts, &MutationConfig::new(3.5e-9).seed(1234)).unwrap()))
    });
    group.bench_function("genotype_matrix", |b| {
        let mutated = sim_mutations(&ts, &MutationConfig::new(3.5e-9).seed(1234)).unwrap();
        b.iter(|| black_box(mutated.genotype_matrix()))
    });

    group.finish();
}

criterion_group!(benches, bench_sim_ancestry, bench_sim_mutations);
criterion_main!(benches);
