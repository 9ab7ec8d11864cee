use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use masspool::chem::{MassCalculator, SmilesCalculator};
use masspool::plate::PlateFormat;
use masspool::pooling::{AssignmentPolicy, CompoundRecord, PoolingConfig, PoolingEngine};

/// Spread-out synthetic library masses between 150 and 900 Da
fn synthetic_records(count: usize) -> Vec<CompoundRecord> {
    (0..count)
        .map(|i| {
            let jitter = ((i as f64) * 0.618_033_988_75).fract();
            let mass = 150.0 + 750.0 * jitter + (i % 7) as f64 * 0.003;
            CompoundRecord::new(i, format!("CPD{:06}", i), mass)
        })
        .collect()
}

/// Benchmark sort and striping for growing libraries
fn bench_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool");

    for count in [1_000, 10_000, 50_000] {
        group.throughput(Throughput::Elements(count as u64));
        let records = synthetic_records(count);
        let config = PoolingConfig::with_compounds_per_well(10)
            .plate_format(PlateFormat::Wells1536)
            .resolution(0.005);

        group.bench_with_input(BenchmarkId::from_parameter(count), &records, |b, records| {
            let engine = PoolingEngine::new(config.clone());
            b.iter(|| {
                let plan = engine.pool(black_box(records.clone())).unwrap();
                black_box(plan);
            });
        });
    }

    group.finish();
}

/// Benchmark pairwise collision scanning at different pool sizes
fn bench_collision_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("collision_scan");
    let records = synthetic_records(20_000);

    for per_well in [5, 20, 80] {
        for policy in [AssignmentPolicy::RoundRobin, AssignmentPolicy::Serpentine] {
            let config = PoolingConfig::with_compounds_per_well(per_well)
                .plate_format(PlateFormat::Wells1536)
                .policy(policy);
            let plan = PoolingEngine::new(config).pool(records.clone()).unwrap();

            group.bench_function(format!("{}per_well_{}", per_well, policy), |b| {
                b.iter(|| {
                    let report = plan.collision_report(black_box(0.005));
                    black_box(report.total_clashes);
                });
            });
        }
    }

    group.finish();
}

/// Benchmark SMILES interpretation for a small drug-like set
fn bench_smiles(c: &mut Criterion) {
    let structures = [
        "CN1C=NC2=C1C(=O)N(C(=O)N2C)C",
        "CC(=O)Oc1ccccc1C(=O)O",
        "CC(C)Cc1ccc(cc1)[C@@H](C)C(=O)O",
        "O=C(O)c1ccccc1O",
        "c1ccc2c(c1)ccc1ccccc12",
        "C[N+](C)(C)CCO.[Cl-]",
    ];

    c.bench_function("smiles_exact_mass", |b| {
        b.iter(|| {
            for smiles in structures {
                black_box(SmilesCalculator.calculate(black_box(smiles)).unwrap());
            }
        });
    });
}

criterion_group!(benches, bench_pool, bench_collision_scan, bench_smiles);
criterion_main!(benches);
