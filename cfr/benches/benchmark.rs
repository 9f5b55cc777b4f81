use cfr::{
    config::{
        CfrConfig,
        DealMode,
        RegretMatchingConfig,
    },
    games::kuhn::Kuhn,
    solvers::{
        cfr::Trainer,
        regret_matching,
    },
};
use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    Criterion,
};

fn regret_matching_train_benchmark(c: &mut Criterion) {
    let config = RegretMatchingConfig::new(10_000, &[0.8, 0.1, 0.1], 42).unwrap();
    c.bench_function("regret_matching::train 10_000", |b| {
        b.iter(|| regret_matching::Trainer::new(black_box(&config)).unwrap().train())
    });
}

fn cfr_kuhn_train_benchmark(c: &mut Criterion) {
    for players in [2, 3] {
        let config = CfrConfig::new(10, DealMode::Enumerate, 42).unwrap();
        let mut trainer = Trainer::new(Kuhn::new(players).unwrap(), &config);
        c.bench_function(&format!("cfr::train_one_epoch<kuhn{}>", players), |b| {
            b.iter(|| black_box(trainer.train_one_epoch()));
        });
    }
}

criterion_group!(cfr_benches, regret_matching_train_benchmark, cfr_kuhn_train_benchmark);
criterion_main!(cfr_benches);
