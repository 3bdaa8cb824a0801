use coherence_rs::{DelaySchedule, Experiment, QubitLayout};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_sequence_generation(c: &mut Criterion) {
    let schedule = DelaySchedule::new((0..100).map(|i| i * 10).collect(), 0.05)
        .expect("the schedule is sorted and the gate time positive");
    let layout =
        QubitLayout::from_qubits((0..8).collect()).expect("the qubits are distinct and non-empty");

    for experiment in [
        Experiment::T1,
        Experiment::T2,
        Experiment::T2Star { oscillations: 4 },
    ] {
        c.bench_function(&experiment.kind().to_string(), |b| {
            b.iter(|| black_box(experiment.build(&schedule, &layout)))
        });
    }
}

criterion_group!(benches, benchmark_sequence_generation);
criterion_main!(benches);
