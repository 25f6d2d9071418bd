/// qteleport Criterion Benchmark Suite
///
/// Covers:
///   - Single-qubit gate throughput (H repeated on n-qubit register)
///   - Two-qubit gate throughput (CNOT chain)
///   - Single-shot protocol execution
///   - Full shot batches, ideal and noisy
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_complex::Complex64;
use qteleport::core::{
    execute_shot, run, Gate, GateKind, NoiseChannel, SimulationConfig, StateVector,
};
use qteleport::protocol::teleportation_circuit;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn sample_psi() -> [Complex64; 2] {
    [Complex64::new(0.6, 0.0), Complex64::new(0.0, 0.8)]
}

// ── Gate throughput ───────────────────────────────────────────────────────

fn bench_single_qubit_gates(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_qubit_gates");
    for n in [4usize, 8, 12, 16] {
        group.bench_with_input(BenchmarkId::new("H", n), &n, |b, &n| {
            b.iter(|| {
                let mut state = StateVector::new(n);
                for q in 0..n {
                    Gate::H { qubit: black_box(q) }.apply(&mut state).unwrap();
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("X", n), &n, |b, &n| {
            b.iter(|| {
                let mut state = StateVector::new(n);
                for q in 0..n {
                    Gate::X { qubit: black_box(q) }.apply(&mut state).unwrap();
                }
            });
        });
    }
    group.finish();
}

fn bench_cnot_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("cnot_chain");
    for n in [4usize, 8, 12, 16] {
        group.bench_with_input(BenchmarkId::new("CNOT", n), &n, |b, &n| {
            b.iter(|| {
                let mut state = StateVector::new(n);
                Gate::H { qubit: 0 }.apply(&mut state).unwrap();
                for q in 1..n {
                    Gate::Cnot { control: black_box(0), target: black_box(q) }
                        .apply(&mut state)
                        .unwrap();
                }
            });
        });
    }
    group.finish();
}

// ── Protocol execution ────────────────────────────────────────────────────

fn bench_single_shot(c: &mut Criterion) {
    let circuit = teleportation_circuit(sample_psi()).unwrap();
    c.bench_function("teleport_single_shot", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        b.iter(|| execute_shot(black_box(&circuit), None, &mut rng).unwrap())
    });
}

fn bench_shot_batches(c: &mut Criterion) {
    let circuit = teleportation_circuit(sample_psi()).unwrap();
    let mut group = c.benchmark_group("teleport_shots");
    for shots in [64usize, 256, 1024] {
        group.bench_with_input(BenchmarkId::new("ideal", shots), &shots, |b, &shots| {
            let config = SimulationConfig::new(shots).with_seed(42);
            b.iter(|| run(black_box(&circuit), &config).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("noisy_5pct", shots), &shots, |b, &shots| {
            let noise =
                NoiseChannel::depolarizing(0.05, [GateKind::H, GateKind::Cnot]).unwrap();
            let config = SimulationConfig::new(shots).with_seed(42).with_noise(noise);
            b.iter(|| run(black_box(&circuit), &config).unwrap());
        });
    }
    group.finish();
}

// ── Groups ────────────────────────────────────────────────────────────────

criterion_group!(gate_benches, bench_single_qubit_gates, bench_cnot_chain);
criterion_group!(protocol_benches, bench_single_shot, bench_shot_batches);

criterion_main!(gate_benches, protocol_benches);
