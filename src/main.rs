use num_complex::Complex64;
use qteleport::core::{NoiseChannel, SimulationConfig};
use qteleport::protocol::{run_simulation, teleportation_circuit};

const SHOTS: usize = 1024;

fn main() {
    env_logger::init();
    print_banner();

    // Sample payload: 0.6|0⟩ + 0.8i|1⟩
    let psi = [Complex64::new(0.6, 0.0), Complex64::new(0.0, 0.8)];

    let circuit = match teleportation_circuit(psi) {
        Ok(qc) => qc,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    println!("{circuit}");

    println!("━━━ Ideal simulation ({SHOTS} shots) ━━━━━━━━━━━━━");
    let config = SimulationConfig::new(SHOTS);
    report(&circuit, &config);

    println!("━━━ Noisy simulation (5% depolarizing on h, cx) ━━");
    let noise = match NoiseChannel::depolarizing_named(0.05, &["h", "cx"]) {
        Ok(n) => n,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let config = SimulationConfig::new(SHOTS).with_noise(noise);
    report(&circuit, &config);
}

fn report(circuit: &qteleport::core::Circuit, config: &SimulationConfig) {
    match run_simulation(circuit, config) {
        Ok((prepared, counts)) => {
            println!(
                "Original state to teleport: [{:.4}{:+.4}i, {:.4}{:+.4}i]",
                prepared[0].re, prepared[0].im, prepared[1].re, prepared[1].im
            );
            println!("Measurement counts (c1 c0):");
            for (key, n) in counts.sorted() {
                println!("  {key}  {n:>5}  ({:.1}%)", 100.0 * n as f64 / config.shots as f64);
            }
            println!();
        }
        Err(e) => {
            eprintln!("Simulation error: {e}");
            std::process::exit(1);
        }
    }
}

fn print_banner() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║          qteleport v0.1.0                    ║");
    println!("║  Quantum Teleportation Statevector Engine    ║");
    println!("╚══════════════════════════════════════════════╝");
    println!();
}
