//! Metropolis scan of a 2D Ising lattice across the critical temperature
//!
//! Run with: cargo run --release --example temperature_scan

use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_ising::analysis::{critical_temperature, spontaneous_magnetization};
use rust_ising::TemperatureScan;

fn main() -> rust_ising::Result<()> {
    // Simulation parameters
    let size = 16;
    let moves = 500 * size * size;  // moves per temperature, for burn-in and again for sampling
    let seed = 2024;
    let temperatures: Vec<f64> = (0..17).map(|k| 1.5 + 0.1 * k as f64).collect();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║     2D Ising Model - Metropolis Temperature Scan             ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!("Lattice: {}x{}, moves per temperature: {}, seed: {}", size, size, moves, seed);
    println!("Exact T_c = {:.4}", critical_temperature());
    println!();

    let mut scan = TemperatureScan::new(size, moves, StdRng::seed_from_u64(seed))?;
    let results = scan.run(&temperatures)?;

    println!("{:>6} {:>10} {:>10} {:>10} {:>10}", "T", "E", "|M|", "M_exact", "C_v");
    for obs in results.iter() {
        println!(
            "{:>6.2} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            obs.temperature,
            obs.energy,
            obs.magnetization,
            spontaneous_magnetization(obs.temperature),
            obs.specific_heat
        );
    }

    let peak = results
        .iter()
        .max_by(|a, b| a.specific_heat.total_cmp(&b.specific_heat));
    if let Some(peak) = peak {
        println!();
        println!("Specific heat peaks at T = {:.2}", peak.temperature);
    }
    Ok(())
}
