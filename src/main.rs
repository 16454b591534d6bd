use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};
use rust_ising::io::{log_results, setup_logging, ScanReport, SimulationConfig};
use rust_ising::TemperatureScan;

/// 2D Ising model temperature scan with Metropolis Monte Carlo
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yml")]
    config: String,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the lattice width
    #[arg(long)]
    lattice_size: Option<usize>,

    /// Override the Metropolis moves per site at each temperature
    #[arg(long)]
    moves_per_site: Option<usize>,

    /// Write configuration and results to this YAML file
    #[arg(short, long)]
    output: Option<String>,

    /// Write the log to this file instead of stdout
    #[arg(long)]
    log_file: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    setup_logging(args.log_file.as_deref())?;

    info!("Reading configuration from: {}", args.config);
    let mut config = SimulationConfig::from_file(&args.config)
        .wrap_err_with(|| format!("Unable to load configuration file: {}", args.config))?;

    if let Some(seed) = args.seed {
        info!("Overriding seed with: {}", seed);
        config.seed = Some(seed);
    }
    if let Some(size) = args.lattice_size {
        info!("Overriding lattice_size with: {}", size);
        config.lattice_size = size;
    }
    if let Some(moves) = args.moves_per_site {
        info!("Overriding moves_per_site with: {}", moves);
        config.moves_per_site = moves;
    }
    config.validate().wrap_err("Invalid configuration")?;

    info!(
        "Lattice {}x{}, field B = {}, {} moves per temperature, seed {:?}",
        config.lattice_size,
        config.lattice_size,
        config.field_strength,
        config.moves_per_temperature(),
        config.seed
    );
    if config.field_strength != 0.0 {
        warn!("field_strength is recorded but does not enter the spin energy");
    }

    let temperatures = config.temperature_values()?;
    let mut scan = TemperatureScan::from_config(&config, config.rng())?;
    let results = scan.run(&temperatures).wrap_err("Temperature scan failed")?;
    log_results(&results);

    if let Some(path) = args.output {
        ScanReport::new(config, results)
            .to_file(&path)
            .wrap_err_with(|| format!("Unable to write results to: {}", path))?;
        info!("Results written to: {}", path);
    }

    Ok(())
}
