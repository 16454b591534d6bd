//! Error types for Ising simulations.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IsingError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Logging setup error: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, IsingError>;

/// Temperatures enter the acceptance exponent as a divisor, so only finite positive
/// values are meaningful.
pub(crate) fn check_temperature(temperature: f64) -> Result<()> {
    if !temperature.is_finite() || temperature <= 0.0 {
        return Err(IsingError::InvalidConfiguration(format!(
            "temperature must be finite and positive, got {}",
            temperature
        )));
    }
    Ok(())
}
