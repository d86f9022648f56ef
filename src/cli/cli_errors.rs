use crate::Kinetics::mech_errors::MechanismError;
use crate::PESplot::plot_errors::PlotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Mechanism(#[from] MechanismError),
    #[error(transparent)]
    Plot(#[from] PlotError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to set up logging: {0}")]
    Logger(String),
}
