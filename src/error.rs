//! Error types for the solver.
//!
//! Construction of bounds, particles and settings is validated up front so
//! that `Solver::update` itself never fails.

use std::fmt;

/// Errors raised while configuring the simulation.
#[derive(Debug)]
pub enum SimError {
    /// A bound, radius, position or setting is out of range.
    InvalidConfiguration(String),
    /// Failed to read or write a settings file.
    Io(std::io::Error),
    /// Settings JSON could not be parsed or produced.
    Parse(serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(msg.into())
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            SimError::Io(e) => write!(f, "Failed to access settings file: {}", e),
            SimError::Parse(e) => write!(f, "Failed to parse settings: {}", e),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io(e) => Some(e),
            SimError::Parse(e) => Some(e),
            SimError::InvalidConfiguration(_) => None,
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Parse(e)
    }
}
