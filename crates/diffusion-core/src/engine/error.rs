use super::config::ConfigError;
use crate::core::density::DensityError;
use thiserror::Error;

/// Broad classes of failure, independent of the specific variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A configuration the algorithm deliberately does not handle.
    UnsupportedConfiguration,
    /// A parameter outside its valid range.
    InvalidRange,
    /// A parameter of the wrong element type or shape.
    InvalidType,
    /// A required parameter was never supplied.
    MissingParameter,
    /// The engine was driven in a way its lifecycle does not allow.
    Misuse,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid density: {source}")]
    Density {
        #[from]
        source: DensityError,
    },

    #[error("Zero temperature is not implemented: the zero-temperature limit is a different algorithm")]
    ZeroTemperature,

    #[error("Invalid temperature {0}: temperature must be a positive, finite number")]
    InvalidTemperature(f64),

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Iteration budget exhausted after {iterations} step(s); call `run` to finish")]
    BudgetExhausted { iterations: usize },

    #[error("Simulation has already finished; construct a new one to continue")]
    Finished,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::Density { source } => match source {
                DensityError::NotInteger { .. } | DensityError::NotOneDimensional { .. } => {
                    ErrorKind::InvalidType
                }
                DensityError::TooShort { .. }
                | DensityError::Negative { .. }
                | DensityError::Empty
                | DensityError::TooManyParticles => ErrorKind::InvalidRange,
            },
            EngineError::ZeroTemperature => ErrorKind::UnsupportedConfiguration,
            EngineError::InvalidTemperature(_) => ErrorKind::InvalidRange,
            EngineError::Config { .. } => ErrorKind::MissingParameter,
            EngineError::BudgetExhausted { .. } | EngineError::Finished => ErrorKind::Misuse,
        }
    }
}
