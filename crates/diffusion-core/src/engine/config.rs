use super::error::EngineError;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// A strictly positive, finite temperature.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Temperature(f64);

impl Temperature {
    pub fn new(value: f64) -> Result<Self, EngineError> {
        if value == 0.0 {
            return Err(EngineError::ZeroTemperature);
        }
        if !value.is_finite() || value < 0.0 {
            return Err(EngineError::InvalidTemperature(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Temperature {
    type Error = EngineError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub temperature: f64,
    pub iteration_limit: usize,
    pub seed: Option<u64>,
}

#[derive(Default)]
pub struct SimulationConfigBuilder {
    temperature: Option<f64>,
    iteration_limit: Option<usize>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
    pub fn iteration_limit(mut self, iterations: usize) -> Self {
        self.iteration_limit = Some(iterations);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        Ok(SimulationConfig {
            temperature: self
                .temperature
                .ok_or(ConfigError::MissingParameter("temperature"))?,
            iteration_limit: self
                .iteration_limit
                .ok_or(ConfigError::MissingParameter("iteration_limit"))?,
            seed: self.seed,
        })
    }
}
