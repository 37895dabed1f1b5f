use super::density::{DensityError, DensityState, RawEntry};
use serde::Deserialize;

const DEFAULT_SINE_LENGTH: usize = 100;
const DEFAULT_SINE_AMPLITUDE: f64 = 100.0;
const DEFAULT_SINE_START: f64 = 0.1;
const DEFAULT_SINE_END: f64 = 3.0;

/// Recipes for building an initial [`DensityState`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum DensityProfile {
    /// Caller-supplied counts, validated exactly like [`DensityState::from_raw`].
    Explicit { values: Vec<RawEntry> },
    /// A half-wave bump: `trunc(amplitude * sin(x))` sampled at `length` evenly spaced
    /// points from `start` to `end` inclusive. Negative samples are clamped to zero.
    Sine {
        #[serde(default = "default_sine_length")]
        length: usize,
        #[serde(default = "default_sine_amplitude")]
        amplitude: f64,
        #[serde(default = "default_sine_start")]
        start: f64,
        #[serde(default = "default_sine_end")]
        end: f64,
    },
    /// The same number of particles on every site.
    Uniform { length: usize, count: u64 },
}

fn default_sine_length() -> usize {
    DEFAULT_SINE_LENGTH
}
fn default_sine_amplitude() -> f64 {
    DEFAULT_SINE_AMPLITUDE
}
fn default_sine_start() -> f64 {
    DEFAULT_SINE_START
}
fn default_sine_end() -> f64 {
    DEFAULT_SINE_END
}

impl Default for DensityProfile {
    fn default() -> Self {
        DensityProfile::Sine {
            length: DEFAULT_SINE_LENGTH,
            amplitude: DEFAULT_SINE_AMPLITUDE,
            start: DEFAULT_SINE_START,
            end: DEFAULT_SINE_END,
        }
    }
}

impl DensityProfile {
    pub fn build(&self) -> Result<DensityState, DensityError> {
        match self {
            DensityProfile::Explicit { values } => DensityState::from_raw(values),
            DensityProfile::Sine {
                length,
                amplitude,
                start,
                end,
            } => DensityState::new(sine_counts(*length, *amplitude, *start, *end)),
            DensityProfile::Uniform { length, count } => {
                DensityState::new(vec![*count; *length])
            }
        }
    }
}

fn sine_counts(length: usize, amplitude: f64, start: f64, end: f64) -> Vec<u64> {
    let step = if length > 1 {
        (end - start) / (length - 1) as f64
    } else {
        0.0
    };

    (0..length)
        .map(|i| {
            let x = start + step * i as f64;
            let sample = (amplitude * x.sin()).trunc();
            if sample > 0.0 { sample as u64 } else { 0 }
        })
        .collect()
}
