use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const MIN_POSITIONS: usize = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DensityError {
    #[error("Density is too short: expected at least 2 positions, found {len}")]
    TooShort { len: usize },

    #[error("Density should contain only integers (entry {index} is not an integer)")]
    NotInteger { index: usize },

    #[error("Density should be a one-dimensional sequence (entry {index} is nested)")]
    NotOneDimensional { index: usize },

    #[error("Density should contain only non-negative integers (entry {index} is {value})")]
    Negative { index: usize, value: i64 },

    #[error("Density is empty: the total particle count is zero")]
    Empty,

    #[error("Density holds too many particles: the total does not fit in 64 bits")]
    TooManyParticles,
}

/// An untyped density entry, as read from a configuration file or other loosely-typed source.
///
/// Integers are tried first, so `3` becomes [`RawEntry::Int`] while `3.0` becomes
/// [`RawEntry::Float`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    Int(i64),
    Float(f64),
    List(Vec<RawEntry>),
}

impl RawEntry {
    fn contains_float(&self) -> bool {
        match self {
            RawEntry::Int(_) => false,
            RawEntry::Float(_) => true,
            RawEntry::List(items) => items.iter().any(RawEntry::contains_float),
        }
    }
}

impl From<i64> for RawEntry {
    fn from(value: i64) -> Self {
        RawEntry::Int(value)
    }
}

impl From<f64> for RawEntry {
    fn from(value: f64) -> Self {
        RawEntry::Float(value)
    }
}

impl<T: Into<RawEntry>> From<Vec<T>> for RawEntry {
    fn from(values: Vec<T>) -> Self {
        RawEntry::List(values.into_iter().map(Into::into).collect())
    }
}

/// Checks element type and shape of an untyped sequence, returning the flat integers.
///
/// No length or sign checks happen here; an empty sequence is trivially valid.
pub(crate) fn integers_from_raw(entries: &[RawEntry]) -> Result<Vec<i64>, DensityError> {
    if let Some(index) = entries.iter().position(RawEntry::contains_float) {
        return Err(DensityError::NotInteger { index });
    }

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            RawEntry::Int(value) => Ok(*value),
            _ => Err(DensityError::NotOneDimensional { index }),
        })
        .collect()
}

pub(crate) fn counts_from_integers(values: &[i64]) -> Result<Vec<u64>, DensityError> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            u64::try_from(value).map_err(|_| DensityError::Negative { index, value })
        })
        .collect()
}

/// The live particle-count vector of a simulation.
///
/// Every instance holds at least [`MIN_POSITIONS`] positions and at least one particle.
/// The only mutation is a whole-vector replacement that preserves both length and total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<u64>")]
pub struct DensityState {
    counts: Vec<u64>,
    total: u64,
}

impl DensityState {
    pub fn new(counts: Vec<u64>) -> Result<Self, DensityError> {
        if counts.len() < MIN_POSITIONS {
            return Err(DensityError::TooShort { len: counts.len() });
        }
        let total = counts
            .iter()
            .try_fold(0u64, |acc, &n| acc.checked_add(n))
            .ok_or(DensityError::TooManyParticles)?;
        if total == 0 {
            return Err(DensityError::Empty);
        }
        Ok(Self { counts, total })
    }

    pub fn from_raw(entries: &[RawEntry]) -> Result<Self, DensityError> {
        if entries.len() < MIN_POSITIONS {
            return Err(DensityError::TooShort { len: entries.len() });
        }
        let integers = integers_from_raw(entries)?;
        Self::try_from(integers)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<u64> {
        self.counts.get(index).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.counts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[inline]
    pub fn last_index(&self) -> usize {
        self.counts.len() - 1
    }

    pub fn to_vec(&self) -> Vec<u64> {
        self.counts.clone()
    }

    pub(crate) fn replace(&mut self, counts: Vec<u64>) {
        debug_assert_eq!(counts.len(), self.counts.len(), "replacement changed length");
        debug_assert_eq!(
            counts.iter().sum::<u64>(),
            self.total,
            "replacement changed particle count"
        );
        self.counts = counts;
    }
}

impl TryFrom<Vec<i64>> for DensityState {
    type Error = DensityError;

    fn try_from(values: Vec<i64>) -> Result<Self, Self::Error> {
        if values.len() < MIN_POSITIONS {
            return Err(DensityError::TooShort { len: values.len() });
        }
        Self::new(counts_from_integers(&values)?)
    }
}

impl TryFrom<Vec<u64>> for DensityState {
    type Error = DensityError;

    fn try_from(counts: Vec<u64>) -> Result<Self, Self::Error> {
        Self::new(counts)
    }
}

impl From<DensityState> for Vec<u64> {
    fn from(state: DensityState) -> Self {
        state.counts
    }
}

impl AsRef<[u64]> for DensityState {
    fn as_ref(&self) -> &[u64] {
        &self.counts
    }
}

impl fmt::Display for DensityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, n) in self.counts.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", n)?;
        }
        write!(f, "]")
    }
}
