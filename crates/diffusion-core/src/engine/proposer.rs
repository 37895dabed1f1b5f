use crate::core::density::DensityState;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub fn offset(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    /// The only legal direction at either end of a line whose last index is `last`.
    pub fn forced(source: usize, last: usize) -> Option<Direction> {
        if source == 0 {
            Some(Direction::Right)
        } else if source >= last {
            Some(Direction::Left)
        } else {
            None
        }
    }

    /// Clamps a preferred direction at the ends of the line.
    pub fn resolve(source: usize, last: usize, preferred: Direction) -> Direction {
        Self::forced(source, last).unwrap_or(preferred)
    }
}

/// A proposed single-particle hop and the density it would produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMove {
    source: usize,
    target: Option<usize>,
    counts: Vec<u64>,
}

impl CandidateMove {
    /// Builds the hop of one particle from `source` toward `direction`.
    ///
    /// The direction is clamped at the boundaries. A source holding no particles (or lying
    /// outside the line) yields a null move whose density equals the input.
    pub fn hop(density: &DensityState, source: usize, direction: Direction) -> Self {
        let counts = density.to_vec();
        let null = |counts: Vec<u64>| Self {
            source,
            target: None,
            counts,
        };
        match density.get(source) {
            Some(n) if n > 0 => {}
            _ => return null(counts),
        }

        let resolved = Direction::resolve(source, density.last_index(), direction);
        let Some(target) = source.checked_add_signed(resolved.offset()) else {
            return null(counts);
        };

        let mut counts = counts;
        counts[source] -= 1;
        counts[target] += 1;

        Self {
            source,
            target: Some(target),
            counts,
        }
    }

    #[inline]
    pub fn source(&self) -> usize {
        self.source
    }

    #[inline]
    pub fn target(&self) -> Option<usize> {
        self.target
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.target.is_none()
    }

    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn into_counts(self) -> Vec<u64> {
        self.counts
    }
}

pub trait MoveProposer {
    fn propose<R: Rng>(&mut self, density: &DensityState, rng: &mut R) -> CandidateMove;
}

/// Picks a uniformly random particle, then hops it to a uniformly random neighbour.
///
/// Because particles rather than positions are sampled, a site holding `k` particles is
/// `k` times as likely to be the source as a site holding one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParticleHopProposer;

impl ParticleHopProposer {
    pub fn new() -> Self {
        Self
    }

    pub fn select_source<R: Rng>(&self, density: &DensityState, rng: &mut R) -> usize {
        let particle = rng.gen_range(0..density.total());
        let mut running = 0;
        for (location, &n) in density.as_slice().iter().enumerate() {
            running += n;
            if running > particle {
                return location;
            }
        }
        density.last_index()
    }

    pub fn select_direction<R: Rng>(&self, source: usize, last: usize, rng: &mut R) -> Direction {
        Direction::forced(source, last).unwrap_or_else(|| {
            if rng.gen_bool(0.5) {
                Direction::Right
            } else {
                Direction::Left
            }
        })
    }
}

impl MoveProposer for ParticleHopProposer {
    fn propose<R: Rng>(&mut self, density: &DensityState, rng: &mut R) -> CandidateMove {
        let source = self.select_source(density, rng);
        let direction = self.select_direction(source, density.last_index(), rng);
        CandidateMove::hop(density, source, direction)
    }
}
