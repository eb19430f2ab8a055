//! Composition policies deciding which stages build each output

use rand::{Rng, RngCore};
use std::fmt;

/// Strategy for combining shape-preserving stages into one output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompositionPolicy {
    /// Apply every stage in order
    #[default]
    Chain,
    /// Output `i` uses stage `i mod stage_count`
    RoundRobin,
    /// Keep each stage with probability one half, never none
    RandomSubset,
}

impl CompositionPolicy {
    /// Indices of the stages to apply, in order, for output `index`
    ///
    /// Returns an empty selection only when there are no stages.
    pub fn select(self, stage_count: usize, index: usize, rng: &mut dyn RngCore) -> Vec<usize> {
        if stage_count == 0 {
            return Vec::new();
        }

        match self {
            Self::Chain => (0..stage_count).collect(),
            Self::RoundRobin => vec![index % stage_count],
            Self::RandomSubset => {
                let chosen: Vec<usize> = (0..stage_count).filter(|_| rng.random_bool(0.5)).collect();
                if chosen.is_empty() {
                    vec![rng.random_range(0..stage_count)]
                } else {
                    chosen
                }
            }
        }
    }
}

impl fmt::Display for CompositionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chain => write!(f, "chain"),
            Self::RoundRobin => write!(f, "round-robin"),
            Self::RandomSubset => write!(f, "random-subset"),
        }
    }
}
