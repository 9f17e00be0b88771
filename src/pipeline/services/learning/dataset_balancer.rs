use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::pipeline::types::{Action, Sample};

/// Seed used when no random source is supplied.
pub const DEFAULT_BALANCE_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub none: usize,
    pub moves: usize,
}

impl ClassCounts {
    pub fn of(samples: &[Sample]) -> Self {
        let none = samples.iter().filter(|s| s.action == Action::None).count();
        Self {
            none,
            moves: samples.len() - none,
        }
    }
}

/// Evens out "held still" against "moved" samples by thinning the NONE class.
///
/// MOVE rows (left and right together) are never dropped; when they are
/// already the majority the input passes through unchanged.
pub struct DatasetBalancer<R> {
    rng: R,
}

impl DatasetBalancer<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for DatasetBalancer<StdRng> {
    fn default() -> Self {
        Self::seeded(DEFAULT_BALANCE_SEED)
    }
}

impl<R: Rng> DatasetBalancer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the kept NONE rows followed by every MOVE row, each group in
    /// its original order.
    pub fn balance(&mut self, samples: Vec<Sample>) -> Vec<Sample> {
        let (none, moves): (Vec<Sample>, Vec<Sample>) = samples
            .into_iter()
            .partition(|s| s.action == Action::None);
        info!(
            "Class distribution -> NONE: {}, MOVE: {}",
            none.len(),
            moves.len()
        );

        let none = if none.len() > moves.len() {
            debug!("Subsampling NONE from {} to {}", none.len(), moves.len());
            let mut keep = rand::seq::index::sample(&mut self.rng, none.len(), moves.len())
                .into_vec();
            keep.sort_unstable();
            keep.into_iter().map(|i| none[i]).collect()
        } else {
            none
        };

        let mut balanced = none;
        balanced.extend(moves);
        balanced
    }
}
