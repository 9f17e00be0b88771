use rand::seq::SliceRandom;
use rand::Rng;

use crate::pipeline::types::{Action, Sample};

/// Classifier input. Only the horizontal gap and horizontal speed decide the
/// lookahead label, so the vertical components are left out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub diff_x: f64,
    pub ball_vx: f64,
}

impl FeatureVector {
    pub fn as_array(&self) -> [f64; 2] {
        [self.diff_x, self.ball_vx]
    }
}

impl From<&Sample> for FeatureVector {
    fn from(sample: &Sample) -> Self {
        Self {
            diff_x: sample.paddle_x - sample.ball_x,
            ball_vx: sample.ball_vx,
        }
    }
}

/// Feature/target pairs ready to hand to a trainer.
pub fn training_pairs(samples: &[Sample]) -> Vec<(FeatureVector, Action)> {
    samples
        .iter()
        .map(|s| (FeatureVector::from(s), s.action))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainTestSplit {
    pub train: Vec<Sample>,
    pub test: Vec<Sample>,
}

/// Shuffles and splits off `ceil(len * test_fraction)` rows for evaluation.
pub fn train_test_split<R: Rng + ?Sized>(
    samples: &[Sample],
    test_fraction: f64,
    rng: &mut R,
) -> TrainTestSplit {
    let mut shuffled = samples.to_vec();
    shuffled.shuffle(rng);

    let test_len = ((samples.len() as f64) * test_fraction.clamp(0.0, 1.0)).ceil() as usize;
    let test_len = test_len.min(shuffled.len());
    let train = shuffled.split_off(test_len);

    TrainTestSplit {
        train,
        test: shuffled,
    }
}
