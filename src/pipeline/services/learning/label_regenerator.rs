use serde::Deserialize;
use tracing::info;

use crate::pipeline::services::physics::TrajectoryPredictor;
use crate::pipeline::services::policy::ControlPolicy;
use crate::pipeline::types::{Action, BallState, RecordedRow, Sample, Side, PADDLE_HALF_WIDTH};

/// Dead-zone of the offline lookahead rule.
pub const LOOKAHEAD_TOLERANCE: f64 = 1.0;

/// Rule that recomputes a training label from a recorded ball and paddle.
pub trait LabelStrategy {
    fn label(&self, ball: &BallState, paddle_x: f64) -> Action;

    fn name(&self) -> &'static str;
}

/// Aims the paddle center at where the ball will be one tick from now.
///
/// Ignores walls entirely, so near a wall it can disagree with the live
/// policy that recorded the sample.
#[derive(Debug, Clone, Copy)]
pub struct OneStepLookahead {
    pub half_width: f64,
    pub tolerance: f64,
}

impl Default for OneStepLookahead {
    fn default() -> Self {
        Self {
            half_width: PADDLE_HALF_WIDTH,
            tolerance: LOOKAHEAD_TOLERANCE,
        }
    }
}

impl LabelStrategy for OneStepLookahead {
    fn label(&self, ball: &BallState, paddle_x: f64) -> Action {
        let diff = (ball.x + ball.vx) - (paddle_x + self.half_width);
        if diff > self.tolerance {
            Action::MoveRight
        } else if diff < -self.tolerance {
            Action::MoveLeft
        } else {
            Action::None
        }
    }

    fn name(&self) -> &'static str {
        "OneStepLookahead"
    }
}

/// Replays the live intercept rule for the near side.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterceptLabel {
    predictor: TrajectoryPredictor,
    policy: ControlPolicy,
}

impl LabelStrategy for InterceptLabel {
    fn label(&self, ball: &BallState, paddle_x: f64) -> Action {
        let side = Side::Near;
        if !side.is_incoming(ball.vy) {
            return Action::None;
        }
        let predicted_x = self.predictor.predict(ball, side.defended_line());
        self.policy.decide(paddle_x, predicted_x)
    }

    fn name(&self) -> &'static str {
        "InterceptLabel"
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LabelStrategyKind {
    #[default]
    OneStepLookahead,
    Intercept,
}

impl LabelStrategyKind {
    pub fn build(&self) -> Box<dyn LabelStrategy> {
        match self {
            LabelStrategyKind::OneStepLookahead => Box::new(OneStepLookahead::default()),
            LabelStrategyKind::Intercept => Box::new(InterceptLabel::default()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relabeled {
    /// Rows with `ball_vy > 0`, carrying the recomputed command.
    pub samples: Vec<Sample>,
    pub rows_before_filter: usize,
    /// Kept rows whose recomputed command differs from the recorded one.
    /// Rows without a recorded live action are not counted.
    pub disagreements: usize,
}

pub struct LabelRegenerator {
    strategy: Box<dyn LabelStrategy>,
}

impl Default for LabelRegenerator {
    fn default() -> Self {
        Self::new(Box::new(OneStepLookahead::default()))
    }
}

impl LabelRegenerator {
    pub fn new(strategy: Box<dyn LabelStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Relabels every row, then keeps only balls travelling towards the near side.
    ///
    /// The stored command plays no part in the new label.
    pub fn relabel(&self, rows: &[RecordedRow]) -> Relabeled {
        let mut disagreements = 0;
        let kept: Vec<Sample> = rows
            .iter()
            .map(|row| (row, self.strategy.label(&row.ball, row.paddle_x)))
            .filter(|(row, _)| row.ball.vy > 0.0)
            .map(|(row, command)| {
                if row.recorded.is_some_and(|recorded| recorded != command) {
                    disagreements += 1;
                }
                row.labeled(command)
            })
            .collect();

        info!(
            "{}: {} rows relabeled, {} kept (ball_vy > 0), {} disagree with recorded action",
            self.strategy.name(),
            rows.len(),
            kept.len(),
            disagreements
        );

        Relabeled {
            samples: kept,
            rows_before_filter: rows.len(),
            disagreements,
        }
    }
}
