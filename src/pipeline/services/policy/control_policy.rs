use crate::pipeline::types::{Action, PADDLE_HALF_WIDTH};

/// Dead-zone used while playing live.
pub const LIVE_TOLERANCE: f64 = 2.0;

/// Steers the paddle center towards a target x, holding still inside a dead-zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPolicy {
    pub half_width: f64,
    pub tolerance: f64,
}

impl Default for ControlPolicy {
    fn default() -> Self {
        Self {
            half_width: PADDLE_HALF_WIDTH,
            tolerance: LIVE_TOLERANCE,
        }
    }
}

impl ControlPolicy {
    pub fn new(half_width: f64, tolerance: f64) -> Self {
        Self {
            half_width,
            tolerance,
        }
    }

    pub fn decide(&self, paddle_x: f64, predicted_x: f64) -> Action {
        let center = paddle_x + self.half_width;
        if center < predicted_x - self.tolerance {
            Action::MoveRight
        } else if center > predicted_x + self.tolerance {
            Action::MoveLeft
        } else {
            Action::None
        }
    }
}
